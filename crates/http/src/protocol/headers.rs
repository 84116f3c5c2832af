//! Case-insensitive header table with incremental, line-at-a-time parsing.
//!
//! Names are folded to ASCII lowercase on every read and write, and a later
//! write to the same folded name replaces the earlier value. The table is
//! backed by an ordered map so that serializing it is deterministic.

use std::collections::BTreeMap;
use std::collections::btree_map;

use memchr::memmem;

use crate::ensure;
use crate::protocol::ParseError;

pub(crate) const CRLF: &[u8] = b"\r\n";

/// Punctuation allowed in a header name besides ASCII letters and digits.
const TOKEN_SYMBOLS: &[u8] = b"!#$%&'*+-.^_`|~";

/// Result of feeding a buffer to [`Headers::parse_line`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LineStatus {
    /// No CRLF in the buffer yet; nothing was consumed.
    Partial,
    /// One header line was stored; `consumed` includes its CRLF.
    Header { consumed: usize },
    /// The empty line terminating the header section.
    End { consumed: usize },
}

impl LineStatus {
    /// Number of bytes the caller should drop from the front of its buffer.
    #[inline]
    pub fn consumed(&self) -> usize {
        match self {
            LineStatus::Partial => 0,
            LineStatus::Header { consumed } | LineStatus::End { consumed } => *consumed,
        }
    }

    #[inline]
    pub fn is_partial(&self) -> bool {
        matches!(self, LineStatus::Partial)
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        matches!(self, LineStatus::End { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers {
    inner: BTreeMap<String, String>,
}

impl Headers {
    pub fn new() -> Self {
        Default::default()
    }

    /// Parses the first CRLF-terminated line of `buf` into the table.
    ///
    /// The buffer is never modified; the returned [`LineStatus`] says how many
    /// bytes were used. Call again with a longer buffer after
    /// [`LineStatus::Partial`].
    ///
    /// # Errors
    ///
    /// - [`ParseError::InvalidHeaderSyntax`] if the line has no colon or the
    ///   name is followed by whitespace before the colon
    /// - [`ParseError::InvalidHeaderName`] if the trimmed name is empty or
    ///   holds a byte outside the token character set
    pub fn parse_line(&mut self, buf: &[u8]) -> Result<LineStatus, ParseError> {
        let Some(line_end) = memmem::find(buf, CRLF) else {
            return Ok(LineStatus::Partial);
        };

        if line_end == 0 {
            return Ok(LineStatus::End { consumed: CRLF.len() });
        }

        let line = &buf[..line_end];
        let colon = memchr::memchr(b':', line)
            .ok_or_else(|| ParseError::invalid_header_syntax(String::from_utf8_lossy(line)))?;

        let (raw_name, raw_value) = (&line[..colon], &line[colon + 1..]);
        ensure!(
            !raw_name.last().is_some_and(|b| matches!(b, b' ' | b'\t')),
            ParseError::invalid_header_syntax(String::from_utf8_lossy(raw_name))
        );

        let name = raw_name.trim_ascii();
        ensure!(is_valid_name(name), ParseError::invalid_header_name(String::from_utf8_lossy(name)));

        // token characters are ASCII, so the name is always valid utf8
        let name = String::from_utf8_lossy(name);
        let value = String::from_utf8_lossy(raw_value.trim_ascii());
        self.set(&name, value);

        Ok(LineStatus::Header { consumed: line_end + CRLF.len() })
    }

    /// Inserts `value` under the lowercase form of `name`, returning the
    /// value it replaced.
    pub fn set<V: Into<String>>(&mut self, name: &str, value: V) -> Option<String> {
        self.inner.insert(name.to_ascii_lowercase(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        match self.inner.get(name) {
            Some(value) => Some(value.as_str()),
            None => self.inner.get(&name.to_ascii_lowercase()).map(String::as_str),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.inner.remove(&name.to_ascii_lowercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterates `(name, value)` pairs ordered by folded name.
    pub fn iter(&self) -> Iter<'_> {
        Iter { inner: self.inner.iter() }
    }
}

#[derive(Debug)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut headers = Headers::new();
        for (name, value) in iter {
            headers.set(name.as_ref(), value);
        }
        headers
    }
}

#[inline]
fn is_token_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || TOKEN_SYMBOLS.contains(&b)
}

fn is_valid_name(name: &[u8]) -> bool {
    !name.is_empty() && name.iter().copied().all(is_token_char)
}
