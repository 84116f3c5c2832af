//! Request-line parsing.
//!
//! A request line is `<method> SP <target> SP <version> CRLF`. The method must
//! be made of uppercase ASCII letters and only `HTTP/1.1` is accepted.

use memchr::memmem;

use crate::ensure;
use crate::protocol::{CRLF, HTTP_11, ParseError, RequestLine};

/// Parses the request line at the start of `buf`.
///
/// # Returns
///
/// - `Ok(Some((line, consumed)))` once a full line is buffered; `consumed`
///   includes the CRLF
/// - `Ok(None)` if no CRLF has arrived yet
/// - `Err(ParseError)` if the line is malformed
pub fn parse_request_line(buf: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(line_end) = memmem::find(buf, CRLF) else {
        return Ok(None);
    };

    let line = std::str::from_utf8(&buf[..line_end])
        .map_err(|e| ParseError::malformed_request_line(format!("request line is not utf8: {e}")))?;

    let parts: Vec<&str> = line.split(' ').collect();
    let [method, target, version] = parts[..] else {
        return Err(ParseError::malformed_request_line(format!(
            "expect 3 space separated parts, found {}: {line:?}",
            parts.len()
        )));
    };

    ensure!(
        !method.is_empty() && method.bytes().all(|b| b.is_ascii_uppercase()),
        ParseError::malformed_request_line(format!("invalid method: {method:?}"))
    );
    ensure!(!target.is_empty(), ParseError::malformed_request_line("empty request target"));
    ensure!(version == HTTP_11, ParseError::unsupported_version(version));

    Ok(Some((RequestLine::new(method, target, version), line_end + CRLF.len())))
}
