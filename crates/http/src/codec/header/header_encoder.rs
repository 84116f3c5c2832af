//! HTTP response head encoder.
//!
//! Serializes the status line and header table of a response. The
//! `content-length` header is always rewritten to the real body length so a
//! handler can never announce a different size than it sends.

use crate::protocol::{CONTENT_LENGTH, Headers, SendError};

use bytes::{BufMut, BytesMut};

use http::StatusCode;
use std::io;
use std::io::Write;
use tokio_util::codec::Encoder;

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 1024;

/// Encoder for the head of an HTTP/1.1 response.
///
/// The item is `(status, headers, body_length)`.
#[derive(Debug, Default)]
pub struct HeaderEncoder;

impl Encoder<(StatusCode, Headers, usize)> for HeaderEncoder {
    type Error = SendError;

    fn encode(&mut self, item: (StatusCode, Headers, usize), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (status, mut headers, body_length) = item;

        dst.reserve(INIT_HEADER_SIZE);
        write!(FastWrite(dst), "HTTP/1.1 {} {}\r\n", status.as_str(), status.canonical_reason().unwrap_or(""))?;

        headers.set(CONTENT_LENGTH, body_length.to_string());

        for (name, value) in headers.iter() {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Writer that appends straight into a `BytesMut`, so `write!` can format
/// without an intermediate `String`.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
