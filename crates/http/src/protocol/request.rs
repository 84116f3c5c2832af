//! Decoded HTTP request types.
//!
//! A [`Request`] is assembled by the [`RequestDecoder`](crate::codec::RequestDecoder)
//! and handed to the handler by value once decoding is complete.

use bytes::Bytes;
use futures::StreamExt;
use tokio::io::AsyncRead;
use tokio_util::codec::FramedRead;

use crate::codec::RequestDecoder;
use crate::protocol::{Headers, ParseError};

/// The only protocol version the decoder accepts.
pub const HTTP_11: &str = "HTTP/1.1";

/// The first line of a request: `<method> <target> <version>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    target: String,
    version: String,
}

impl RequestLine {
    pub fn new<M, T, V>(method: M, target: T, version: V) -> Self
    where
        M: Into<String>,
        T: Into<String>,
        V: Into<String>,
    {
        Self { method: method.into(), target: target.into(), version: version.into() }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// The request target exactly as sent, e.g. `/index.html?a=1`.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    request_line: RequestLine,
    headers: Headers,
    body: Bytes,
}

impl Request {
    pub fn new(request_line: RequestLine, headers: Headers, body: Bytes) -> Self {
        Self { request_line, headers, body }
    }

    /// Reads and decodes exactly one request from `reader`.
    ///
    /// Bytes after the end of the request body are left unread in the
    /// internal buffer and dropped with it.
    pub async fn from_reader<R>(reader: R) -> Result<Self, ParseError>
    where
        R: AsyncRead + Unpin,
    {
        let mut framed_read = FramedRead::new(reader, RequestDecoder::new());
        match framed_read.next().await {
            Some(result) => result,
            None => Err(ParseError::incomplete_request("reading the request line")),
        }
    }

    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    pub fn method(&self) -> &str {
        self.request_line.method()
    }

    pub fn target(&self) -> &str {
        self.request_line.target()
    }

    pub fn version(&self) -> &str {
        self.request_line.version()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_parts(self) -> (RequestLine, Headers, Bytes) {
        (self.request_line, self.headers, self.body)
    }
}
