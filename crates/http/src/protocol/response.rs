//! HTTP response representation.
//!
//! Responses are fully buffered: the handler writes the whole body into a
//! sink before the status line is known, so a response is always sent with
//! an exact `content-length`.

use bytes::Bytes;
use http::StatusCode;

use crate::protocol::Headers;

pub const CONTENT_LENGTH: &str = "content-length";
pub const CONTENT_TYPE: &str = "content-type";

const TEXT_PLAIN: &str = "text/plain";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: Headers,
    body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode, headers: Headers, body: Bytes) -> Self {
        Self { status, headers, body }
    }

    /// Builds a response carrying [`default_headers`] for `body`.
    pub fn with_body<B: Into<Bytes>>(status: StatusCode, body: B) -> Self {
        let body = body.into();
        Self { status, headers: default_headers(body.len()), body }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_parts(self) -> (StatusCode, Headers, Bytes) {
        (self.status, self.headers, self.body)
    }
}

/// Headers every response carries: the body length and a plain text type.
pub fn default_headers(content_length: usize) -> Headers {
    let mut headers = Headers::new();
    headers.set(CONTENT_LENGTH, content_length.to_string());
    headers.set(CONTENT_TYPE, TEXT_PLAIN);
    headers
}
