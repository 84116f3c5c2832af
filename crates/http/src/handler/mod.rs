//! Request handler contract.
//!
//! A handler receives the decoded [`Request`] by value together with a body
//! sink. It either writes the response body into the sink and returns
//! `Ok(())`, which yields a `200 OK`, or returns a [`HandlerError`], in which
//! case anything already written to the sink is discarded.
//!
//! Handlers run synchronously inside the task that owns the connection.

use bytes::BytesMut;
use http::StatusCode;
use thiserror::Error;

use crate::protocol::{Request, Response};

pub trait Handler: Send + Sync + 'static {
    fn call(&self, body: &mut BytesMut, request: Request) -> Result<(), HandlerError>;
}

/// An application-level failure carrying the response to send instead of the body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status_code}: {message}")]
pub struct HandlerError {
    pub status_code: StatusCode,
    pub message: String,
}

impl HandlerError {
    pub fn new<S: Into<String>>(status_code: StatusCode, message: S) -> Self {
        Self { status_code, message: message.into() }
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal_server_error<S: Into<String>>(message: S) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The complete response for this error: its status and the message as body.
    pub fn into_response(self) -> Response {
        Response::with_body(self.status_code, self.message)
    }
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(&mut BytesMut, Request) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    fn call(&self, body: &mut BytesMut, request: Request) -> Result<(), HandlerError> {
        (self.f)(body, request)
    }
}

pub fn make_handler<F>(f: F) -> HandlerFn<F>
where
    F: Fn(&mut BytesMut, Request) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    HandlerFn { f }
}

/// Runs `handler` against `request` and turns the outcome into the single
/// response for the connection.
pub fn dispatch<H: Handler + ?Sized>(handler: &H, request: Request) -> Response {
    let mut body = BytesMut::new();
    match handler.call(&mut body, request) {
        Ok(()) => Response::with_body(StatusCode::OK, body.freeze()),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::protocol::{Headers, RequestLine};

    fn request(target: &str) -> Request {
        Request::new(RequestLine::new("GET", target, "HTTP/1.1"), Headers::new(), Bytes::new())
    }

    #[test]
    fn success_uses_sink_contents() {
        let handler = make_handler(|body: &mut BytesMut, request: Request| {
            body.extend_from_slice(b"target=");
            body.extend_from_slice(request.target().as_bytes());
            Ok(())
        });

        let response = dispatch(&handler, request("/coffee"));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&response.body()[..], b"target=/coffee");
        assert_eq!(response.headers().get("content-length"), Some("14"));
    }

    #[test]
    fn error_discards_partial_body() {
        let handler = make_handler(|body: &mut BytesMut, _request: Request| {
            body.extend_from_slice(b"half written");
            Err(HandlerError::internal_server_error("Woopsie, my bad\n"))
        });

        let response = dispatch(&handler, request("/myproblem"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(&response.body()[..], b"Woopsie, my bad\n");
        assert_eq!(response.headers().get("content-length"), Some("16"));
    }

    #[test]
    fn error_display() {
        let err = HandlerError::bad_request("nope");
        assert_eq!(err.to_string(), "400 Bad Request: nope");
    }
}
