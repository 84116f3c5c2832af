//! HTTP codec module for decoding requests and encoding responses
//!
//! Both directions plug into `tokio_util::codec`, so a connection is just a
//! [`FramedRead`](tokio_util::codec::FramedRead) over the socket's read half
//! and a [`FramedWrite`](tokio_util::codec::FramedWrite) over its write half.
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestDecoder`]: three-phase state machine producing one request
//!   - request-line parsing via the `header` module
//!   - header lines via [`Headers::parse_line`](crate::protocol::Headers::parse_line)
//!   - `content-length` bodies via the `body` module
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: writes status line, headers and body
//!
//! # Example
//!
//! ```no_run
//! use httpfromtcp::codec::{RequestDecoder, ResponseEncoder};
//! use httpfromtcp::protocol::Response;
//! use http::StatusCode;
//! use tokio_util::codec::{Decoder, Encoder};
//! use bytes::BytesMut;
//!
//! // Decode incoming request
//! let mut decoder = RequestDecoder::new();
//! let mut request_buffer = BytesMut::new();
//! let request = decoder.decode(&mut request_buffer);
//!
//! // Encode outgoing response
//! let mut encoder = ResponseEncoder::new();
//! let mut response_buffer = BytesMut::new();
//! encoder.encode(Response::with_body(StatusCode::OK, "hello\n"), &mut response_buffer).unwrap();
//! ```

mod body;
mod header;
mod request_decoder;
mod response_encoder;

pub use header::parse_request_line;
pub use request_decoder::{DecodeState, MAX_HEADER_BYTES, RequestDecoder};
pub use response_encoder::ResponseEncoder;
