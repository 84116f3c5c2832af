//! Request-line decoding and response head encoding.
//!
//! # Components
//!
//! - [`parse_request_line`]: parses `<method> <target> HTTP/1.1` from the
//!   front of a buffer, reporting how many bytes it used
//! - [`HeaderEncoder`]: writes a status line and header table
//!
//! Header lines themselves are parsed by
//! [`Headers::parse_line`](crate::protocol::Headers::parse_line).

mod header_encoder;
mod request_line;

pub use header_encoder::HeaderEncoder;
pub use request_line::parse_request_line;
