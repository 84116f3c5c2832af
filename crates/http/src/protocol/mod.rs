//! Core HTTP protocol types.
//!
//! # Architecture
//!
//! - **Header table** (`headers`): case-insensitive name/value map that
//!   parses one CRLF-terminated line per call
//!   - [`Headers`]: the table itself
//!   - [`LineStatus`]: how far a [`Headers::parse_line`] call advanced
//!
//! - **Request** (`request`): the decoded message handed to handlers
//!   - [`RequestLine`]: method, target and version
//!   - [`Request`]: request line, headers and body
//!
//! - **Response** (`response`): the fully buffered reply
//!   - [`Response`]: status, headers and body
//!   - [`default_headers`]: `content-length` and `content-type` for a body
//!
//! - **Error Handling** (`error`)
//!   - [`HttpError`]: result of one connection
//!   - [`ParseError`]: request decoding errors
//!   - [`SendError`]: response writing errors
//!   - [`ServerError`]: listener lifecycle errors

mod headers;
pub use headers::Headers;
pub use headers::Iter;
pub use headers::LineStatus;
pub(crate) use headers::CRLF;

mod request;
pub use request::HTTP_11;
pub use request::Request;
pub use request::RequestLine;

mod response;
pub use response::CONTENT_LENGTH;
pub use response::CONTENT_TYPE;
pub use response::Response;
pub use response::default_headers;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
pub use error::ServerError;
