//! HTTP connection handling module
//!
//! Every accepted connection carries exactly one request. [`HttpConnection`]
//! decodes it, dispatches it to the handler and writes a single response,
//! whichever way decoding or handling went, before closing.

mod http_connection;

pub use http_connection::HttpConnection;
