use std::io;
use std::net::SocketAddr;
use thiserror::Error;

/// Outcome of a single connection that did not end with a clean response.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

/// Errors raised while decoding a request from the wire.
///
/// Every variant is fatal for the connection it happened on. Needing more
/// bytes is not an error: decoders signal it with `Ok(None)` or
/// [`LineStatus::Partial`](crate::protocol::LineStatus::Partial).
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("invalid header name: {name}")]
    InvalidHeaderSyntax { name: String },

    #[error("invalid character in header key: {name}")]
    InvalidHeaderName { name: String },

    #[error("malformed request line: {reason}")]
    MalformedRequestLine { reason: String },

    #[error("unsupported http version: {version}")]
    UnsupportedVersion { version: String },

    #[error("invalid content-length header: {reason}")]
    InvalidContentLength { reason: String },

    #[error("incomplete request: stream ended while {phase}")]
    IncompleteRequest { phase: &'static str },

    #[error("header size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeHeader { current_size: usize, max_size: usize },

    #[error("request decoder already failed")]
    Poisoned,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn invalid_header_syntax<S: ToString>(name: S) -> Self {
        Self::InvalidHeaderSyntax { name: name.to_string() }
    }

    pub fn invalid_header_name<S: ToString>(name: S) -> Self {
        Self::InvalidHeaderName { name: name.to_string() }
    }

    pub fn malformed_request_line<S: ToString>(reason: S) -> Self {
        Self::MalformedRequestLine { reason: reason.to_string() }
    }

    pub fn unsupported_version<S: ToString>(version: S) -> Self {
        Self::UnsupportedVersion { version: version.to_string() }
    }

    pub fn invalid_content_length<S: ToString>(reason: S) -> Self {
        Self::InvalidContentLength { reason: reason.to_string() }
    }

    pub fn incomplete_request(phase: &'static str) -> Self {
        Self::IncompleteRequest { phase }
    }

    pub fn too_large_header(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeHeader { current_size, max_size }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }

    /// Returns true when the stream ended before a full request arrived,
    /// as opposed to the client sending something malformed.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::IncompleteRequest { .. })
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

/// Lifecycle errors of a [`Server`](crate::server::Server).
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("can't bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: io::Error },

    #[error("failed to accept connection: {source}")]
    Accept { source: io::Error },

    #[error("accept loop terminated abnormally: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

impl ServerError {
    pub fn bind(addr: SocketAddr, source: io::Error) -> Self {
        Self::Bind { addr, source }
    }

    pub fn accept(source: io::Error) -> Self {
        Self::Accept { source }
    }
}
