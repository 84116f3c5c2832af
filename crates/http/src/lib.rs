//! A small HTTP/1.1 server built directly on top of TCP.
//!
//! Each accepted connection carries exactly one request. The request is
//! decoded incrementally from whatever fragments the socket delivers, handed
//! to a user-supplied [`handler::Handler`], and answered with exactly one
//! response before the connection is closed.
//!
//! # Example
//!
//! ```no_run
//! use bytes::BytesMut;
//! use httpfromtcp::handler::{HandlerError, make_handler};
//! use httpfromtcp::protocol::Request;
//! use httpfromtcp::server::Server;
//! use tracing::{Level, info};
//! use tracing_subscriber::FmtSubscriber;
//!
//! fn hello_world(body: &mut BytesMut, request: Request) -> Result<(), HandlerError> {
//!     if request.target() == "/yourproblem" {
//!         return Err(HandlerError::bad_request("Your problem is not my problem\n"));
//!     }
//!     body.extend_from_slice(b"Hello World!\r\n");
//!     Ok(())
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
//!     tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
//!
//!     let mut server = Server::serve(42069, make_handler(hello_world)).await.expect("bind server");
//!     info!(addr = %server.local_addr(), "server started");
//!
//!     tokio::signal::ctrl_c().await.expect("listen for ctrl-c");
//!     server.close().await.expect("close server");
//! }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: header table, request and response types, errors
//! - [`codec`]: incremental request decoder and response encoder
//! - [`handler`]: the handler contract and [`handler::HandlerError`]
//! - [`connection`]: one request in, one response out
//! - [`server`]: listener, accept loop and shutdown
//!
//! # Limitations
//!
//! - HTTP/1.1 only, one request per connection, no keep-alive
//! - Bodies are framed by `content-length` only (no chunked encoding)
//! - No TLS support
//! - Maximum size of request line plus headers: 8KB
//! - No read timeouts: a stalled client holds its connection task

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod server;

mod utils;
pub(crate) use utils::ensure;
