//! Shared pieces of the `httpserver`, `tcplistener` and `udpsender` binaries.

use bytes::BytesMut;
use httpfromtcp::handler::HandlerError;
use httpfromtcp::protocol::Request;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

pub const DEFAULT_PORT: u16 = 42069;

/// Installs the global `tracing` subscriber.
///
/// # Panics
///
/// Panics if a global subscriber is already set.
pub fn init_tracing(max_level: Level) {
    let subscriber = FmtSubscriber::builder().with_max_level(max_level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

/// The demo routes: two failing targets, everything else succeeds.
pub fn demo_handler(body: &mut BytesMut, request: Request) -> Result<(), HandlerError> {
    match request.target() {
        "/yourproblem" => Err(HandlerError::bad_request("Your problem is not my problem\n")),
        "/myproblem" => Err(HandlerError::internal_server_error("Woopsie, my bad\n")),
        _ => {
            body.extend_from_slice(b"All good, frfr\n");
            Ok(())
        }
    }
}
