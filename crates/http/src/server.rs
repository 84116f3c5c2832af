//! TCP listener lifecycle.
//!
//! [`Server::serve`] binds a port and spawns an accept loop; every accepted
//! connection is handled in its own task. [`Server::close`] stops accepting
//! new connections but lets in-flight ones finish.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::connection::HttpConnection;
use crate::handler::Handler;
use crate::protocol::ServerError;

#[derive(Debug)]
pub struct Server {
    local_addr: SocketAddr,
    closed: Arc<AtomicBool>,
    shutdown: CancellationToken,
    accept_task: Option<JoinHandle<()>>,
}

impl Server {
    /// Listens on `port` on all IPv4 interfaces.
    pub async fn serve<H: Handler>(port: u16, handler: H) -> Result<Self, ServerError> {
        Self::bind(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)), handler).await
    }

    /// Listens on `addr` and starts accepting in a background task.
    ///
    /// Returns as soon as the listener is bound.
    pub async fn bind<H: Handler>(addr: SocketAddr, handler: H) -> Result<Self, ServerError> {
        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!(cause = %e, %addr, "bind server error");
                return Err(ServerError::bind(addr, e));
            }
        };
        let local_addr = listener.local_addr().map_err(|e| ServerError::bind(addr, e))?;
        info!(%local_addr, "start listening");

        let closed = Arc::new(AtomicBool::new(false));
        let shutdown = CancellationToken::new();
        let accept_task =
            tokio::spawn(accept_loop(listener, Arc::new(handler), Arc::clone(&closed), shutdown.clone()));

        Ok(Self { local_addr, closed, shutdown, accept_task: Some(accept_task) })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Stops accepting connections and releases the listening socket.
    ///
    /// Connections already accepted keep running until they have written
    /// their response. Calling `close` again does nothing.
    pub async fn close(&mut self) -> Result<(), ServerError> {
        self.closed.store(true, Ordering::Release);
        self.shutdown.cancel();

        if let Some(accept_task) = self.accept_task.take() {
            accept_task.await?;
            info!(local_addr = %self.local_addr, "server closed");
        }
        Ok(())
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        self.closed.store(true, Ordering::Release);
        self.shutdown.cancel();
    }
}

async fn accept_loop<H: Handler>(
    listener: TcpListener,
    handler: Arc<H>,
    closed: Arc<AtomicBool>,
    shutdown: CancellationToken,
) {
    loop {
        let accepted = tokio::select! {
            biased;
            _ = shutdown.cancelled() => return,
            accepted = listener.accept() => accepted,
        };

        let (tcp_stream, remote_addr) = match accepted {
            Ok(stream_and_addr) => stream_and_addr,
            Err(e) => {
                if closed.load(Ordering::Acquire) {
                    return;
                }
                let e = ServerError::accept(e);
                warn!(cause = %e, "failed to accept");
                continue;
            }
        };

        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            let (reader, writer) = tcp_stream.into_split();
            let connection = HttpConnection::new(reader, writer);
            match connection.process(handler).await {
                Ok(()) => {
                    debug!(%remote_addr, "finished process, connection shutdown");
                }
                Err(e) => {
                    warn!(%remote_addr, cause = %e, "connection closed with error");
                }
            }
        });
    }
}
