use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, warn};

use crate::codec::{RequestDecoder, ResponseEncoder};
use crate::handler::{Handler, HandlerError, dispatch};
use crate::protocol::{HttpError, ParseError, Response, SendError};

/// Initial capacity of the read buffer
const READ_BUFFER_SIZE: usize = 8 * 1024;

/// A single-request HTTP connection.
///
/// `HttpConnection` reads one request, hands it to the handler and writes
/// exactly one response before shutting down its write half. A request that
/// fails to decode is answered with `400 Bad Request` and the handler is
/// never called.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    framed_write: FramedWrite<W, ResponseEncoder>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::new(), READ_BUFFER_SIZE),
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
        }
    }

    /// Serves the connection to completion.
    ///
    /// # Errors
    ///
    /// Returns the decode error after the `400` response has been written, or
    /// the I/O error that prevented writing the response.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler + ?Sized,
    {
        let request = match self.framed_read.next().await {
            Some(result) => result,
            None => Err(ParseError::incomplete_request("reading the request line")),
        };

        match request {
            Ok(request) => {
                info!(method = request.method(), target = request.target(), "dispatching request");
                let response = dispatch(handler.as_ref(), request);
                if !response.status().is_success() {
                    info!(status = %response.status(), "handler returned error");
                }
                self.send_response(response).await
            }
            Err(e) => {
                warn!(cause = %e, "can't decode request");
                let response = HandlerError::bad_request(e.to_string()).into_response();
                self.send_response(response).await?;
                Err(e.into())
            }
        }
    }

    async fn send_response(&mut self, response: Response) -> Result<(), HttpError> {
        // send flushes the encoded response to the underlying writer
        self.framed_write.send(response).await?;
        self.framed_write.get_mut().shutdown().await.map_err(SendError::io)?;
        debug!("response sent");
        Ok(())
    }
}
