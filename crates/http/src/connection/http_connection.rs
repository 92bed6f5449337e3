use std::error::Error;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use futures::SinkExt;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::FramedWrite;
use tracing::{error, info};

use crate::codec::ResponseEncoder;
use crate::connection::{DEFAULT_BUFFER_CAPACITY, RequestReader};
use crate::handler::Handler;
use crate::protocol::{HttpError, ParseError, Request, Response};

/// A single-request HTTP connection
///
/// `HttpConnection` reads one request, hands it to a [`Handler`], writes the
/// response and closes the write side. Connections are never kept alive.
///
/// - a request that fails to parse is answered with `400 Bad Request`
/// - a handler error is answered with `500 Internal Server Error`
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    request_reader: RequestReader<R>,
    framed_write: FramedWrite<W, ResponseEncoder>,
    read_timeout: Option<Duration>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_capacity(reader, writer, DEFAULT_BUFFER_CAPACITY)
    }

    /// Uses a read scratch buffer of `capacity` bytes.
    pub fn with_capacity(reader: R, writer: W, capacity: usize) -> Self {
        Self {
            request_reader: RequestReader::with_capacity(reader, capacity),
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
            read_timeout: None,
        }
    }

    /// Fails the request with a timed out io error if it is not fully read
    /// within `timeout`.
    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Handles the request on this connection.
    ///
    /// # Errors
    ///
    /// Returns the parse error after the `400` response has been written, or the
    /// write error if the response could not be sent.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let request = match self.read_request().await {
            Ok(request) => request,
            Err(e) => {
                error!(cause = %e, "can't receive request");
                self.send_response(Response::bad_request()).await?;
                return Err(e.into());
            }
        };

        info!(method = request.method(), path = request.target(), "received request");

        let response = match handler.call(request).await {
            Ok(response) => response,
            Err(e) => {
                let e: Box<dyn Error + Send + Sync> = e.into();
                error!(cause = %e, "handle request error");
                Response::internal_server_error()
            }
        };

        self.send_response(response).await
    }

    async fn read_request(&mut self) -> Result<Request, ParseError> {
        let Some(timeout) = self.read_timeout else {
            return self.request_reader.read_request().await;
        };

        tokio::time::timeout(timeout, self.request_reader.read_request())
            .await
            .map_err(|elapsed| ParseError::io(io::Error::new(io::ErrorKind::TimedOut, elapsed)))?
    }

    async fn send_response(&mut self, response: Response) -> Result<(), HttpError> {
        // close flushes the encoded response and shuts the write side down
        self.framed_write.send(response).await?;
        self.framed_write.close().await?;
        Ok(())
    }
}
