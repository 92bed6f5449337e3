//! TCP server that runs one [`HttpConnection`] per accepted socket.
//!
//! ```no_run
//! use std::convert::Infallible;
//! use stream_http::handler::make_handler;
//! use stream_http::protocol::{Request, Response};
//! use stream_http::server::Server;
//!
//! async fn hello(_request: Request) -> Result<Response, Infallible> {
//!     Ok(Response::ok().with_body(&mime::TEXT_PLAIN, "Hello World!"))
//! }
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let server = Server::builder().address("127.0.0.1:42069").build()?;
//! let handle = server.serve(make_handler(hello)).await?;
//! // ...
//! handle.close().await;
//! # Ok(())
//! # }
//! ```

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::connection::{DEFAULT_BUFFER_CAPACITY, HttpConnection};
use crate::handler::Handler;

#[derive(Debug)]
pub struct ServerBuilder {
    address: Option<io::Result<Vec<SocketAddr>>>,
    buffer_capacity: usize,
    read_timeout: Option<Duration>,
}

impl ServerBuilder {
    fn new() -> Self {
        Self { address: None, buffer_capacity: DEFAULT_BUFFER_CAPACITY, read_timeout: None }
    }

    /// Addresses to listen on; the first one that binds is used.
    #[must_use]
    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(Iterator::collect));
        self
    }

    /// Scratch buffer size used to read each request.
    #[must_use]
    pub fn buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    /// Deadline for reading a complete request on a connection.
    #[must_use]
    pub fn read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = Some(read_timeout);
        self
    }

    pub fn build(self) -> Result<Server, ServerBuildError> {
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?.map_err(|source| ServerBuildError::InvalidAddress { source })?;
        if address.is_empty() {
            return Err(ServerBuildError::MissingAddress);
        }
        if self.buffer_capacity == 0 {
            return Err(ServerBuildError::ZeroBufferCapacity);
        }

        Ok(Server { address, buffer_capacity: self.buffer_capacity, read_timeout: self.read_timeout })
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("address must be set")]
    MissingAddress,
    #[error("invalid address: {source}")]
    InvalidAddress { source: io::Error },
    #[error("buffer capacity must be greater than zero")]
    ZeroBufferCapacity,
}

#[derive(Debug, Clone)]
pub struct Server {
    address: Vec<SocketAddr>,
    buffer_capacity: usize,
    read_timeout: Option<Duration>,
}

impl Server {
    pub fn builder() -> ServerBuilder {
        ServerBuilder::new()
    }

    /// Binds the listener and starts accepting connections in the background.
    ///
    /// # Errors
    ///
    /// Returns the bind error if none of the configured addresses can be used.
    pub async fn serve<H>(self, handler: H) -> io::Result<ServerHandle>
    where
        H: Handler + Sync + 'static,
    {
        let tcp_listener = match TcpListener::bind(self.address.as_slice()).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return Err(e);
            }
        };
        let local_addr = tcp_listener.local_addr()?;
        info!(%local_addr, "start listening");

        let shutdown = CancellationToken::new();
        let task = tokio::spawn(self.accept_loop(tcp_listener, Arc::new(handler), shutdown.clone()));

        Ok(ServerHandle { local_addr, shutdown, task })
    }

    async fn accept_loop<H>(self, tcp_listener: TcpListener, handler: Arc<H>, shutdown: CancellationToken)
    where
        H: Handler + Sync + 'static,
    {
        loop {
            let accepted = tokio::select! {
                () = shutdown.cancelled() => {
                    info!("stop accepting connections");
                    return;
                }
                accepted = tcp_listener.accept() => accepted,
            };

            let (tcp_stream, remote_addr) = match accepted {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            };

            let handler = Arc::clone(&handler);
            let buffer_capacity = self.buffer_capacity;
            let read_timeout = self.read_timeout;

            tokio::spawn(async move {
                let (reader, writer) = tcp_stream.into_split();
                let mut connection = HttpConnection::with_capacity(reader, writer, buffer_capacity);
                if let Some(read_timeout) = read_timeout {
                    connection = connection.with_read_timeout(read_timeout);
                }

                match connection.process(handler).await {
                    Ok(()) => {
                        info!(%remote_addr, "finished process, connection shutdown");
                    }
                    Err(e) => {
                        error!(%remote_addr, cause = %e, "service has error, connection shutdown");
                    }
                }
            });
        }
    }
}

/// Running server returned by [`Server::serve`].
#[derive(Debug)]
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops accepting connections and waits for the accept loop to exit.
    ///
    /// Connections already accepted keep running until they finish.
    pub async fn close(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            error!(cause = %e, "accept loop ended abnormally");
        }
        info!(local_addr = %self.local_addr, "server closed");
    }
}
