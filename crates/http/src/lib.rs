//! An incremental HTTP/1.1 request parser with a minimal tokio server on top
//!
//! The heart of the crate is [`codec::RequestDecoder`], a state machine that
//! accepts request bytes in chunks of any size, split anywhere, and produces a
//! fully parsed [`protocol::Request`] exactly once. It never blocks: each
//! [`feed`](codec::RequestDecoder::feed) call either makes progress on the bytes
//! it is given or reports that it needs more.
//!
//! [`connection::RequestReader`] drives the decoder from any
//! [`tokio::io::AsyncRead`] through a bounded scratch buffer, and
//! [`server::Server`] accepts TCP connections, parses one request per
//! connection, calls a [`handler::Handler`] and writes its response back.
//!
//! # Example
//!
//! ```no_run
//! use std::convert::Infallible;
//! use stream_http::handler::make_handler;
//! use stream_http::protocol::{Request, Response};
//! use stream_http::server::Server;
//! use tracing::{Level, info};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
//!     tracing::subscriber::set_global_default(subscriber)?;
//!
//!     let handle = Server::builder().address("127.0.0.1:8080").build()?.serve(make_handler(hello_world)).await?;
//!
//!     tokio::signal::ctrl_c().await?;
//!     handle.close().await;
//!     info!("server stopped");
//!     Ok(())
//! }
//!
//! async fn hello_world(request: Request) -> Result<Response, Infallible> {
//!     info!(path = request.target(), "request received");
//!     Ok(Response::ok().with_body(&mime::TEXT_PLAIN, "Hello World!\r\n"))
//! }
//! ```
//!
//! # Architecture
//!
//! - [`protocol`]: headers, request, response and error types
//! - [`codec`]: request decoding and response encoding
//! - [`connection`]: the read driver and per-connection processing
//! - [`handler`]: the request handler trait
//! - [`server`]: TCP accept loop and graceful close
//!
//! # Limitations
//!
//! - HTTP/1.1 only, and only `content-length` framed request bodies
//! - One request per connection, no keep-alive or pipelining
//! - No TLS support
//! - A single request line or header line must fit in the read buffer
//!   (8 KiB by default)

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod server;

mod utils;
pub(crate) use utils::ensure;
