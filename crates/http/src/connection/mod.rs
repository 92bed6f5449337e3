//! HTTP connection handling module
//!
//! # Components
//!
//! - [`RequestReader`]: the incremental-read driver. Reads from a byte source
//!   into a bounded scratch buffer and feeds the request decoder until a full
//!   request is parsed
//! - [`HttpConnection`]: reads one request, calls the handler and writes the
//!   response, then closes the connection

mod http_connection;
mod request_reader;

pub use http_connection::HttpConnection;
pub use request_reader::{DEFAULT_BUFFER_CAPACITY, RequestReader, request_from_reader};
