//! HTTP codec module for decoding requests and encoding responses
//!
//! # Architecture
//!
//! - Request handling:
//!   - [`RequestDecoder`]: re-entrant state machine over arbitrary byte chunks
//!   - Header lines via `Headers::parse`
//!   - Request line via the request-line decoder
//!   - Body via [`LengthDecoder`], driven by `content-length`
//!
//! - Response handling:
//!   - [`ResponseEncoder`]: status line, headers and body, used through
//!     `tokio_util::codec::FramedWrite`
//!   - [`HeaderEncoder`]: status line and header section only
//!
//! # Example
//!
//! ```
//! use bytes::BytesMut;
//! use stream_http::codec::{RequestDecoder, ResponseEncoder};
//! use stream_http::protocol::Response;
//! use tokio_util::codec::Encoder;
//!
//! let mut decoder = RequestDecoder::new();
//! decoder.feed(b"GET /coffee HTTP/1.1\r\n\r\n").unwrap();
//! assert!(decoder.is_done());
//!
//! let mut encoder = ResponseEncoder::new();
//! let mut dst = BytesMut::new();
//! encoder.encode(Response::ok(), &mut dst).unwrap();
//! assert!(dst.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

mod body;
mod header;
mod request_decoder;
mod request_line_decoder;
mod response_encoder;

pub use body::LengthDecoder;
pub use header::{HeaderEncoder, HeaderProgress};
pub use request_decoder::RequestDecoder;
pub use response_encoder::ResponseEncoder;
