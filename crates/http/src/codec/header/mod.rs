//! HTTP header processing for both directions
//!
//! - [`HeaderProgress`] / `Headers::parse`: incremental decoding of request
//!   header lines, tolerant of lines split across reads
//! - [`HeaderEncoder`]: serialization of a status line and header collection

mod header_decoder;
mod header_encoder;

pub use header_decoder::HeaderProgress;
pub(crate) use header_decoder::{CRLF, find_crlf, is_token};
pub use header_encoder::HeaderEncoder;
