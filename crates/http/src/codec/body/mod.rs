//! Request body decoding.
//!
//! Only `content-length` framed bodies are supported; a request without the
//! header has an empty body.

mod length_decoder;

pub use length_decoder::LengthDecoder;
