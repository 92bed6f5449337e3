use bytes::{BufMut, BytesMut};
use http::header;
use tokio_util::codec::Encoder;

use crate::codec::header::HeaderEncoder;
use crate::protocol::{Response, SendError};

/// Serializes a complete [`Response`]: status line, headers, then body.
///
/// `content-length` is set to the actual body length before the headers are
/// written, whatever the handler put there.
#[derive(Debug, Default)]
pub struct ResponseEncoder {
    header_encoder: HeaderEncoder,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (status, mut headers, body) = item.into_parts();
        headers.replace(header::CONTENT_LENGTH.as_str(), body.len().to_string());

        self.header_encoder.encode((status, &headers), dst)?;
        dst.reserve(body.len());
        dst.put_slice(&body);
        Ok(())
    }
}
