//! Status line and header section encoder for HTTP/1.1 responses
//!
//! Writes `HTTP/1.1 <code> <reason>\r\n`, one `name: value\r\n` per field and
//! the blank line that ends the header section. Field names are written in the
//! lower-cased form the [`Headers`] collection stores them in.

use std::io;
use std::io::Write;

use bytes::{BufMut, BytesMut};
use http::StatusCode;
use tokio_util::codec::Encoder;

use crate::protocol::{Headers, SendError};

/// Initial buffer size allocated for header serialization
const INIT_HEADER_SIZE: usize = 1024;

/// Encoder for a status code and its header collection.
#[derive(Debug, Default)]
pub struct HeaderEncoder;

impl Encoder<(StatusCode, &Headers)> for HeaderEncoder {
    type Error = SendError;

    /// Appends the status line and header section to `dst`.
    ///
    /// Status codes without a registered reason phrase are written with an
    /// empty reason, which is still a valid status line.
    fn encode(&mut self, item: (StatusCode, &Headers), dst: &mut BytesMut) -> Result<(), Self::Error> {
        let (status, headers) = item;

        dst.reserve(INIT_HEADER_SIZE);
        write!(FastWrite(dst), "HTTP/1.1 {} {}\r\n", status.as_str(), status.canonical_reason().unwrap_or_default())?;

        for (name, value) in headers.iter() {
            dst.put_slice(name.as_bytes());
            dst.put_slice(b": ");
            dst.put_slice(value.as_bytes());
            dst.put_slice(b"\r\n");
        }
        dst.put_slice(b"\r\n");
        Ok(())
    }
}

/// Writer adapter that appends straight into a `BytesMut`.
struct FastWrite<'a>(&'a mut BytesMut);

impl Write for FastWrite<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.put_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_default_headers() {
        let mut dst = BytesMut::new();
        let headers = Headers::default_response(0);

        HeaderEncoder.encode((StatusCode::BAD_REQUEST, &headers), &mut dst).unwrap();

        let expected = "HTTP/1.1 400 Bad Request\r\n\
                        connection: close\r\n\
                        content-length: 0\r\n\
                        content-type: text/plain\r\n\
                        \r\n";
        assert_eq!(&dst[..], expected.as_bytes());
    }

    #[test]
    fn encode_without_headers() {
        let mut dst = BytesMut::new();

        HeaderEncoder.encode((StatusCode::OK, &Headers::new()), &mut dst).unwrap();

        assert_eq!(&dst[..], b"HTTP/1.1 200 OK\r\n\r\n");
    }

    #[test]
    fn unregistered_status_has_empty_reason() {
        let mut dst = BytesMut::new();
        let status = StatusCode::from_u16(599).unwrap();

        HeaderEncoder.encode((status, &Headers::new()), &mut dst).unwrap();

        assert_eq!(&dst[..], b"HTTP/1.1 599 \r\n\r\n");
    }
}
