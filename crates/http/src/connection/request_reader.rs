//! Incremental-read driver for [`RequestDecoder`].
//!
//! Reads from the byte source into a bounded scratch buffer, feeds everything
//! buffered to the decoder, drops the consumed prefix and repeats until the
//! decoder is done. Reads may return any number of bytes, so lines, headers and
//! the body can be split at any point.
//!
//! The scratch buffer never holds more than its capacity. Bodies stream through
//! it, but a single request line or header line must fit; one that does not is
//! reported as [`ParseError::TooLargeLine`].

use bytes::{Buf, BufMut, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

use crate::codec::RequestDecoder;
use crate::ensure;
use crate::protocol::{ParseError, ParserState, Request};

/// Default scratch buffer capacity in bytes
pub const DEFAULT_BUFFER_CAPACITY: usize = 8 * 1024;

/// Reads one request at a time from an [`AsyncRead`] source.
#[derive(Debug)]
pub struct RequestReader<R> {
    reader: R,
    capacity: usize,
}

impl<R> RequestReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_BUFFER_CAPACITY)
    }

    /// Uses a scratch buffer of `capacity` bytes, at least one.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self { reader, capacity: capacity.max(1) }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reads and parses a complete request.
    ///
    /// # Errors
    ///
    /// - parse errors from the decoder
    /// - [`ParseError::TruncatedBody`] when the source ends before the declared
    ///   body length has arrived
    /// - [`ParseError::Incomplete`] when it ends before the header section does
    /// - [`ParseError::TooLargeLine`] when a line does not fit in the buffer
    /// - [`ParseError::Io`] for any read failure, timeouts included
    pub async fn read_request(&mut self) -> Result<Request, ParseError> {
        let mut decoder = RequestDecoder::new();
        self.drive(&mut decoder).await?;
        decoder.into_request()
    }

    /// Feeds `decoder` from the source until it reports done.
    ///
    /// Bytes that arrive after the end of the request are discarded when this
    /// returns.
    pub async fn drive(&mut self, decoder: &mut RequestDecoder) -> Result<(), ParseError> {
        let mut buf = BytesMut::with_capacity(self.capacity);

        while !decoder.is_done() {
            // a full buffer here means the decoder could not make progress on it
            ensure!(buf.len() < self.capacity, ParseError::too_large_line(buf.len(), self.capacity));

            let room = self.capacity - buf.len();
            let read = self.reader.read_buf(&mut (&mut buf).limit(room)).await?;
            if read == 0 {
                return Err(eof_error(decoder));
            }

            let consumed = decoder.feed(&buf)?;
            buf.advance(consumed);
            trace!(read, consumed, buffered = buf.len(), state = ?decoder.state(), "fed request decoder");
        }

        if !buf.is_empty() {
            trace!(remaining = buf.len(), "discard bytes after request end");
        }
        Ok(())
    }
}

/// Reads a single request from `reader` with the default buffer capacity.
pub async fn request_from_reader<R>(reader: R) -> Result<Request, ParseError>
where
    R: AsyncRead + Unpin,
{
    RequestReader::new(reader).read_request().await
}

fn eof_error(decoder: &RequestDecoder) -> ParseError {
    match decoder.state() {
        ParserState::Body => {
            let (expected, received) = decoder.body_progress();
            ParseError::truncated_body(expected, received)
        }
        state => ParseError::incomplete(state),
    }
}
