//! Decoder for request bodies whose size is given by the `content-length` header.
//!
//! See [RFC 9112 Section 6.2](https://www.rfc-editor.org/rfc/rfc9112#section-6.2).

use std::cmp;

use bytes::{BufMut, BytesMut};

/// Upper bound on the up-front reservation made for a body.
const MAX_INITIAL_RESERVE: usize = 8 * 1024;

/// Copies exactly `content-length` bytes into a body buffer, never more.
///
/// Bytes past the declared length are left unconsumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// Total declared length
    expected: usize,
    /// The number of bytes remaining to be read from the payload
    remaining: usize,
}

impl LengthDecoder {
    pub fn new(length: usize) -> Self {
        Self { expected: length, remaining: length }
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn received(&self) -> usize {
        self.expected - self.remaining
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Reserves room in `dst` for the body, capped so a bogus length cannot force
    /// a huge allocation before any byte has arrived.
    pub fn reserve(&self, dst: &mut BytesMut) {
        dst.reserve(cmp::min(self.remaining, MAX_INITIAL_RESERVE));
    }

    /// Appends up to the remaining length of `src` to `dst` and returns how many
    /// bytes were taken.
    pub fn decode(&mut self, src: &[u8], dst: &mut BytesMut) -> usize {
        let len = cmp::min(self.remaining, src.len());
        dst.put_slice(&src[..len]);
        self.remaining -= len;
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        let src = b"101234567890abcdef\r\n\r\n";
        let mut body = BytesMut::new();

        let mut length_decoder = LengthDecoder::new(10);
        let read = length_decoder.decode(src, &mut body);

        assert_eq!(read, 10);
        assert!(length_decoder.is_finished());
        assert_eq!(&body[..], b"1012345678");
        assert_eq!(&src[read..], b"90abcdef\r\n\r\n");
    }

    #[test]
    fn accumulates_across_calls() {
        let mut body = BytesMut::new();
        let mut length_decoder = LengthDecoder::new(13);

        assert_eq!(length_decoder.decode(b"hello", &mut body), 5);
        assert_eq!(length_decoder.decode(b"", &mut body), 0);
        assert_eq!(length_decoder.received(), 5);
        assert!(!length_decoder.is_finished());

        assert_eq!(length_decoder.decode(b" world!\nGET", &mut body), 8);
        assert!(length_decoder.is_finished());
        assert_eq!(length_decoder.expected(), 13);
        assert_eq!(&body[..], b"hello world!\n");
    }

    #[test]
    fn zero_length_is_finished() {
        let mut body = BytesMut::new();
        let mut length_decoder = LengthDecoder::new(0);

        assert!(length_decoder.is_finished());
        assert_eq!(length_decoder.decode(b"abc", &mut body), 0);
        assert!(body.is_empty());
    }
}
