//! Header-line decoder for request header sections
//!
//! This module consumes `name: value\r\n` lines from a byte slice that may end in
//! the middle of a line. Only complete lines are consumed; a partial line is left
//! in place so the caller can retry once more bytes arrive.
//!
//! # Rules
//!
//! - A line is complete once its `\r\n` is present
//! - A `\r\n` at the start of the remaining bytes is the blank line that ends the
//!   header section
//! - The name is everything before the first `:`, with leading whitespace
//!   trimmed. Whitespace directly before the colon is rejected
//! - The name must be a non-empty token
//! - The value is everything after the colon with surrounding whitespace trimmed,
//!   and must be valid UTF-8
//!
//! A malformed line fails the whole call: none of the lines decoded during that
//! call are stored, fields stored by earlier calls stay untouched.

use tracing::trace;

use crate::ensure;
use crate::protocol::{Headers, ParseError};

/// Line terminator used by request lines and header lines.
pub(crate) const CRLF: &[u8] = b"\r\n";

/// Returns the offset of the first `\r\n` in `src`.
pub(crate) fn find_crlf(src: &[u8]) -> Option<usize> {
    src.windows(CRLF.len()).position(|window| window == CRLF)
}

/// Checks a byte against the field-name character class: ASCII letters, digits
/// and ``!#$%&'*+-.^_`|~``.
#[inline]
pub(crate) fn is_token_char(b: u8) -> bool {
    matches!(b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'^' | b'_' | b'`' | b'|' | b'~' | b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z'
    )
}

pub(crate) fn is_token(bytes: &[u8]) -> bool {
    !bytes.is_empty() && bytes.iter().copied().all(is_token_char)
}

/// Outcome of one [`Headers::parse`] call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HeaderProgress {
    /// Bytes consumed from the start of the input
    pub consumed: usize,
    /// Whether the blank line ending the header section was consumed
    pub finished: bool,
}

impl Headers {
    /// Consumes as many complete header lines from `src` as are present.
    ///
    /// Returns how many bytes were consumed and whether the terminating blank
    /// line was reached. Running out of bytes mid-line is not an error, the
    /// partial line is simply not consumed.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MalformedHeaderLine`] when a line has no colon, has
    ///   whitespace directly before it, or its value is not UTF-8
    /// - [`ParseError::InvalidHeaderToken`] when a field name is empty or holds a
    ///   character outside the token class
    ///
    /// On error nothing decoded by this call is stored.
    pub fn parse(&mut self, src: &[u8]) -> Result<HeaderProgress, ParseError> {
        let mut consumed = 0;
        let mut finished = false;
        let mut fields = Vec::new();

        while let Some(index) = find_crlf(&src[consumed..]) {
            if index == 0 {
                consumed += CRLF.len();
                finished = true;
                break;
            }

            let line = &src[consumed..consumed + index];
            fields.push(parse_field_line(line)?);
            consumed += index + CRLF.len();
        }

        trace!(consumed, finished, fields = fields.len(), "parsed header lines");
        for (name, value) in fields {
            self.set(&name, value);
        }

        Ok(HeaderProgress { consumed, finished })
    }
}

/// Splits one line (without its `\r\n`) into a validated name and a value.
fn parse_field_line(line: &[u8]) -> Result<(String, String), ParseError> {
    let colon = line.iter().position(|b| *b == b':').ok_or_else(|| ParseError::malformed_header_line("missing ':' separator"))?;

    let (raw_name, rest) = line.split_at(colon);
    let value = rest[1..].trim_ascii();

    ensure!(
        !raw_name.last().is_some_and(|b| matches!(b, b' ' | b'\t')),
        ParseError::malformed_header_line("whitespace between field name and ':'")
    );

    let name = raw_name.trim_ascii();
    ensure!(is_token(name), ParseError::invalid_header_token(String::from_utf8_lossy(name)));

    // a token is pure ASCII
    let name = String::from_utf8_lossy(name).into_owned();
    let value = String::from_utf8(value.to_vec()).map_err(|e| ParseError::malformed_header_line(format!("field value: {e}")))?;
    Ok((name, value))
}
