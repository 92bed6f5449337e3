//! Request-line decoder.
//!
//! Accepts exactly `method SP request-target SP HTTP/1.1 CRLF`. Any other token
//! count, an empty or non-token method, or a version other than `HTTP/1.1` is a
//! [`ParseError::MalformedRequestLine`].

use crate::codec::header::{CRLF, find_crlf, is_token};
use crate::ensure;
use crate::protocol::{ParseError, RequestLine};

const SUPPORTED_VERSION: &[u8] = b"1.1";

/// Decodes the request line at the start of `src`.
///
/// Returns `Ok(None)` when no complete line is available yet, otherwise the
/// parsed line together with the number of bytes it occupied, terminator
/// included.
pub(crate) fn parse_request_line(src: &[u8]) -> Result<Option<(RequestLine, usize)>, ParseError> {
    let Some(index) = find_crlf(src) else {
        return Ok(None);
    };

    let line = &src[..index];
    let parts: Vec<&[u8]> = line.split(|b| *b == b' ').collect();
    let [method, target, version] = parts[..] else {
        return Err(ParseError::malformed_request_line(format!("expected 3 parts, found {}", parts.len())));
    };

    ensure!(is_token(method), ParseError::malformed_request_line("method is not a token"));
    ensure!(!target.is_empty(), ParseError::malformed_request_line("empty request target"));

    let version_parts: Vec<&[u8]> = version.split(|b| *b == b'/').collect();
    let [b"HTTP", number] = version_parts[..] else {
        return Err(ParseError::malformed_request_line(format!("unsupported http version {}", String::from_utf8_lossy(version))));
    };
    ensure!(
        number == SUPPORTED_VERSION,
        ParseError::malformed_request_line(format!("unsupported http version {}", String::from_utf8_lossy(version)))
    );

    let target = std::str::from_utf8(target).map_err(|e| ParseError::malformed_request_line(format!("request target: {e}")))?;

    let request_line = RequestLine::new(String::from_utf8_lossy(method), target, String::from_utf8_lossy(number));
    Ok(Some((request_line, index + CRLF.len())))
}
