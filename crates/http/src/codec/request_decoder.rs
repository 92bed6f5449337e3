//! HTTP request decoder module
//!
//! [`RequestDecoder`] is a re-entrant state machine fed with whatever bytes are
//! currently available. Each [`RequestDecoder::feed`] call consumes as much as it
//! can and reports how many bytes it took; the caller keeps the rest and feeds it
//! again together with newly read bytes.
//!
//! # State Machine
//!
//! ```text
//! Init --request line--> Headers --blank line--> Body --content-length bytes--> Done
//!   \                       \
//!    `--malformed--> Error   `--malformed--> Error
//! ```
//!
//! `Done` and `Error` are terminal. Feeding a done decoder is a no-op; feeding a
//! failed decoder fails again.
//!
//! # Example
//!
//! ```
//! use stream_http::codec::RequestDecoder;
//!
//! let mut decoder = RequestDecoder::new();
//! let data = b"GET / HTTP/1.1\r\nHost: localhost:42069\r\n\r\n";
//!
//! let consumed = decoder.feed(&data[..10]).unwrap();
//! assert_eq!(consumed, 0);
//!
//! let consumed = decoder.feed(data).unwrap();
//! assert_eq!(consumed, data.len());
//! assert!(decoder.is_done());
//!
//! let request = decoder.into_request().unwrap();
//! assert_eq!(request.method(), "GET");
//! ```

use bytes::BytesMut;
use tracing::trace;

use crate::codec::body::LengthDecoder;
use crate::codec::request_line_decoder::parse_request_line;
use crate::protocol::{Headers, ParseError, ParserState, Request, RequestLine};

/// Incremental decoder for a single HTTP/1.1 request.
///
/// The decoder owns the parts of the request built so far. Once
/// [`is_done`](Self::is_done) returns true the complete [`Request`] can be taken
/// with [`into_request`](Self::into_request).
#[derive(Debug)]
pub struct RequestDecoder {
    state: ParserState,
    request_line: Option<RequestLine>,
    headers: Headers,
    body_decoder: LengthDecoder,
    body: BytesMut,
}

impl RequestDecoder {
    /// Creates a decoder in the [`ParserState::Init`] state
    pub fn new() -> Self {
        Default::default()
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ParserState::Done
    }

    pub fn request_line(&self) -> Option<&RequestLine> {
        self.request_line.as_ref()
    }

    /// Headers decoded so far. Only complete once the decoder left the
    /// `Headers` state.
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Body bytes accumulated so far.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Declared body length and how much of it has been received.
    pub(crate) fn body_progress(&self) -> (usize, usize) {
        (self.body_decoder.expected(), self.body_decoder.received())
    }

    /// Advances the state machine over `src` and returns the number of bytes
    /// consumed from its start.
    ///
    /// Unconsumed bytes must be passed again, at the front of the next call's
    /// input. A return value smaller than `src.len()` means either that the
    /// decoder needs more bytes to finish the current line, or that it is done and
    /// the rest belongs to whatever follows the request.
    ///
    /// # Errors
    ///
    /// Any parse error moves the decoder to [`ParserState::Error`] and is
    /// returned as is. Every later call returns [`ParseError::Failed`].
    pub fn feed(&mut self, src: &[u8]) -> Result<usize, ParseError> {
        let mut read = 0;

        loop {
            let remaining = &src[read..];

            match self.state {
                ParserState::Error => return Err(ParseError::Failed),

                ParserState::Init => match parse_request_line(remaining) {
                    Ok(Some((request_line, n))) => {
                        trace!(method = request_line.method(), path = request_line.request_target(), "parsed request line");
                        self.request_line = Some(request_line);
                        self.state = ParserState::Headers;
                        read += n;
                    }
                    Ok(None) => break,
                    Err(e) => return Err(self.fail(e)),
                },

                ParserState::Headers => match self.headers.parse(remaining) {
                    Ok(progress) => {
                        if progress.consumed == 0 {
                            break;
                        }
                        read += progress.consumed;
                        if progress.finished {
                            self.body_decoder = LengthDecoder::new(self.headers.content_length());
                            self.body_decoder.reserve(&mut self.body);
                            self.state = ParserState::Body;
                            trace!(content_length = self.body_decoder.expected(), "header section finished");
                        }
                    }
                    Err(e) => return Err(self.fail(e)),
                },

                ParserState::Body => {
                    let n = self.body_decoder.decode(remaining, &mut self.body);
                    read += n;
                    if self.body_decoder.is_finished() {
                        self.state = ParserState::Done;
                        trace!(body_size = self.body.len(), "request finished");
                    } else if n == 0 {
                        break;
                    }
                }

                ParserState::Done => break,
            }
        }

        Ok(read)
    }

    /// Takes the parsed request out of a decoder in the `Done` state.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Incomplete`] carrying the current state when the
    /// decoder has not finished.
    pub fn into_request(self) -> Result<Request, ParseError> {
        match (self.state, self.request_line) {
            (ParserState::Done, Some(request_line)) => Ok(Request::new(request_line, self.headers, self.body.freeze())),
            (state, _) => Err(ParseError::incomplete(state)),
        }
    }

    fn fail(&mut self, e: ParseError) -> ParseError {
        trace!(state = ?self.state, cause = %e, "request parsing failed");
        self.state = ParserState::Error;
        e
    }
}

impl Default for RequestDecoder {
    fn default() -> Self {
        Self {
            state: ParserState::Init,
            request_line: None,
            headers: Headers::new(),
            body_decoder: LengthDecoder::new(0),
            body: BytesMut::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn crlf(str: &str) -> String {
        str.replace('\n', "\r\n")
    }

    #[test]
    fn from_curl() {
        let str = crlf(indoc! {r##"
        GET /index.html HTTP/1.1
        Host: 127.0.0.1:8080
        User-Agent: curl/7.79.1
        Accept: */*

        "##});

        let mut decoder = RequestDecoder::new();
        let consumed = decoder.feed(str.as_bytes()).unwrap();

        assert_eq!(consumed, str.len());
        assert!(decoder.is_done());

        let request = decoder.into_request().unwrap();
        assert_eq!(request.method(), "GET");
        assert_eq!(request.target(), "/index.html");
        assert_eq!(request.request_line().http_version(), "1.1");
        assert_eq!(request.headers().len(), 3);
        assert_eq!(request.headers().get("host"), Some("127.0.0.1:8080"));
        assert_eq!(request.headers().get("user-agent"), Some("curl/7.79.1"));
        assert_eq!(request.headers().get("accept"), Some("*/*"));
        assert!(request.body().is_empty());
    }

    #[test]
    fn from_edge() {
        let str = crlf(indoc! {r##"
        GET /index/?a=1&b=2&a=3 HTTP/1.1
        Host: 127.0.0.1:8080
        Connection: keep-alive
        Cache-Control: max-age=0
        sec-ch-ua: "#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109"
        sec-ch-ua-mobile: ?0
        sec-ch-ua-platform: "macOS"
        Upgrade-Insecure-Requests: 1
        User-Agent: Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/109.0.0.0 Safari/537.36 Edg/109.0.1518.52
        Accept: text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9
        Sec-Fetch-Site: none
        Sec-Fetch-Mode: navigate
        Sec-Fetch-User: ?1
        Sec-Fetch-Dest: document
        Accept-Encoding: gzip, deflate, br
        Accept-Language: zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7

        "##});

        let mut decoder = RequestDecoder::new();
        decoder.feed(str.as_bytes()).unwrap();
        let request = decoder.into_request().unwrap();

        assert_eq!(request.target(), "/index/?a=1&b=2&a=3");
        assert_eq!(request.headers().len(), 15);
        assert_eq!(request.headers().get("connection"), Some("keep-alive"));
        assert_eq!(request.headers().get("sec-ch-ua"), Some(r##""#Not_A Brand";v="99", "Microsoft Edge";v="109", "Chromium";v="109""##));
        assert_eq!(request.headers().get("sec-ch-ua-platform"), Some("\"macOS\""));
        assert_eq!(request.headers().get("Accept-Encoding"), Some("gzip, deflate, br"));
    }

    #[test]
    fn waits_for_complete_request_line() {
        let mut decoder = RequestDecoder::new();

        assert_eq!(decoder.feed(b"GET / HT").unwrap(), 0);
        assert_eq!(decoder.state(), ParserState::Init);

        assert_eq!(decoder.feed(b"GET / HTTP/1.1\r\nHost: loc").unwrap(), 16);
        assert_eq!(decoder.state(), ParserState::Headers);
        assert_eq!(decoder.request_line().map(RequestLine::method), Some("GET"));
    }

    #[test]
    fn body_with_content_length() {
        let data = b"POST /submit HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 13\r\n\r\nhello world!\n";

        let mut decoder = RequestDecoder::new();
        let consumed = decoder.feed(data).unwrap();

        assert_eq!(consumed, data.len());
        let request = decoder.into_request().unwrap();
        assert_eq!(&request.body()[..], b"hello world!\n");
    }

    #[test]
    fn body_arrives_in_pieces() {
        let head = b"POST /submit HTTP/1.1\r\nContent-Length: 13\r\n\r\n";
        let mut decoder = RequestDecoder::new();

        assert_eq!(decoder.feed(head).unwrap(), head.len());
        assert_eq!(decoder.state(), ParserState::Body);

        assert_eq!(decoder.feed(b"hello ").unwrap(), 6);
        assert_eq!(decoder.body(), b"hello ");
        assert_eq!(decoder.body_progress(), (13, 6));

        assert_eq!(decoder.feed(b"").unwrap(), 0);
        assert_eq!(decoder.state(), ParserState::Body);

        assert_eq!(decoder.feed(b"world!\n").unwrap(), 7);
        assert!(decoder.is_done());
    }

    #[test]
    fn never_reads_past_content_length() {
        let data = b"POST / HTTP/1.1\r\nContent-Length: 5\r\n\r\nhelloGET / HTTP/1.1\r\n";
        let mut decoder = RequestDecoder::new();

        let consumed = decoder.feed(data).unwrap();

        assert_eq!(&data[consumed..], b"GET / HTTP/1.1\r\n");
        assert_eq!(&decoder.into_request().unwrap().body()[..], b"hello");
    }

    #[test]
    fn zero_or_missing_content_length_finishes_immediately() {
        for data in [&b"POST / HTTP/1.1\r\nContent-Length: 0\r\n\r\n"[..], b"POST / HTTP/1.1\r\n\r\n", b"POST / HTTP/1.1\r\nContent-Length: nope\r\n\r\n"] {
            let mut decoder = RequestDecoder::new();

            let consumed = decoder.feed(data).unwrap();

            assert_eq!(consumed, data.len());
            assert!(decoder.is_done());
            assert!(decoder.body().is_empty());
        }
    }

    #[test]
    fn zero_content_length_leaves_trailing_bytes() {
        let data = b"GET / HTTP/1.1\r\n\r\nextra";
        let mut decoder = RequestDecoder::new();

        let consumed = decoder.feed(data).unwrap();

        assert_eq!(consumed, data.len() - 5);
        assert!(decoder.body().is_empty());
    }

    #[test]
    fn done_is_idempotent() {
        let mut decoder = RequestDecoder::new();
        decoder.feed(b"GET / HTTP/1.1\r\n\r\n").unwrap();

        assert_eq!(decoder.feed(b"GET / HTTP/1.1\r\n\r\n").unwrap(), 0);
        assert_eq!(decoder.feed(b"").unwrap(), 0);
        assert!(decoder.is_done());
    }

    #[test]
    fn malformed_request_line_is_terminal() {
        let mut decoder = RequestDecoder::new();

        let result = decoder.feed(b"/coffee HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(ParseError::MalformedRequestLine { .. })));
        assert_eq!(decoder.state(), ParserState::Error);

        let result = decoder.feed(b"GET / HTTP/1.1\r\n\r\n");
        assert!(matches!(result, Err(ParseError::Failed)));
        assert_eq!(decoder.state(), ParserState::Error);
    }

    #[test]
    fn malformed_header_is_terminal() {
        let mut decoder = RequestDecoder::new();

        let result = decoder.feed(b"GET / HTTP/1.1\r\nHost localhost\r\n\r\n");

        assert!(matches!(result, Err(ParseError::MalformedHeaderLine { .. })));
        assert_eq!(decoder.state(), ParserState::Error);
        assert!(matches!(decoder.into_request(), Err(ParseError::Incomplete { state: ParserState::Error })));
    }

    #[test]
    fn invalid_header_keeps_earlier_fields() {
        let mut decoder = RequestDecoder::new();
        decoder.feed(b"GET / HTTP/1.1\r\nHost: localhost\r\n").unwrap();

        let result = decoder.feed("Accept: */*\r\nH©st: x\r\n\r\n".as_bytes());

        assert!(matches!(result, Err(ParseError::InvalidHeaderToken { .. })));
        assert_eq!(decoder.headers().get("host"), Some("localhost"));
        assert!(!decoder.headers().contains("accept"));
    }

    #[test]
    fn into_request_before_done() {
        let mut decoder = RequestDecoder::new();
        decoder.feed(b"GET / HTTP/1.1\r\n").unwrap();

        assert!(matches!(decoder.into_request(), Err(ParseError::Incomplete { state: ParserState::Headers })));
    }

    #[test]
    fn single_feed_matches_byte_by_byte() {
        let data = b"PUT /items/7 HTTP/1.1\r\nHost: a\r\nHost: b\r\nContent-Length: 11\r\n\r\n{\"id\": 777}";

        let mut whole = RequestDecoder::new();
        assert_eq!(whole.feed(data).unwrap(), data.len());
        let expected = whole.into_request().unwrap();

        // emulate the driver: keep unconsumed bytes and append one new byte per call
        let mut decoder = RequestDecoder::new();
        let mut pending = Vec::new();
        for byte in data {
            pending.push(*byte);
            let consumed = decoder.feed(&pending).unwrap();
            pending.drain(..consumed);
        }

        assert!(pending.is_empty());
        let request = decoder.into_request().unwrap();
        assert_eq!(request, expected);
        assert_eq!(request.headers().get("host"), Some("a, b"));
    }
}
