//! HTTP request representation produced by the request decoder.

use bytes::Bytes;

use crate::protocol::Headers;

/// The first line of a request: `method SP request-target SP HTTP/1.1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    method: String,
    request_target: String,
    http_version: String,
}

impl RequestLine {
    pub fn new(method: impl Into<String>, request_target: impl Into<String>, http_version: impl Into<String>) -> Self {
        Self { method: method.into(), request_target: request_target.into(), http_version: http_version.into() }
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// The opaque path and query exactly as sent.
    pub fn request_target(&self) -> &str {
        &self.request_target
    }

    /// The version number without the `HTTP/` prefix, always `1.1`.
    pub fn http_version(&self) -> &str {
        &self.http_version
    }
}

/// Progress of a request through the decoder.
///
/// `Done` and `Error` are terminal: once reached, the decoder never moves again.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParserState {
    /// Waiting for a complete request line
    Init,
    /// Consuming header lines until the blank terminator
    Headers,
    /// Accumulating `content-length` bytes of body
    Body,
    /// A complete request has been parsed
    Done,
    /// Parsing failed, every further feed fails
    Error,
}

/// A fully parsed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    request_line: RequestLine,
    headers: Headers,
    body: Bytes,
}

impl Request {
    pub fn new(request_line: RequestLine, headers: Headers, body: Bytes) -> Self {
        Self { request_line, headers, body }
    }

    pub fn request_line(&self) -> &RequestLine {
        &self.request_line
    }

    pub fn method(&self) -> &str {
        self.request_line.method()
    }

    pub fn target(&self) -> &str {
        self.request_line.request_target()
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_parts(self) -> (RequestLine, Headers, Bytes) {
        (self.request_line, self.headers, self.body)
    }
}
