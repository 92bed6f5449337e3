//! HTTP response handed from a handler to the response encoder.

use bytes::Bytes;
use http::{StatusCode, header};
use mime::Mime;

use crate::protocol::Headers;

/// A status code, a header collection and a complete body.
///
/// The encoder always rewrites `content-length` to the length of `body`, so
/// handlers only need to care about the remaining fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: StatusCode,
    headers: Headers,
    body: Bytes,
}

impl Response {
    /// A response with the default headers and no body.
    pub fn new(status: StatusCode) -> Self {
        Self { status, headers: Headers::default_response(0), body: Bytes::new() }
    }

    pub fn ok() -> Self {
        Self::new(StatusCode::OK)
    }

    /// Sent when a request could not be parsed.
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST)
    }

    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Attaches `body` and updates `content-type` and `content-length` to match.
    #[must_use]
    pub fn with_body(mut self, content_type: &Mime, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self.headers.replace(header::CONTENT_TYPE.as_str(), content_type.to_string());
        self.headers.replace(header::CONTENT_LENGTH.as_str(), self.body.len().to_string());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut Headers {
        &mut self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_parts(self) -> (StatusCode, Headers, Bytes) {
        (self.status, self.headers, self.body)
    }
}
