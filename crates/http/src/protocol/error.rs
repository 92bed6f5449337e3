use std::io;
use thiserror::Error;

use crate::protocol::ParserState;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed request line: {reason}")]
    MalformedRequestLine { reason: String },

    #[error("malformed header line: {reason}")]
    MalformedHeaderLine { reason: String },

    #[error("invalid header name: {name:?}")]
    InvalidHeaderToken { name: String },

    #[error("body truncated, expected {expected} bytes but stream ended after {received}")]
    TruncatedBody { expected: usize, received: usize },

    #[error("stream ended while request is still in {state:?} state")]
    Incomplete { state: ParserState },

    #[error("line size too large, current: {current_size} exceed the limit {max_size}")]
    TooLargeLine { current_size: usize, max_size: usize },

    #[error("request parser already failed")]
    Failed,

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_request_line<S: ToString>(str: S) -> Self {
        Self::MalformedRequestLine { reason: str.to_string() }
    }

    pub fn malformed_header_line<S: ToString>(str: S) -> Self {
        Self::MalformedHeaderLine { reason: str.to_string() }
    }

    pub fn invalid_header_token<S: ToString>(name: S) -> Self {
        Self::InvalidHeaderToken { name: name.to_string() }
    }

    pub fn truncated_body(expected: usize, received: usize) -> Self {
        Self::TruncatedBody { expected, received }
    }

    pub fn incomplete(state: ParserState) -> Self {
        Self::Incomplete { state }
    }

    pub fn too_large_line(current_size: usize, max_size: usize) -> Self {
        Self::TooLargeLine { current_size, max_size }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}
