//! Core HTTP protocol types.
//!
//! This module holds the data model shared by the codec and connection layers:
//!
//! - **Headers** ([`Headers`]): case-insensitive field collection that joins
//!   repeated fields with `", "`
//! - **Requests** ([`Request`], [`RequestLine`]): what the decoder produces, plus
//!   the decoder's [`ParserState`]
//! - **Responses** ([`Response`]): status, headers and body written back by a
//!   handler
//! - **Errors** ([`HttpError`], [`ParseError`], [`SendError`])

mod headers;
pub use headers::Headers;

mod request;
pub use request::ParserState;
pub use request::Request;
pub use request::RequestLine;

mod response;
pub use response::Response;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
