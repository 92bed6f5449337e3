//! Request handlers.
//!
//! A [`Handler`] turns a parsed [`Request`] into a [`Response`]. Plain async
//! functions become handlers through [`make_handler`]:
//!
//! ```
//! use std::convert::Infallible;
//! use stream_http::handler::make_handler;
//! use stream_http::protocol::{Request, Response};
//!
//! async fn hello(_request: Request) -> Result<Response, Infallible> {
//!     Ok(Response::ok().with_body(&mime::TEXT_PLAIN, "Hello World!"))
//! }
//!
//! let handler = make_handler(hello);
//! # let _ = handler;
//! ```

use std::error::Error;
use std::future::Future;

use crate::protocol::{Request, Response};

#[trait_variant::make(Handler: Send)]
pub trait LocalHandler {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    async fn call(&self, request: Request) -> Result<Response, Self::Error>;
}

#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F, Fut, Err> Handler for HandlerFn<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Response, Err>> + Send,
    Err: Into<Box<dyn Error + Send + Sync>>,
{
    type Error = Err;

    async fn call(&self, request: Request) -> Result<Response, Self::Error> {
        (self.f)(request).await
    }
}

pub fn make_handler<F, Fut, Err>(f: F) -> HandlerFn<F>
where
    F: Fn(Request) -> Fut,
    Fut: Future<Output = Result<Response, Err>>,
    Err: Into<Box<dyn Error + Send + Sync>>,
{
    HandlerFn { f }
}
