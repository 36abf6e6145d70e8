//! Request handler traits and utilities.
//!
//! One handler capability is supplied at engine construction and invoked
//! once per parsed request head for the lifetime of the connection. The
//! handler answers through the [`Responder`] whenever it is ready; its
//! future resolving is the engine's only suspension point.

use std::error::Error;
use std::future::Future;

use async_trait::async_trait;

use crate::connection::Responder;
use crate::protocol::RequestHead;
use crate::protocol::body::RequestBody;

#[async_trait]
pub trait Handler: Send + Sync {
    type Error: Into<Box<dyn Error + Send + Sync>> + Send;

    /// Handles one request: the parsed head, the inbound body capability
    /// and the responder to answer through.
    async fn call(&self, head: RequestHead, body: RequestBody, responder: Responder) -> Result<(), Self::Error>;
}

/// Adapts a plain async function into a [`Handler`].
#[derive(Debug)]
pub struct HandlerFn<F> {
    f: F,
}

#[async_trait]
impl<Err, F, Fut> Handler for HandlerFn<F>
where
    F: Fn(RequestHead, RequestBody, Responder) -> Fut + Send + Sync,
    Err: Into<Box<dyn Error + Send + Sync>> + Send,
    Fut: Future<Output = Result<(), Err>> + Send,
{
    type Error = Err;

    async fn call(&self, head: RequestHead, body: RequestBody, responder: Responder) -> Result<(), Self::Error> {
        (self.f)(head, body, responder).await
    }
}

pub fn make_handler<F, Err, Ret>(f: F) -> HandlerFn<F>
where
    Err: Into<Box<dyn Error + Send + Sync>>,
    Ret: Future<Output = Result<(), Err>>,
    F: Fn(RequestHead, RequestBody, Responder) -> Ret,
{
    HandlerFn { f }
}
