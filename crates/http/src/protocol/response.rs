//! Outbound response types.

use http::StatusCode;

use crate::protocol::HeaderCollection;
use crate::protocol::body::BodyProducer;

/// The head of a response: status code, reason phrase and headers.
///
/// In the two-phase handshake this is what the handler hands to
/// [`Responder::send_head`](crate::connection::Responder::send_head), after
/// which it receives a writer for the body.
#[derive(Debug)]
pub struct ResponseHead {
    status: StatusCode,
    reason: String,
    headers: HeaderCollection,
}

impl ResponseHead {
    /// Creates a head with an empty header collection.
    pub fn new(status: StatusCode, reason: impl Into<String>) -> Self {
        Self::with_headers(status, reason, HeaderCollection::new())
    }

    pub fn with_headers(status: StatusCode, reason: impl Into<String>, headers: HeaderCollection) -> Self {
        Self { status, reason: reason.into(), headers }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn headers(&self) -> &HeaderCollection {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderCollection {
        &mut self.headers
    }
}

/// A complete response: a head plus a body producer.
///
/// Construction is typed end to end: `headers` must be a
/// [`HeaderCollection`] and `body` must implement [`BodyProducer`], so the
/// "headers is accidentally a plain map" and "body is not a producer"
/// integration bugs are compile errors rather than runtime surprises.
pub struct Response {
    head: ResponseHead,
    body: Box<dyn BodyProducer>,
}

impl Response {
    pub fn new(
        status: StatusCode,
        reason: impl Into<String>,
        headers: HeaderCollection,
        body: impl BodyProducer + 'static,
    ) -> Self {
        Self { head: ResponseHead::with_headers(status, reason, headers), body: Box::new(body) }
    }

    pub fn head(&self) -> &ResponseHead {
        &self.head
    }

    pub fn into_parts(self) -> (ResponseHead, Box<dyn BodyProducer>) {
        (self.head, self.body)
    }
}

impl std::fmt::Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response").field("head", &self.head).finish_non_exhaustive()
    }
}
