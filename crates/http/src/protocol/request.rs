//! The parsed head of an inbound request.

use http::Method;

use crate::protocol::HeaderCollection;

/// A fully parsed request head: method, raw target, raw version token and
/// the accumulated headers. A `RequestHead` only exists once the blank line
/// ending the header section has been observed; from then on it is immutable
/// and ownership moves into dispatch.
///
/// The target and version are kept verbatim as they appeared on the request
/// line. Interpreting the target (path/query split, percent decoding) is a
/// concern of the layer above this engine.
#[derive(Debug)]
pub struct RequestHead {
    method: Method,
    target: String,
    version: String,
    headers: HeaderCollection,
}

impl RequestHead {
    pub(crate) fn new(method: Method, target: String, version: String, headers: HeaderCollection) -> Self {
        Self { method, target, version, headers }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The raw request target, e.g. `/index.html?a=1`.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// The raw protocol version token, e.g. `HTTP/1.1`.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn headers(&self) -> &HeaderCollection {
        &self.headers
    }

    pub fn into_headers(self) -> HeaderCollection {
        self.headers
    }
}
