//! Connection lifecycle: line-framed reading, head dispatch and staged
//! response emission.

mod http_connection;
mod responder;

pub use http_connection::HttpConnection;
pub use http_connection::MAX_LINE_BYTES;
pub use responder::Responder;
pub use responder::ResponseBodyWriter;
