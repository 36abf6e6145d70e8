//! Protocol types shared by the parser, the connection and handlers.
//!
//! # Architecture
//!
//! - **Headers** ([`headers`]): [`HeaderCollection`], the ordered,
//!   case-insensitive, multi-valued header map used on both sides
//!
//! - **Request side** ([`request`]): [`RequestHead`], the immutable result
//!   of head parsing
//!
//! - **Response side** ([`response`]): [`ResponseHead`] and [`Response`],
//!   with typed construction so a response can only be built from an actual
//!   header collection and an actual body producer
//!
//! - **Emission** ([`message`]): [`Message`] and [`PayloadItem`], the items
//!   that travel from responder to connection
//!
//! - **Body streaming** ([`body`]): the push producer/consumer capability
//!   with its single-shot completion contract
//!
//! - **Errors** ([`error`]): [`HttpError`], [`ParseError`] and [`SendError`]

mod message;
pub use message::Message;
pub use message::PayloadItem;

mod headers;
pub use headers::HeaderCollection;

mod request;
pub use request::RequestHead;

mod response;
pub use response::Response;
pub use response::ResponseHead;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;

pub mod body;
