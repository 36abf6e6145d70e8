//! Wire-level encoding for outbound responses.
//!
//! Inbound framing is not here: request bytes are split into lines by the
//! line framer ([`tokio_util::codec::LinesCodec`]) and interpreted by
//! [`HeadParser`](crate::parser::HeadParser).

mod response_encoder;
pub use response_encoder::ResponseEncoder;
