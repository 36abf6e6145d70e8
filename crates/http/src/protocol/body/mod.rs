//! The push-based streaming body capability.
//!
//! Bodies move through a producer/consumer pairing with a single-shot
//! completion notification:
//!
//! - a [`BodyConsumer`] accepts zero or more [`write`](BodyConsumer::write)
//!   calls followed by exactly one
//!   [`unregister_producer`](BodyConsumer::unregister_producer), which fires
//!   its completion exactly once
//! - a [`BodyProducer`] drives a consumer through that sequence
//! - [`RequestBody`] / [`RequestBodySender`] form the channel the engine uses
//!   to hand an inbound body to the handler
//!
//! Only push-mode producers exist; there is no pull protocol and no flow
//! control. Producers are never throttled by consumers, which is acceptable
//! for the bounded-size bodies this engine is meant for.

mod channel;
mod consumer;
mod producer;

pub use channel::RequestBody;
pub use channel::RequestBodySender;
pub(crate) use channel::request_body_channel;
pub use consumer::AccumulatingConsumer;
pub use consumer::BodyConsumer;
pub use consumer::Completion;
pub use consumer::DiscardingConsumer;
pub use producer::BodyProducer;
pub use producer::EmptyBody;
pub use producer::FullBody;
