use async_trait::async_trait;
use bytes::Bytes;

use crate::protocol::body::BodyConsumer;

/// The producer half of the streaming body capability.
///
/// A producer drives a consumer through the push contract: register in push
/// mode, write zero or more chunks, unregister once. Implementations decide
/// when chunks become available, which is what lets response bodies complete
/// asynchronously after the head has already been sent.
#[async_trait]
pub trait BodyProducer: Send {
    async fn start_producing(self: Box<Self>, consumer: Box<dyn BodyConsumer>);
}

/// A producer whose entire body is available up front, written as one chunk.
#[derive(Debug, Clone)]
pub struct FullBody {
    data: Bytes,
}

impl FullBody {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }
}

#[async_trait]
impl BodyProducer for FullBody {
    async fn start_producing(self: Box<Self>, mut consumer: Box<dyn BodyConsumer>) {
        consumer.register_producer(true);
        if !self.data.is_empty() {
            consumer.write(self.data);
        }
        consumer.unregister_producer();
    }
}

/// A producer with no body at all: registers and immediately unregisters.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyBody;

#[async_trait]
impl BodyProducer for EmptyBody {
    async fn start_producing(self: Box<Self>, mut consumer: Box<dyn BodyConsumer>) {
        consumer.register_producer(true);
        consumer.unregister_producer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::body::AccumulatingConsumer;

    #[tokio::test]
    async fn full_body_writes_once_then_completes() {
        let (consumer, done) = AccumulatingConsumer::new();

        Box::new(FullBody::new("Hello World!")).start_producing(Box::new(consumer)).await;

        assert_eq!(done.await.unwrap(), Bytes::from_static(b"Hello World!"));
    }

    #[tokio::test]
    async fn empty_body_completes_with_nothing() {
        let (consumer, done) = AccumulatingConsumer::new();

        Box::new(EmptyBody).start_producing(Box::new(consumer)).await;

        assert_eq!(done.await.unwrap(), Bytes::new());
    }
}
