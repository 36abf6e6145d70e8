use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::trace;

use crate::protocol::body::{BodyConsumer, BodyProducer};

/// Creates the channel the engine uses to carry one request body.
///
/// The [`RequestBody`] travels to the handler with the request head; the
/// [`RequestBodySender`] stays with whatever drives body framing. The
/// channel is unbounded because the streaming contract has no flow control.
pub(crate) fn request_body_channel() -> (RequestBody, RequestBodySender) {
    let (sender, chunks) = mpsc::unbounded_channel();
    (RequestBody { chunks }, RequestBodySender { sender })
}

/// The handler's handle on an inbound request body.
///
/// The handler attaches a [`BodyConsumer`] of its choosing and awaits the
/// consumer's completion:
///
/// ```ignore
/// let (gatherer, done) = AccumulatingConsumer::new();
/// body.start_producing(gatherer).await;
/// let payload = done.await?;
/// ```
///
/// Where the body ends is the body-framing collaborator's concern; this
/// handle only guarantees the push contract is honored for whatever bytes
/// arrive before the sender closes.
#[derive(Debug)]
pub struct RequestBody {
    chunks: mpsc::UnboundedReceiver<Bytes>,
}

impl RequestBody {
    /// Drives `consumer` with every chunk of this body, then unregisters.
    ///
    /// Returns once the body is closed; the consumer's completion has fired
    /// by then.
    pub async fn start_producing<C: BodyConsumer>(self, mut consumer: C) {
        self.produce(&mut consumer).await;
    }

    async fn produce(mut self, consumer: &mut dyn BodyConsumer) {
        consumer.register_producer(true);
        while let Some(chunk) = self.chunks.recv().await {
            consumer.write(chunk);
        }
        consumer.unregister_producer();
    }
}

/// A request body is itself a valid body producer, so a handler can stream
/// an inbound body straight back out as a response body.
#[async_trait]
impl BodyProducer for RequestBody {
    async fn start_producing(self: Box<Self>, mut consumer: Box<dyn BodyConsumer>) {
        self.produce(consumer.as_mut()).await;
    }
}

/// The driving end of a request body, owned by the body-framing layer.
///
/// Dropping the sender closes the body; consumers attached on the other side
/// then complete with whatever was pushed so far.
#[derive(Debug)]
pub struct RequestBodySender {
    sender: mpsc::UnboundedSender<Bytes>,
}

impl RequestBodySender {
    /// Pushes one chunk of body bytes. Chunks past the point where the
    /// receiving side was dropped are discarded.
    pub fn send(&self, chunk: Bytes) {
        if self.sender.send(chunk).is_err() {
            trace!("request body receiver dropped, chunk discarded");
        }
    }

    /// Closes the body.
    pub fn finish(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::body::{AccumulatingConsumer, DiscardingConsumer};

    #[tokio::test]
    async fn chunks_flow_from_sender_to_consumer() {
        let (body, sender) = request_body_channel();
        sender.send(Bytes::from_static(b"some "));
        sender.send(Bytes::from_static(b"test data"));
        sender.finish();

        let (gatherer, done) = AccumulatingConsumer::new();
        body.start_producing(gatherer).await;

        assert_eq!(done.await.unwrap(), Bytes::from_static(b"some test data"));
    }

    #[tokio::test]
    async fn closed_empty_body_completes_immediately() {
        let (body, sender) = request_body_channel();
        drop(sender);

        let (ignorer, done) = DiscardingConsumer::new();
        body.start_producing(ignorer).await;

        assert_eq!(done.await, Ok(()));
    }

    #[tokio::test]
    async fn request_body_echoes_as_producer() {
        let (body, sender) = request_body_channel();
        sender.send(Bytes::from_static(b"echo"));
        sender.finish();

        let (gatherer, done) = AccumulatingConsumer::new();
        let producer: Box<dyn BodyProducer> = Box::new(body);
        producer.start_producing(Box::new(gatherer)).await;

        assert_eq!(done.await.unwrap(), Bytes::from_static(b"echo"));
    }
}
