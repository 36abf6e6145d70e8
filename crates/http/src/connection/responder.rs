//! The response side of the staged handshake.
//!
//! A handler answers through a [`Responder`]: whenever its head is ready it
//! calls [`Responder::send_head`], independently of how much of the request
//! body it has consumed, and receives a [`ResponseBodyWriter`] for the body.
//! The responder is consumed by that call, so a request gets exactly one
//! response head by construction.
//!
//! Emission items travel over an unbounded channel to the connection, which
//! drains them into the transport in order. The channel is unbounded
//! because the streaming contract has no flow control.

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::trace;

use crate::protocol::body::BodyConsumer;
use crate::protocol::{Message, PayloadItem, Response, ResponseHead};

pub(crate) type EmissionReceiver = mpsc::UnboundedReceiver<Message<ResponseHead>>;

/// The handler's capability to answer one request.
#[derive(Debug)]
pub struct Responder {
    emission: mpsc::UnboundedSender<Message<ResponseHead>>,
}

impl Responder {
    pub(crate) fn channel() -> (Responder, EmissionReceiver) {
        let (emission, receiver) = mpsc::unbounded_channel();
        (Responder { emission }, receiver)
    }

    /// Sends the response head and returns the writer for the body.
    ///
    /// Consuming `self` is what makes the head single-shot; the body is then
    /// produced chunk by chunk, finished by [`ResponseBodyWriter::finish`].
    pub fn send_head(self, head: ResponseHead) -> ResponseBodyWriter {
        if self.emission.send(Message::Header(head)).is_err() {
            trace!("connection gone before response head was sent");
        }
        ResponseBodyWriter { emission: self.emission, finished: false }
    }

    /// Single-call convenience over the two-phase handshake: sends the head,
    /// then drives the response's body producer into the body writer.
    pub async fn send(self, response: Response) {
        let (head, body) = response.into_parts();
        let writer = self.send_head(head);
        body.start_producing(Box::new(writer)).await;
    }
}

/// The producer handle for one outbound response body.
///
/// Write chunks in the order they should reach the wire, then call
/// [`finish`](Self::finish). Dropping the writer without finishing also
/// closes the body, so an abandoned response cannot wedge the connection.
#[derive(Debug)]
pub struct ResponseBodyWriter {
    emission: mpsc::UnboundedSender<Message<ResponseHead>>,
    finished: bool,
}

impl ResponseBodyWriter {
    /// Queues one chunk of body bytes for emission.
    pub fn write(&mut self, chunk: Bytes) {
        if self.emission.send(Message::Payload(PayloadItem::Chunk(chunk))).is_err() {
            trace!("connection gone, response chunk discarded");
        }
    }

    /// Closes the body. The connection becomes eligible for the next
    /// request head once the queued items have drained.
    pub fn finish(mut self) {
        if !self.finished {
            self.send_eof();
        }
    }

    fn send_eof(&mut self) {
        self.finished = true;
        if self.emission.send(Message::Payload(PayloadItem::Eof)).is_err() {
            trace!("connection gone before response body finished");
        }
    }
}

/// A response body writer satisfies the consumer capability, which is what
/// lets any [`BodyProducer`](crate::protocol::body::BodyProducer) serve as a
/// response body.
impl BodyConsumer for ResponseBodyWriter {
    fn register_producer(&mut self, streaming: bool) {
        assert!(streaming, "only push-mode producers are supported");
    }

    fn write(&mut self, chunk: Bytes) {
        ResponseBodyWriter::write(self, chunk);
    }

    fn unregister_producer(&mut self) {
        assert!(!self.finished, "unregister_producer called twice");
        self.send_eof();
    }
}

impl Drop for ResponseBodyWriter {
    fn drop(&mut self) {
        if !self.finished {
            self.send_eof();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HeaderCollection;
    use crate::protocol::body::FullBody;
    use http::StatusCode;

    fn drain(mut receiver: EmissionReceiver) -> Vec<Message<ResponseHead>> {
        let mut items = Vec::new();
        while let Ok(item) = receiver.try_recv() {
            items.push(item);
        }
        items
    }

    #[test]
    fn two_phase_emission_order() {
        let (responder, receiver) = Responder::channel();

        let mut writer = responder.send_head(ResponseHead::new(StatusCode::OK, "ok"));
        writer.write(Bytes::from_static(b"one"));
        writer.write(Bytes::from_static(b"two"));
        writer.finish();

        let items = drain(receiver);
        assert_eq!(items.len(), 4);
        assert!(items[0].is_header());
        assert_eq!(
            items[1..]
                .iter()
                .map(|m| match m {
                    Message::Payload(p) => p.clone(),
                    Message::Header(_) => panic!("unexpected second head"),
                })
                .collect::<Vec<_>>(),
            vec![
                PayloadItem::Chunk(Bytes::from_static(b"one")),
                PayloadItem::Chunk(Bytes::from_static(b"two")),
                PayloadItem::Eof
            ]
        );
    }

    #[test]
    fn dropped_writer_still_closes_the_body() {
        let (responder, receiver) = Responder::channel();

        let writer = responder.send_head(ResponseHead::new(StatusCode::OK, "ok"));
        drop(writer);

        let items = drain(receiver);
        assert_eq!(items.len(), 2);
        assert!(items[1].is_eof());
    }

    #[tokio::test]
    async fn single_call_send_stages_head_then_body() {
        let (responder, receiver) = Responder::channel();

        let response = Response::new(StatusCode::OK, "ok", HeaderCollection::new(), FullBody::new("payload"));
        responder.send(response).await;

        let items = drain(receiver);
        assert_eq!(items.len(), 3);
        assert!(items[0].is_header());
        assert!(matches!(&items[1], Message::Payload(PayloadItem::Chunk(b)) if &b[..] == b"payload"));
        assert!(items[2].is_eof());
    }

    #[test]
    fn dropped_responder_closes_emission_without_items() {
        let (responder, mut receiver) = Responder::channel();
        drop(responder);

        assert!(receiver.try_recv().is_err());
    }
}
