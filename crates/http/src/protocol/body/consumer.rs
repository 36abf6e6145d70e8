use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::RecvError;

/// The consumer half of the streaming body capability.
///
/// Contract, enforced with fatal assertions rather than recoverable errors:
///
/// - [`register_producer`](Self::register_producer) must be called with
///   `streaming == true`; only push-mode producers are supported
/// - [`write`](Self::write) may be called zero or more times
/// - [`unregister_producer`](Self::unregister_producer) must be called
///   exactly once, and fires the consumer's completion; a second call panics
pub trait BodyConsumer: Send {
    /// Announces the producer. `streaming` must be true: there is no
    /// pull/backpressure protocol.
    fn register_producer(&mut self, streaming: bool);

    /// Accepts a chunk of raw body bytes.
    fn write(&mut self, chunk: Bytes);

    /// Signals that no more data will arrive. Fires the one-shot completion.
    fn unregister_producer(&mut self);
}

/// The caller's side of a consumer's single-shot completion notification.
///
/// Resolves exactly once with the consumer's result, or with [`RecvError`]
/// when the consumer was dropped without ever being unregistered, which
/// makes abandonment observable instead of hanging the caller.
#[derive(Debug)]
pub struct Completion<T> {
    receiver: oneshot::Receiver<T>,
}

impl<T> Future for Completion<T> {
    type Output = Result<T, RecvError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver).poll(cx)
    }
}

/// A consumer that drops every chunk; its completion carries no payload.
#[derive(Debug)]
pub struct DiscardingConsumer {
    done: Option<oneshot::Sender<()>>,
}

impl DiscardingConsumer {
    pub fn new() -> (Self, Completion<()>) {
        let (done, receiver) = oneshot::channel();
        (Self { done: Some(done) }, Completion { receiver })
    }
}

impl BodyConsumer for DiscardingConsumer {
    fn register_producer(&mut self, streaming: bool) {
        assert!(streaming, "only push-mode producers are supported");
    }

    fn write(&mut self, _chunk: Bytes) {
        // discard data
    }

    fn unregister_producer(&mut self) {
        let done = self.done.take().expect("unregister_producer called twice");
        let _ = done.send(());
    }
}

/// A consumer that gathers every chunk into one buffer; its completion
/// carries the concatenated bytes.
#[derive(Debug)]
pub struct AccumulatingConsumer {
    buffer: BytesMut,
    done: Option<oneshot::Sender<Bytes>>,
}

impl AccumulatingConsumer {
    pub fn new() -> (Self, Completion<Bytes>) {
        let (done, receiver) = oneshot::channel();
        (Self { buffer: BytesMut::new(), done: Some(done) }, Completion { receiver })
    }
}

impl BodyConsumer for AccumulatingConsumer {
    fn register_producer(&mut self, streaming: bool) {
        assert!(streaming, "only push-mode producers are supported");
    }

    fn write(&mut self, chunk: Bytes) {
        self.buffer.extend_from_slice(&chunk);
    }

    fn unregister_producer(&mut self) {
        let done = self.done.take().expect("unregister_producer called twice");
        let _ = done.send(self.buffer.split().freeze());
    }
}
