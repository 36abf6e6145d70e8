use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use http::StatusCode;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::select;
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{error, info, warn};

use crate::codec::ResponseEncoder;
use crate::handler::Handler;
use crate::parser::HeadParser;
use crate::protocol::body::request_body_channel;
use crate::protocol::{HttpError, Message, ParseError, PayloadItem, RequestHead, ResponseHead};

use super::responder::{EmissionReceiver, Responder};

/// Maximum accepted line length, owned by the line framer.
pub const MAX_LINE_BYTES: usize = 8 * 1024;

/// A staged HTTP/1.x connection engine, bound 1:1 to one transport.
///
/// `HttpConnection` drives the full request lifecycle:
/// - framed lines feed the [`HeadParser`] until a head completes
/// - the head is dispatched to the handler together with a request body
///   handle and a [`Responder`]
/// - emission items from the responder are written out in order while the
///   handler runs, head first, body chunks after, one `Eof` last
/// - after `Eof` the connection is eligible for the next request head
///
/// Execution is single-task and cooperative: parsing, dispatch and emission
/// interleave through awaits on this connection's futures, never through
/// threads sharing the engine. The handler `Arc` is the only state shared
/// across connections.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, LinesCodec>,
    framed_write: FramedWrite<W, ResponseEncoder>,
    parser: HeadParser,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_BYTES)),
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
            parser: HeadParser::new(),
        }
    }

    /// Processes requests on this connection until the peer stops sending.
    ///
    /// Malformed heads are answered with a 400 without involving the
    /// handler; a handler failure is propagated to the caller unmapped, per
    /// the staging contract the connection owner decides whether that means
    /// a 5xx or a close.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        loop {
            match self.framed_read.next().await {
                Some(Ok(line)) => match self.parser.line_received(&line) {
                    Ok(Some(head)) => self.dispatch(head, &handler).await?,

                    Ok(None) => {}

                    Err(e) if e.is_rejection() => {
                        warn!("rejecting malformed head, cause {}", e);
                        self.send_bad_request().await?;
                    }

                    Err(e) => return Err(e.into()),
                },

                Some(Err(e)) => {
                    error!("can't read next line, cause {}", e);
                    self.send_bad_request().await?;
                    return Err(ParseError::from(e).into());
                }

                None => {
                    info!("cant read more request, break this connection down");
                    return Ok(());
                }
            }
        }
    }

    /// Invokes the handler for one parsed head and drains its emission.
    ///
    /// The handler future and the emission drain run interleaved in one
    /// select loop, because the handler may still be producing its body
    /// while earlier chunks need to reach the transport. The request body
    /// sender is closed right away: driving body bytes to their consumer is
    /// the body-framing collaborator's job, and none is attached here.
    async fn dispatch<H>(&mut self, head: RequestHead, handler: &Arc<H>) -> Result<(), HttpError>
    where
        H: Handler,
    {
        let (req_body, body_sender) = request_body_channel();
        body_sender.finish();

        let (responder, mut emission) = Responder::channel();

        let mut head_sent = false;

        let handler_result = {
            tokio::pin! {
                let handler_future = handler.call(head, req_body, responder);
            }

            let mut emission_open = true;

            loop {
                select! {
                    // biased ensures the handler result is observed as soon
                    // as it is ready
                    biased;
                    result = &mut handler_future => {
                        break result;
                    }
                    item = emission.recv(), if emission_open => {
                        match item {
                            Some(message) => self.emit(message, &mut head_sent).await?,
                            None => emission_open = false,
                        }
                    }
                }
            }
        };

        // drain whatever the responder side still holds; the channel closes
        // once every writer handle is gone, and a dropped writer emits Eof
        self.drain_emission(&mut emission, &mut head_sent).await?;

        self.framed_write.flush().await?;

        if let Err(e) = handler_result {
            return Err(HttpError::handler(e));
        }

        if !head_sent {
            return Err(HttpError::handler("handler completed without sending a response head"));
        }

        Ok(())
    }

    async fn drain_emission(&mut self, emission: &mut EmissionReceiver, head_sent: &mut bool) -> Result<(), HttpError> {
        while let Some(message) = emission.recv().await {
            self.emit(message, head_sent).await?;
        }
        Ok(())
    }

    async fn emit(&mut self, message: Message<ResponseHead>, head_sent: &mut bool) -> Result<(), HttpError> {
        if message.is_header() {
            *head_sent = true;
        }
        self.framed_write.send(message).await?;
        Ok(())
    }

    /// The only observable answer to a malformed head: a minimal 400 status
    /// line. The connection stays open and the parser keeps waiting for a
    /// request line.
    async fn send_bad_request(&mut self) -> Result<(), HttpError> {
        self.framed_write.send(Message::Header(ResponseHead::new(StatusCode::BAD_REQUEST, "Bad Request"))).await?;
        self.framed_write.send(Message::Payload(PayloadItem::Eof)).await?;
        Ok(())
    }
}
