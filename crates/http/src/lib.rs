//! A minimal, staged HTTP/1.x server-side protocol engine
//!
//! This crate converts an inbound byte stream into a structured request head
//! and hands control to an externally supplied handler, which answers
//! asynchronously through a responder whose body is streamed out
//! incrementally. It is a protocol engine, not a web framework: a small
//! hand-rolled head-parser state machine plus a push-based body streaming
//! contract, built so a conformant server can be assembled around it.
//!
//! # Features
//!
//! - Line-at-a-time request head parsing with an explicit state machine
//! - Ordered, case-insensitive, multi-valued header collection
//! - Push-based streaming bodies with single-shot completion
//! - Two-phase response staging: the head can be sent before the body
//!   exists and before the request body has been consumed
//! - Sequential request reuse of one connection (no pipelining)
//! - Clean error handling; handler failures propagate to the connection
//!   owner instead of being swallowed
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bytes::Bytes;
//! use http::StatusCode;
//! use tokio::net::TcpListener;
//! use tracing::{error, info, warn, Level};
//! use tracing_subscriber::FmtSubscriber;
//! use staged_http::connection::{HttpConnection, Responder};
//! use staged_http::handler::make_handler;
//! use staged_http::protocol::body::{DiscardingConsumer, RequestBody};
//! use staged_http::protocol::{HeaderCollection, RequestHead, ResponseHead};
//!
//! #[tokio::main]
//! async fn main() {
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::INFO)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     info!(port = 8080, "start listening");
//!     let tcp_listener = match TcpListener::bind("127.0.0.1:8080").await {
//!         Ok(tcp_listener) => tcp_listener,
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     };
//!
//!     let handler = Arc::new(make_handler(hello_world));
//!
//!     loop {
//!         let (tcp_stream, _remote_addr) = match tcp_listener.accept().await {
//!             Ok(stream_and_addr) => stream_and_addr,
//!             Err(e) => {
//!                 warn!(cause = %e, "failed to accept");
//!                 continue;
//!             }
//!         };
//!
//!         let handler = handler.clone();
//!
//!         tokio::spawn(async move {
//!             let (reader, writer) = tcp_stream.into_split();
//!             let connection = HttpConnection::new(reader, writer);
//!             match connection.process(handler).await {
//!                 Ok(_) => {
//!                     info!("finished process, connection shutdown");
//!                 }
//!                 Err(e) => {
//!                     error!("service has error, cause {}, connection shutdown", e);
//!                 }
//!             }
//!         });
//!     }
//! }
//!
//! async fn hello_world(
//!     head: RequestHead,
//!     body: RequestBody,
//!     responder: Responder,
//! ) -> Result<(), std::convert::Infallible> {
//!     info!("request path {}", head.target());
//!
//!     // ignore the request body; respond once it has fully arrived
//!     let (ignorer, done) = DiscardingConsumer::new();
//!     body.start_producing(ignorer).await;
//!     let _ = done.await;
//!
//!     let mut headers = HeaderCollection::new();
//!     headers.append(
//!         http::header::CONTENT_TYPE,
//!         http::HeaderValue::from_static("text/plain"),
//!     );
//!
//!     let mut writer = responder.send_head(ResponseHead::with_headers(StatusCode::OK, "ok", headers));
//!     writer.write(Bytes::from_static(b"Hello World!\r\n"));
//!     writer.finish();
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! The crate is organized into several key modules:
//!
//! - [`connection`]: Connection lifecycle, dispatch and response emission
//! - [`parser`]: The request head parser state machine
//! - [`protocol`]: Protocol types, header collection, bodies and errors
//! - [`codec`]: Response wire encoding
//! - [`handler`]: Request handler traits and utilities
//!
//! # Staging
//!
//! Request and response progress through discrete, independently timed
//! phases. On the inbound side: request line, headers, blank-line boundary,
//! dispatch. On the outbound side the handler decides the timing: the
//! response head can be sent before the request body has been consumed and
//! before any body chunk exists, which is what real HTTP servers need.
//!
//! # Scope boundaries
//!
//! Deliberately external to this engine, with boundary contracts at the
//! seams:
//!
//! - body framing: where a request body ends (Content-Length, chunked) is
//!   the collaborator's concern; the engine only supplies the capability
//!   handles ([`protocol::body::RequestBodySender`] drives them)
//! - line framing policy beyond the 8 KiB line cap
//! - timeouts, persistent-connection policy beyond sequential reuse,
//!   pipelining, 100-continue
//! - flow control: producers are never throttled, acceptable only for
//!   bounded-size bodies

pub mod codec;
pub mod connection;
pub mod handler;
pub mod parser;
pub mod protocol;

mod utils;
pub(crate) use utils::ensure;
