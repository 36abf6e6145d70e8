//! Serializes outbound [`Message`]s into response bytes.
//!
//! The encoder enforces the emission ordering at the wire boundary: exactly
//! one head, then zero or more chunks, then `Eof`. A head while a body is
//! still open, or a chunk with no body open, is a [`SendError`].

use bytes::{BufMut, BytesMut};
use tokio_util::codec::Encoder;
use tracing::error;

use crate::protocol::{Message, PayloadItem, ResponseHead, SendError};

/// Initial buffer size reserved for head serialization
const INIT_HEAD_SIZE: usize = 1024;

/// Encoder for staged responses implementing the [`Encoder`] trait.
///
/// Writes the status line as `HTTP/1.1 {code} {reason}`, each header value
/// on its own line in [`HeaderCollection`](crate::protocol::HeaderCollection)
/// insertion order, a blank line, then body chunks verbatim. Body framing
/// (content-length bookkeeping, chunked encoding) is the caller's concern.
pub struct ResponseEncoder {
    body_open: bool,
}

impl ResponseEncoder {
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for ResponseEncoder {
    fn default() -> Self {
        Self { body_open: false }
    }
}

impl Encoder<Message<ResponseHead>> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Message<ResponseHead>, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            Message::Header(head) => {
                if self.body_open {
                    error!("expect payload item but receive response head");
                    return Err(SendError::unexpected("response head while body is open"));
                }

                encode_head(&head, dst);
                self.body_open = true;
                Ok(())
            }

            Message::Payload(payload_item) => {
                if !self.body_open {
                    error!("expect response head but receive payload item");
                    return Err(SendError::unexpected("payload item with no body open"));
                }

                match payload_item {
                    PayloadItem::Chunk(bytes) => dst.put_slice(&bytes),
                    PayloadItem::Eof => self.body_open = false,
                }
                Ok(())
            }
        }
    }
}

fn encode_head(head: &ResponseHead, dst: &mut BytesMut) {
    dst.reserve(INIT_HEAD_SIZE);

    dst.put_slice(b"HTTP/1.1 ");
    dst.put_slice(head.status().as_str().as_bytes());
    dst.put_slice(b" ");
    dst.put_slice(head.reason().as_bytes());
    dst.put_slice(b"\r\n");

    for (header_name, header_value) in head.headers().iter() {
        dst.put_slice(header_name.as_ref());
        dst.put_slice(b": ");
        dst.put_slice(header_value.as_ref());
        dst.put_slice(b"\r\n");
    }
    dst.put_slice(b"\r\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::HeaderCollection;
    use bytes::Bytes;
    use http::{HeaderName, HeaderValue, StatusCode};

    fn encode_all(items: Vec<Message<ResponseHead>>) -> Result<BytesMut, SendError> {
        let mut encoder = ResponseEncoder::new();
        let mut dst = BytesMut::new();
        for item in items {
            encoder.encode(item, &mut dst)?;
        }
        Ok(dst)
    }

    #[test]
    fn head_then_chunks_then_eof() {
        let mut headers = HeaderCollection::new();
        headers.append(HeaderName::from_static("content-type"), HeaderValue::from_static("text/plain"));

        let bytes = encode_all(vec![
            Message::Header(ResponseHead::with_headers(StatusCode::OK, "ok", headers)),
            Message::Payload(PayloadItem::Chunk(Bytes::from_static(b"Hello "))),
            Message::Payload(PayloadItem::Chunk(Bytes::from_static(b"World!"))),
            Message::Payload(PayloadItem::Eof),
        ])
        .unwrap();

        assert_eq!(&bytes[..], b"HTTP/1.1 200 ok\r\ncontent-type: text/plain\r\n\r\nHello World!" as &[u8]);
    }

    #[test]
    fn repeated_header_values_emit_separate_lines_in_order() {
        let mut headers = HeaderCollection::new();
        headers.append(HeaderName::from_static("set-cookie"), HeaderValue::from_static("a=1"));
        headers.append(HeaderName::from_static("server"), HeaderValue::from_static("staged"));
        headers.append(HeaderName::from_static("set-cookie"), HeaderValue::from_static("b=2"));

        let bytes = encode_all(vec![
            Message::Header(ResponseHead::with_headers(StatusCode::NO_CONTENT, "No Content", headers)),
            Message::Payload(PayloadItem::Eof),
        ])
        .unwrap();

        assert_eq!(
            &bytes[..],
            b"HTTP/1.1 204 No Content\r\nset-cookie: a=1\r\nset-cookie: b=2\r\nserver: staged\r\n\r\n" as &[u8]
        );
    }

    #[test]
    fn chunk_before_head_is_an_error() {
        let result = encode_all(vec![Message::Payload(PayloadItem::Chunk(Bytes::from_static(b"x")))]);
        assert!(result.is_err());
    }

    #[test]
    fn second_head_while_body_open_is_an_error() {
        let result = encode_all(vec![
            Message::Header(ResponseHead::new(StatusCode::OK, "ok")),
            Message::Header(ResponseHead::new(StatusCode::OK, "ok")),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn eof_reopens_for_next_response() {
        let bytes = encode_all(vec![
            Message::Header(ResponseHead::new(StatusCode::OK, "ok")),
            Message::Payload(PayloadItem::Eof),
            Message::Header(ResponseHead::new(StatusCode::NOT_FOUND, "Not Found")),
            Message::Payload(PayloadItem::Eof),
        ])
        .unwrap();

        assert_eq!(&bytes[..], b"HTTP/1.1 200 ok\r\n\r\nHTTP/1.1 404 Not Found\r\n\r\n" as &[u8]);
    }
}
