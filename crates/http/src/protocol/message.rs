use bytes::Bytes;

/// A unit of outbound response traffic: either a response head or a piece
/// of the body stream.
///
/// The responder side produces these and the connection drains them into the
/// response encoder in order, which is what gives the emission its staging:
/// head first, then zero or more chunks, then exactly one `Eof`.
#[derive(Debug)]
pub enum Message<T> {
    /// The head of a response (status line and headers).
    Header(T),
    /// A chunk of body data or the end-of-body marker.
    Payload(PayloadItem),
}

/// An item in the body stream: a data chunk or the end-of-stream marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadItem {
    Chunk(Bytes),
    Eof,
}

impl<T> Message<T> {
    #[inline]
    pub fn is_header(&self) -> bool {
        matches!(self, Message::Header(_))
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, Message::Payload(PayloadItem::Eof))
    }
}

impl PayloadItem {
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self, PayloadItem::Eof)
    }

    /// Returns the contained bytes if this is a `Chunk`, `None` for `Eof`.
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            PayloadItem::Chunk(bytes) => Some(bytes),
            PayloadItem::Eof => None,
        }
    }
}
