use std::error::Error as StdError;
use std::io;
use thiserror::Error;
use tokio_util::codec::LinesCodecError;

use crate::connection::MAX_LINE_BYTES;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },

    /// A handler's completion handle rejected. This is propagated to the
    /// connection owner as-is, never mapped to a response by the engine.
    #[error("handler error: {source}")]
    HandlerError { source: Box<dyn StdError + Send + Sync> },
}

impl HttpError {
    pub fn handler<E: Into<Box<dyn StdError + Send + Sync>>>(e: E) -> Self {
        Self::HandlerError { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed request line: {line:?}")]
    MalformedRequestLine { line: String },

    #[error("malformed header line: {reason}")]
    MalformedHeaderLine { reason: String },

    #[error("line exceed the limit {max_size}")]
    TooLongLine { max_size: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_request_line<S: ToString>(line: S) -> Self {
        Self::MalformedRequestLine { line: line.to_string() }
    }

    pub fn malformed_header_line<S: ToString>(reason: S) -> Self {
        Self::MalformedHeaderLine { reason: reason.to_string() }
    }

    /// True for errors that only poison the current request, answered with
    /// a 400 while the connection itself stays usable.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::MalformedRequestLine { .. } | Self::MalformedHeaderLine { .. })
    }
}

/// Folds the line framer's two failure modes into our parse errors.
impl From<LinesCodecError> for ParseError {
    fn from(e: LinesCodecError) -> Self {
        match e {
            LinesCodecError::MaxLineLengthExceeded => Self::TooLongLine { max_size: MAX_LINE_BYTES },
            LinesCodecError::Io(source) => Self::Io { source },
        }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("unexpected message: {reason}")]
    Unexpected { reason: String },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn unexpected<S: ToString>(str: S) -> Self {
        Self::Unexpected { reason: str.to_string() }
    }
}
