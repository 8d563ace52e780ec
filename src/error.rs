//! Error types surfaced by command execution

use std::borrow::Cow;

/// Failure reported by a [`BinaryCodec`](crate::codec::BinaryCodec)
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A domain value could not be turned into bytes
    #[error("failed to encode value: {0}")]
    Encode(String),
    /// Reply bytes could not be turned into the requested domain type
    #[error("failed to decode value: {0}")]
    Decode(String),
}

/// Errors returned by [`Command::run`](crate::protocol::Command::run)
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The reply does not have the shape the decoder expects
    #[error("unexpected reply: expected {expected}, got {actual}")]
    Decode {
        expected: Cow<'static, str>,
        actual: String,
    },
    /// The server answered with an error reply
    #[error("{0}")]
    Server(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Malformed RESP bytes received from the transport
    #[error("protocol error: {0}")]
    Protocol(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a decode error from the expected shape and a description of the reply
    pub fn decode(expected: impl Into<Cow<'static, str>>, actual: impl Into<String>) -> Self {
        Error::Decode {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// True for errors that describe the reply rather than the transport
    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. } | Error::Codec(CodecError::Decode(_)))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_message() {
        let err = Error::decode("integer", "bulk string");
        assert_eq!(
            err.to_string(),
            "unexpected reply: expected integer, got bulk string"
        );
        assert!(err.is_decode());
    }

    #[test]
    fn test_server_error_keeps_message() {
        let err = Error::Server("WRONGTYPE Operation against a key".to_string());
        assert_eq!(err.to_string(), "WRONGTYPE Operation against a key");
        assert!(!err.is_decode());
    }
}
