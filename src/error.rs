//! Error types for the TTL store
//!
//! Provides unified error handling using thiserror.

use std::num::ParseIntError;
use std::string::FromUtf8Error;

use thiserror::Error;

// == Store Error ==
/// Failure surfaced by the underlying key-value engine.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Engine failure (disk, storage-level corruption, transaction)
    #[error("storage engine error: {0}")]
    Engine(#[from] redb::Error),

    /// Filesystem failure outside the engine (e.g. creating the data directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Converts any of the engine's specific error types into a `StoreError`.
    pub fn engine(err: impl Into<redb::Error>) -> Self {
        StoreError::Engine(err.into())
    }
}

// == Codec Error ==
/// The stored bytes do not match the envelope schema.
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("empty value")]
    Empty,

    #[error("unsupported envelope format version {0}")]
    UnsupportedVersion(u8),

    #[error("malformed envelope: {0}")]
    Malformed(#[source] bincode::Error),

    #[error("failed to encode envelope: {0}")]
    Encode(#[source] bincode::Error),
}

// == Cache Error ==
/// Unified error type for cache operations.
///
/// An absent or expired key is never an error; operations report it through
/// their return value instead.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Underlying engine failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Stored value is not a valid envelope
    #[error("corrupt entry at key '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: CodecError,
    },

    /// Entry could not be serialized
    #[error(transparent)]
    Encode(CodecError),

    /// Counter payload is not a base-10 signed 64-bit integer
    #[error("value at key '{key}' is not an integer: {value:?}")]
    Parse {
        key: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// Payload requested as text is not valid UTF-8
    #[error("value at key '{key}' is not valid UTF-8")]
    Utf8 {
        key: String,
        #[source]
        source: FromUtf8Error,
    },
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Renders a raw key for error messages and logs.
pub(crate) fn display_key(key: &[u8]) -> String {
    String::from_utf8_lossy(key).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_names_key_and_value() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err = CacheError::Parse {
            key: "counter".to_string(),
            value: "abc".to_string(),
            source,
        };

        let message = err.to_string();
        assert!(message.contains("counter"));
        assert!(message.contains("abc"));
    }

    #[test]
    fn test_display_key_is_lossy() {
        assert_eq!(display_key(b"plain"), "plain");
        assert_eq!(display_key(&[0x66, 0xff]), "f\u{fffd}");
    }
}
