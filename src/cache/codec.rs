//! Envelope Codec
//!
//! Wire format of every value managed by the cache:
//!
//! ```text
//! +---------+------------------------------------------------+
//! | version | bincode { created_at: i64,                     |
//! |  (u8)   |           expires_at: i64,                     |
//! |         |           data: bytes }                        |
//! +---------+------------------------------------------------+
//! ```
//!
//! The body uses bincode's default options (varint integers, little endian,
//! trailing bytes rejected). Only [`FORMAT_VERSION`] is understood.

use bincode::{DefaultOptions, Options};
use serde::{Deserialize, Serialize};

use super::CacheEntry;
use crate::error::CodecError;

/// Leading byte of every encoded envelope.
pub const FORMAT_VERSION: u8 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    created_at: i64,
    expires_at: i64,
    data: &'a [u8],
}

#[derive(Deserialize)]
struct Envelope {
    created_at: i64,
    expires_at: i64,
    data: Vec<u8>,
}

fn options() -> impl Options {
    DefaultOptions::new()
}

/// Serializes `entry`. The output is deterministic for a given entry.
pub fn encode(entry: &CacheEntry) -> Result<Vec<u8>, CodecError> {
    let envelope = EnvelopeRef {
        created_at: entry.created_at,
        expires_at: entry.expires_at,
        data: &entry.data,
    };

    let mut buf = Vec::with_capacity(1 + 20 + entry.data.len());
    buf.push(FORMAT_VERSION);
    options()
        .serialize_into(&mut buf, &envelope)
        .map_err(CodecError::Encode)?;
    Ok(buf)
}

/// Parses bytes produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<CacheEntry, CodecError> {
    let (&version, body) = bytes.split_first().ok_or(CodecError::Empty)?;
    if version != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(version));
    }

    let envelope: Envelope = options()
        .deserialize(body)
        .map_err(CodecError::Malformed)?;

    Ok(CacheEntry {
        data: envelope.data,
        created_at: envelope.created_at,
        expires_at: envelope.expires_at,
    })
}
