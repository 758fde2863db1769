//! Reply DTOs printed by the `ttlkv` binary

use std::fmt;

use serde::Serialize;

use crate::cache::Ttl;

/// Reply for `get` and `raw-get`
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value, lossily decoded as UTF-8; `None` if absent
    pub value: Option<String>,
}

impl GetResponse {
    pub fn new(key: impl Into<String>, value: Option<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.map(|v| String::from_utf8_lossy(&v).into_owned()),
        }
    }
}

impl fmt::Display for GetResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "(nil)"),
        }
    }
}

/// Reply for `set` and `raw-put`
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
    /// TTL requested for the key, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

impl SetResponse {
    pub fn new(key: impl Into<String>, ttl: Option<i64>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
            ttl,
        }
    }
}

impl fmt::Display for SetResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OK")
    }
}

/// Reply for `del` and `raw-del`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

impl fmt::Display for DeleteResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OK")
    }
}

/// Reply for `ttl`
#[derive(Debug, Clone, Serialize)]
pub struct TtlResponse {
    pub key: String,
    /// `-2` absent, `-1` no expiry, otherwise seconds remaining
    pub ttl: i64,
    /// "absent", "persistent" or "expiring"
    pub state: &'static str,
}

impl TtlResponse {
    pub fn new(key: impl Into<String>, ttl: Ttl) -> Self {
        let state = match ttl {
            Ttl::Absent => "absent",
            Ttl::Persistent => "persistent",
            Ttl::Remaining(_) => "expiring",
        };
        Self {
            key: key.into(),
            ttl: ttl.code(),
            state,
        }
    }
}

impl fmt::Display for TtlResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(integer) {}", self.ttl)
    }
}

/// Reply for `expire`, `expire-at` and `persist`
#[derive(Debug, Clone, Serialize)]
pub struct ExpireResponse {
    pub key: String,
    /// False when the key was absent and nothing was written
    pub updated: bool,
}

impl fmt::Display for ExpireResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(integer) {}", u8::from(self.updated))
    }
}

/// Reply for counter commands
#[derive(Debug, Clone, Serialize)]
pub struct CounterResponse {
    pub key: String,
    pub value: i64,
}

impl fmt::Display for CounterResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(integer) {}", self.value)
    }
}

/// Reply for `exists` and `raw-exists`
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    pub key: String,
    pub exists: bool,
}

impl fmt::Display for ExistsResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(integer) {}", u8::from(self.exists))
    }
}

/// Error reply for all failure conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(error) {}", self.error)
    }
}
