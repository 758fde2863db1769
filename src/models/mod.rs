//! Output models for the command-line tool
//!
//! Each reply serializes to JSON for `--json` output and implements
//! `Display` for the plain, redis-cli style output.

pub mod responses;

// Re-export commonly used types
pub use responses::{
    CounterResponse, DeleteResponse, ErrorResponse, ExistsResponse, ExpireResponse, GetResponse,
    SetResponse, TtlResponse,
};
