//! Command-line arguments for the `ttlkv` binary.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Database file (overrides TTLKV_PATH)
    #[arg(long, short = 'p')]
    pub path: Option<PathBuf>,

    /// Number of key lock stripes (overrides TTLKV_LOCK_STRIPES)
    #[arg(long)]
    pub lock_stripes: Option<usize>,

    /// Print replies as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a value, optionally expiring after TTL seconds
    Set {
        key: String,
        value: String,
        /// Seconds until expiry; zero or negative means never
        #[arg(long, allow_negative_numbers = true)]
        ttl: Option<i64>,
    },
    /// Print a live value, removing it if it has expired
    Get { key: String },
    /// Print remaining seconds: -2 absent, -1 no expiry
    Ttl { key: String },
    /// Expire an existing key SECONDS from now
    Expire {
        key: String,
        #[arg(allow_negative_numbers = true)]
        seconds: i64,
    },
    /// Expire an existing key at an RFC 3339 instant
    ExpireAt { key: String, at: DateTime<Utc> },
    /// Remove the expiry of an existing key
    Persist { key: String },
    /// Add 1 to a counter
    Incr { key: String },
    /// Subtract 1 from a counter
    Decr { key: String },
    /// Add DELTA to a counter
    Incrby {
        key: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Subtract DELTA from a counter
    Decrby {
        key: String,
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// Delete a key
    Del { key: String },
    /// Report whether a key holds a live value
    Exists { key: String },
    /// Print the stored bytes without envelope decoding
    RawGet { key: String },
    /// Store bytes without an envelope
    RawPut { key: String, value: String },
    /// Delete a key without envelope decoding
    RawDel { key: String },
    /// Report whether any bytes are stored under a key
    RawExists { key: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_set_with_ttl() {
        let args = Args::try_parse_from(["ttlkv", "--json", "set", "k", "v", "--ttl", "30"]).unwrap();
        assert!(args.json);
        assert!(matches!(
            args.command,
            Command::Set { ref key, ref value, ttl: Some(30) } if key == "k" && value == "v"
        ));
    }

    #[test]
    fn test_parse_negative_delta() {
        let args = Args::try_parse_from(["ttlkv", "incrby", "counter", "-5"]).unwrap();
        assert!(matches!(args.command, Command::Incrby { delta: -5, .. }));
    }

    #[test]
    fn test_parse_expire_at() {
        let args =
            Args::try_parse_from(["ttlkv", "expire-at", "k", "2030-01-01T00:00:00Z"]).unwrap();
        match args.command {
            Command::ExpireAt { at, .. } => assert_eq!(at.timestamp(), 1_893_456_000),
            other => panic!("unexpected command {:?}", other),
        }
    }
}
