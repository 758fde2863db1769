//! ttlkv - command-line access to a TTL store
//!
//! Opens the database, runs a single command and closes it again.

mod cli;

use std::fmt::Display;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Args, Command};
use ttlkv::models::{
    CounterResponse, DeleteResponse, ErrorResponse, ExistsResponse, ExpireResponse, GetResponse,
    SetResponse, TtlResponse,
};
use ttlkv::{Config, RedbStore, StoreAdapter, TtlCache};

fn main() -> ExitCode {
    // Defaults to "info" for this crate, can be overridden with RUST_LOG.
    // Logs go to stderr so replies on stdout stay machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttlkv=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let json = args.json;

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let reply = ErrorResponse::new(format!("{:#}", err));
            if json {
                println!("{}", serde_json::to_string(&reply).unwrap_or_default());
            } else {
                eprintln!("{}", reply);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env();
    if let Some(path) = args.path {
        config.db_path = path;
    }
    if let Some(stripes) = args.lock_stripes {
        config.lock_stripes = stripes;
    }
    debug!(?config, "configuration loaded");

    let store = RedbStore::open(&config.db_path)
        .with_context(|| format!("failed to open {}", config.db_path.display()))?;
    let cache = TtlCache::new(store).with_lock_stripes(config.lock_stripes);

    let outcome = execute(&cache, args.command, args.json);
    cache.close().context("failed to close store")?;
    outcome
}

fn execute<S: StoreAdapter>(cache: &TtlCache<S>, command: Command, json: bool) -> anyhow::Result<()> {
    match command {
        Command::Set { key, value, ttl } => {
            match ttl {
                Some(ttl) => cache.set_with_ttl(&key, &value, ttl)?,
                None => cache.set(&key, &value)?,
            }
            debug!("Set key '{}'", key);
            emit(json, &SetResponse::new(key, ttl))
        }
        Command::Get { key } => {
            let value = cache.get(&key)?;
            emit(json, &GetResponse::new(key, value))
        }
        Command::Ttl { key } => {
            let ttl = cache.ttl(&key)?;
            emit(json, &TtlResponse::new(key, ttl))
        }
        Command::Expire { key, seconds } => {
            let updated = cache.expire(&key, seconds)?;
            emit(json, &ExpireResponse { key, updated })
        }
        Command::ExpireAt { key, at } => {
            let updated = cache.expire_at(&key, at)?;
            emit(json, &ExpireResponse { key, updated })
        }
        Command::Persist { key } => {
            let updated = cache.persist(&key)?;
            emit(json, &ExpireResponse { key, updated })
        }
        Command::Incr { key } => counter(json, key, |k| cache.incr(k)),
        Command::Decr { key } => counter(json, key, |k| cache.decr(k)),
        Command::Incrby { key, delta } => counter(json, key, |k| cache.increment_by(k, delta)),
        Command::Decrby { key, delta } => counter(json, key, |k| cache.decrement_by(k, delta)),
        Command::Del { key } => {
            cache.delete(&key)?;
            emit(json, &DeleteResponse::new(key))
        }
        Command::Exists { key } => {
            let exists = cache.exists(&key)?;
            emit(json, &ExistsResponse { key, exists })
        }
        Command::RawGet { key } => {
            let value = cache.raw_get(&key)?;
            emit(json, &GetResponse::new(key, value))
        }
        Command::RawPut { key, value } => {
            cache.raw_put(&key, &value)?;
            emit(json, &SetResponse::new(key, None))
        }
        Command::RawDel { key } => {
            cache.raw_delete(&key)?;
            emit(json, &DeleteResponse::new(key))
        }
        Command::RawExists { key } => {
            let exists = cache.raw_exists(&key)?;
            emit(json, &ExistsResponse { key, exists })
        }
    }
}

fn counter(
    json: bool,
    key: String,
    op: impl FnOnce(&str) -> ttlkv::Result<i64>,
) -> anyhow::Result<()> {
    let value = op(&key)?;
    emit(json, &CounterResponse { key, value })
}

fn emit<T: Serialize + Display>(json: bool, reply: &T) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(reply)?);
    } else {
        println!("{}", reply);
    }
    Ok(())
}
