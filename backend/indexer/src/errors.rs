//! Failures of the indexer's poller, store and configuration.
//!
//! Transient RPC problems (transport errors, rate limits, soft JSON-RPC
//! errors) are retried inside [`crate::rpc::fetch_events`] and never
//! surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("rpc transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON-RPC error the node will keep returning, e.g. a malformed request.
    #[error("rpc rejected getEvents ({code}): {message}")]
    RpcRejected { code: i64, message: String },

    #[error("getEvents returned neither a result nor an error")]
    EmptyResult,

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IndexerError>;
