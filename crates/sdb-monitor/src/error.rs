//! Monitor error types.

use std::path::PathBuf;

use sdb_eval::ExprError;
use sdb_types::Word;
use sdb_watch::WpError;
use thiserror::Error;

/// Errors from configuration, the target, and I/O.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A physical-memory access outside the target's memory window.
    #[error("address {addr:#010x} is outside physical memory ({len} bytes)")]
    AddressOutOfBounds { addr: Word, len: usize },

    #[error("image of {size} bytes does not fit in {capacity} bytes of memory")]
    ImageTooLarge { size: usize, capacity: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Monitor result type alias.
pub type MonitorResult<T> = Result<T, MonitorError>;

/// Why a single command failed. The session reports it and carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Expr(#[from] ExprError),

    #[error(transparent)]
    Watch(#[from] WpError),

    #[error(transparent)]
    Monitor(#[from] MonitorError),
}
