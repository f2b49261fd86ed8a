//! Watchpoint error types.

use sdb_eval::ExprError;
use thiserror::Error;

use crate::pool::WatchpointId;

/// Errors from watchpoint allocation and release.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WpError {
    /// Every slot of the pool is in use.
    #[error("no free watchpoint (all {capacity} in use)")]
    PoolExhausted { capacity: usize },

    /// The expression text does not fit in a watchpoint.
    #[error("expression is {len} bytes long (limit {max})")]
    ExpressionTooLong { len: usize, max: usize },

    /// No active watchpoint has this number.
    #[error("no watchpoint number {0}")]
    NotFound(WatchpointId),

    /// The expression could not be evaluated when the watchpoint was set.
    #[error("cannot evaluate watched expression: {0}")]
    InitialEvalFailed(#[source] ExprError),
}

/// Watchpoint result type alias.
pub type WpResult<T> = Result<T, WpError>;
