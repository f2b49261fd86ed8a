//! SDB watchpoints.
//!
//! A watchpoint is an expression re-evaluated after every simulated step;
//! when its value changes, the pool raises the [`HaltSignal`] so the
//! stepping loop stops. Watchpoints live in a fixed-capacity
//! [`WatchpointPool`] and keep the slot index as their number for the
//! whole session.
//!
//! [`HaltSignal`]: sdb_types::HaltSignal

pub mod error;
pub mod pool;

pub use error::{WpError, WpResult};
pub use pool::{
    CheckReport, EvalFailure, WatchHit, WatchpointId, WatchpointInfo, WatchpointPool,
    MAX_EXPR_LEN, POOL_SIZE,
};
