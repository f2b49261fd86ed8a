//! Fixed-capacity watchpoint pool.
//!
//! All records live in one arena for the life of the pool. Two singly
//! linked lists thread through it by index: the active list (most
//! recently allocated first) and the free list. Every slot is on exactly
//! one of them. A slot's number never changes; releasing and re-allocating
//! reuses it, and the stale expression and value stay in the slot until
//! the next allocation overwrites them.

use std::fmt;

use sdb_eval::{expr, ExprError};
use sdb_types::{HaltSignal, RegisterLookup, Word};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{WpError, WpResult};

/// Default number of watchpoints.
pub const POOL_SIZE: usize = 32;

/// Longest expression a watchpoint stores, in bytes.
pub const MAX_EXPR_LEN: usize = 65535;

/// Watchpoint number: the index of its slot in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WatchpointId(pub usize);

impl fmt::Display for WatchpointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One arena slot.
#[derive(Debug, Clone)]
struct Slot {
    expression: String,
    value: Word,
    next: Option<usize>,
}

/// Read-only view of an active watchpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchpointInfo {
    pub id: WatchpointId,
    pub expression: String,
    pub value: Word,
}

/// A watchpoint whose value changed during [`WatchpointPool::check_all`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchHit {
    pub id: WatchpointId,
    pub expression: String,
    pub old_value: Word,
    pub new_value: Word,
}

/// A watchpoint that could not be re-evaluated. Its cached value is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalFailure {
    pub id: WatchpointId,
    pub expression: String,
    pub error: ExprError,
}

/// Outcome of one [`WatchpointPool::check_all`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// First watchpoint found changed, if any.
    pub hit: Option<WatchHit>,
    /// Watchpoints scanned before the hit (or all of them) that failed to
    /// evaluate.
    pub failures: Vec<EvalFailure>,
}

/// The watchpoint pool.
///
/// Mutating operations take `&mut self`; a host that shares the pool
/// between threads wraps it in a `Mutex`.
#[derive(Debug, Clone)]
pub struct WatchpointPool {
    slots: Vec<Slot>,
    /// Head of the active list.
    active: Option<usize>,
    /// Head of the free list.
    free: Option<usize>,
}

impl WatchpointPool {
    /// Create a pool with [`POOL_SIZE`] slots, all free.
    pub fn new() -> Self {
        Self::with_capacity(POOL_SIZE)
    }

    /// Create a pool with `capacity` slots, all free and linked in index
    /// order.
    pub fn with_capacity(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|i| Slot {
                expression: String::new(),
                value: 0,
                next: (i + 1 < capacity).then_some(i + 1),
            })
            .collect();
        Self {
            slots,
            active: None,
            free: (capacity > 0).then_some(0),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_len(&self) -> usize {
        self.chain(self.active).count()
    }

    pub fn free_len(&self) -> usize {
        self.chain(self.free).count()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }

    /// Set a new watchpoint on `expression`.
    ///
    /// The expression is evaluated right away to seed the cached value.
    /// On any error the pool is left unchanged.
    pub fn allocate(
        &mut self,
        expression: &str,
        regs: &dyn RegisterLookup,
    ) -> WpResult<WatchpointId> {
        let Some(index) = self.free else {
            return Err(WpError::PoolExhausted {
                capacity: self.capacity(),
            });
        };
        if expression.len() > MAX_EXPR_LEN {
            return Err(WpError::ExpressionTooLong {
                len: expression.len(),
                max: MAX_EXPR_LEN,
            });
        }
        let value = expr(expression, regs).map_err(WpError::InitialEvalFailed)?;

        let slot = &mut self.slots[index];
        self.free = slot.next;
        slot.next = self.active;
        slot.expression.clear();
        slot.expression.push_str(expression);
        slot.value = value;
        self.active = Some(index);

        debug!(id = index, expression, value, "watchpoint allocated");
        Ok(WatchpointId(index))
    }

    /// Release watchpoint `id` back to the free list.
    pub fn release(&mut self, id: WatchpointId) -> WpResult<()> {
        let mut prev: Option<usize> = None;
        let mut cursor = self.active;
        while let Some(index) = cursor {
            if index == id.0 {
                break;
            }
            prev = Some(index);
            cursor = self.slots[index].next;
        }
        let Some(index) = cursor else {
            return Err(WpError::NotFound(id));
        };

        let next = self.slots[index].next;
        match prev {
            None => self.active = next,
            Some(p) => self.slots[p].next = next,
        }
        self.slots[index].next = self.free;
        self.free = Some(index);

        debug!(id = index, "watchpoint released");
        Ok(())
    }

    /// Look up an active watchpoint.
    pub fn get(&self, id: WatchpointId) -> Option<WatchpointInfo> {
        self.chain(self.active)
            .find(|&i| i == id.0)
            .map(|i| self.info(i))
    }

    /// Snapshot of the active list in link order (most recent first).
    pub fn list(&self) -> Vec<WatchpointInfo> {
        self.chain(self.active).map(|i| self.info(i)).collect()
    }

    /// Re-evaluate active watchpoints in link order against the current
    /// registers.
    ///
    /// Stops at the first watchpoint whose value differs from its cached
    /// value: that value is updated, `halt` is raised, and the change is
    /// returned in [`CheckReport::hit`]. Later watchpoints are not looked
    /// at until the next call. A watchpoint that fails to evaluate is
    /// recorded in [`CheckReport::failures`], keeps its cached value, and
    /// does not stop the scan.
    pub fn check_all(&mut self, regs: &dyn RegisterLookup, halt: &HaltSignal) -> CheckReport {
        let mut report = CheckReport::default();
        let mut cursor = self.active;

        while let Some(index) = cursor {
            let slot = &mut self.slots[index];
            cursor = slot.next;

            let new_value = match expr(&slot.expression, regs) {
                Ok(v) => v,
                Err(error) => {
                    warn!(id = index, expression = %slot.expression, %error, "watchpoint evaluation failed");
                    report.failures.push(EvalFailure {
                        id: WatchpointId(index),
                        expression: slot.expression.clone(),
                        error,
                    });
                    continue;
                }
            };
            if new_value == slot.value {
                continue;
            }

            let old_value = std::mem::replace(&mut slot.value, new_value);
            info!(id = index, expression = %slot.expression, old_value, new_value, "watchpoint triggered");
            halt.raise();
            report.hit = Some(WatchHit {
                id: WatchpointId(index),
                expression: slot.expression.clone(),
                old_value,
                new_value,
            });
            break;
        }
        report
    }

    fn info(&self, index: usize) -> WatchpointInfo {
        let slot = &self.slots[index];
        WatchpointInfo {
            id: WatchpointId(index),
            expression: slot.expression.clone(),
            value: slot.value,
        }
    }

    /// Indices along a list starting at `head`.
    fn chain(&self, head: Option<usize>) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(head, move |&i| self.slots[i].next)
    }
}

impl Default for WatchpointPool {
    fn default() -> Self {
        Self::new()
    }
}
