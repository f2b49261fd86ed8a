use std::sync::atomic::{AtomicBool, Ordering};

/// Stop request raised by the watchpoint pool and consumed by the
/// stepping loop.
///
/// The loop clears the signal before it starts stepping and checks it
/// after every instruction.
#[derive(Debug, Default)]
pub struct HaltSignal {
    raised: AtomicBool,
}

impl HaltSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the stepping loop to stop after the current instruction.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.raised.store(false, Ordering::SeqCst);
    }

    /// Read and clear in one step. Returns whether a halt was pending.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raise_and_take() {
        let halt = HaltSignal::new();
        assert!(!halt.is_raised());
        halt.raise();
        assert!(halt.is_raised());
        assert!(halt.take());
        assert!(!halt.is_raised());
        assert!(!halt.take());
    }

    #[test]
    fn test_clear() {
        let halt = HaltSignal::new();
        halt.raise();
        halt.clear();
        assert!(!halt.is_raised());
    }
}
