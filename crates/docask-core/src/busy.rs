//! Busy-state tracking for interactive controls.
//!
//! One latch per control (upload button, search button). An orchestrator
//! acquires the latch before its network call and releases it exactly once
//! after settlement; while held, repeat triggers are rejected, which is what
//! keeps a rapid double-submit from issuing overlapping requests.

/// In-flight flag for a single interactive control.
#[derive(Debug, Default)]
pub struct BusyLatch {
    held: bool,
}

impl BusyLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the latch. Returns `false` when an operation is already in
    /// flight, in which case the trigger must be ignored.
    pub fn try_acquire(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        true
    }

    /// Release the latch. Idempotent, so every exit path may call it.
    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_then_release_pairs_exactly_once() {
        let mut latch = BusyLatch::new();
        assert!(latch.try_acquire());
        assert!(latch.is_held());
        latch.release();
        assert!(!latch.is_held());
    }

    #[test]
    fn second_acquire_while_held_is_rejected() {
        let mut latch = BusyLatch::new();
        assert!(latch.try_acquire());
        assert!(!latch.try_acquire());
    }

    #[test]
    fn release_is_idempotent() {
        let mut latch = BusyLatch::new();
        assert!(latch.try_acquire());
        latch.release();
        latch.release();
        assert!(!latch.is_held());
        assert!(latch.try_acquire());
    }

    #[test]
    fn release_after_failure_path_reopens_the_latch() {
        let mut latch = BusyLatch::new();

        // Same shape whether the call settled Ok or Fail: acquire, settle,
        // release. The latch never stays held after settlement.
        for _ in 0..3 {
            assert!(latch.try_acquire());
            latch.release();
        }
        assert!(!latch.is_held());
    }
}
