// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Component A — a process-wide cooperative termination flag.
//!
//! Flipped exactly once by the first arrival of SIGINT/SIGTERM; subsequent
//! signals are no-ops. The scheduler loop and the inner per-workflow loop
//! both poll this at safe points and unwind cleanly once it is set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle around a single shared termination flag.
#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    terminated: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once shutdown has been requested. Monotonic: never returns to
    /// false after first returning true.
    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }

    /// Requests termination. Idempotent — the first call wins.
    pub fn terminate(&self) {
        self.terminated.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_not_terminated() {
        let signal = ShutdownSignal::new();
        assert!(!signal.is_terminated());
    }

    #[test]
    fn terminate_is_observed_through_clones() {
        let signal = ShutdownSignal::new();
        let clone = signal.clone();
        clone.terminate();
        assert!(signal.is_terminated());
    }

    #[test]
    fn terminate_is_idempotent() {
        let signal = ShutdownSignal::new();
        signal.terminate();
        signal.terminate();
        assert!(signal.is_terminated());
    }
}
