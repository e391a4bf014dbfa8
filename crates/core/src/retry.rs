// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Component E — the fixed retry policy wrapped around notifier sends and
//! content-store inserts (§4.7).
//!
//! Policy is deliberately not configurable: up to 3 attempts, 100 ms initial
//! delay, exponential backoff. The policy retries any error and lets the
//! final attempt's error propagate; callers distinguishing retryable from
//! non-retryable errors is explicitly out of scope (§4.7).

use std::future::Future;
use std::time::Duration;

/// Bounded exponential-backoff retry, applied around a fallible async
/// operation.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// The fixed policy mandated by §4.7.
    pub fn fixed() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn with_params(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
        }
    }

    /// Runs `op`, retrying on error up to `max_attempts` times total, with
    /// exponential backoff starting at `initial_delay` between attempts.
    /// Returns the last error if every attempt fails.
    pub async fn run<F, Fut, T, E>(&self, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut delay = self.initial_delay;
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    if attempt >= self.max_attempts {
                        return Err(err);
                    }
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }
}
