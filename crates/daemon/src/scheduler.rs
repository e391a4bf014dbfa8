// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Component G — the top-level scheduler loop (§4.8), implemented as a
//! direct translation of the spec's pseudocode: drain every workflow whose
//! `next_execution` has passed, then sleep one poll quantum.

use std::time::Duration;

use keepwatch_core::{Clock, FatalError, ShutdownSignal};
use keepwatch_engine::{Engine, WorkflowHeap};

/// The fixed inter-poll sleep (§4.8). Bounds scheduling jitter; not
/// configurable, matching the spec's silence on tuning it.
pub const POLL_QUANTUM: Duration = Duration::from_secs(5);

/// Runs until `shutdown` is observed terminated. Checked both before and
/// after each tick, so a tick already in flight always completes before
/// the loop exits (§4.8, §8 invariant 6).
pub async fn run_scheduler_loop(
    engine: &Engine,
    heap: &mut WorkflowHeap,
    shutdown: &ShutdownSignal,
    clock: &dyn Clock,
) -> Result<(), FatalError> {
    while !shutdown.is_terminated() {
        while !shutdown.is_terminated() {
            let is_due = heap.peek().is_some_and(|top| top.next_execution <= clock.now());
            if !is_due {
                break;
            }
            let Some(mut entry) = heap.pop() else { break };
            engine.run_tick(&mut entry).await?;
            heap.push(entry);
        }
        tokio::time::sleep(POLL_QUANTUM).await;
    }
    Ok(())
}
