// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Component F — the workflow engine: the ten-step tick pipeline of §4.6.
//!
//! `notify_before_persist` is the pipeline's one load-bearing ordering
//! property (§4.6, §9): a notify failure after persistence would silently
//! drop items forever, so persistence always runs last and the worst case
//! on a mid-tick crash is a single duplicate notification, never a loss.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use keepwatch_core::{Clock, ContentItem, ExecutionEntry, FatalError, RetryPolicy};
use keepwatch_registry::Registry;
use keepwatch_storage::ContentStore;

/// The end-of-tick structured summary required by §6's process surface.
#[derive(Debug, Clone)]
pub struct TickSummary {
    pub workflow: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub new_updates: usize,
    pub filtered_out: usize,
    pub notified: usize,
    pub channels: Vec<String>,
}

impl TickSummary {
    pub fn duration_ms(&self) -> i64 {
        (self.finished_at - self.started_at).num_milliseconds()
    }
}

/// Drives one workflow tick end to end, consulting the plugin registry
/// (component B) and the content store (component C), wrapping notifier
/// sends and store inserts in the fixed retry policy (component E).
pub struct Engine {
    registry: Arc<Registry>,
    store: Arc<dyn ContentStore>,
    clock: Arc<dyn Clock>,
    retry: RetryPolicy,
}

impl Engine {
    pub fn new(registry: Arc<Registry>, store: Arc<dyn ContentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            registry,
            store,
            clock,
            retry: RetryPolicy::fixed(),
        }
    }

    /// Runs one tick for `entry`, mutating its `next_execution` in place
    /// (step 10) regardless of how many items were processed. Every error
    /// variant this can return is fatal per §7 — the caller (the scheduler
    /// loop) does not attempt to recover and instead ends the process.
    pub async fn run_tick(&self, entry: &mut ExecutionEntry) -> Result<TickSummary, FatalError> {
        let workflow = entry.workflow.clone();
        let started_at = self.clock.now();

        // Step 1: build source, filter chain, notifier list.
        let source = self.registry.build_source(&workflow.source)?;
        let mut filters = Vec::with_capacity(workflow.filters.len());
        for raw in &workflow.filters {
            filters.push(self.registry.build_filter(raw)?);
        }
        let mut notifiers = Vec::with_capacity(workflow.notifiers.len());
        for raw in &workflow.notifiers {
            notifiers.push(self.registry.build_notifier(raw)?);
        }
        let channels: Vec<String> = notifiers.iter().map(|n| n.name().to_string()).collect();

        // Step 2: bootstrap probe.
        let latest = self.store.latest_published(source.source_id()).await?;
        let is_new_source = latest.is_none();

        // Step 3: fetch. Zero items is a valid, non-error outcome.
        let mut items = source.fetch().await?;
        if items.is_empty() {
            let finished_at = self.clock.now();
            entry.reschedule_from(finished_at);
            let summary = TickSummary {
                workflow: workflow.name.clone(),
                started_at,
                finished_at,
                new_updates: 0,
                filtered_out: 0,
                notified: 0,
                channels,
            };
            log_summary(&summary);
            return Ok(summary);
        }

        // Step 4: new-source backfill. Sort before slicing (§9) — the
        // prototype sliced `contents[1:]` without sorting first, making
        // "skip the newest" depend on fetch order; that is a bug, fixed
        // here by sorting ascending before the backfill slice.
        if is_new_source {
            items.sort_by_key(|item| item.published_at);
            let Some(newest) = items.pop() else {
                unreachable!("items checked non-empty above");
            };
            self.retry.run(|| self.store.insert_many(&items)).await?;
            items = vec![newest];
        }

        // Step 5: dedup.
        let ids: Vec<String> = items.iter().map(|item| item.id.clone()).collect();
        let seen = self.store.lookup_existing(source.source_id(), &ids).await?;
        let candidates: Vec<ContentItem> =
            items.into_iter().filter(|item| !seen.contains(&item.id)).collect();
        let new_updates = candidates.len();

        // Step 6: filter chain, short-circuiting on first rejection.
        let mut survivors = Vec::with_capacity(candidates.len());
        for item in candidates {
            let rejected_by = filters.iter().find(|f| !f.apply(&item));
            match rejected_by {
                Some(filter) => {
                    tracing::info!(
                        workflow = %workflow.name,
                        source = source.name(),
                        filter = filter.name(),
                        title = %item.title,
                        "rejected content"
                    );
                }
                None => survivors.push(item),
            }
        }
        let filtered_out = new_updates - survivors.len();

        // Step 7: sort survivors by published_at ascending — the visible
        // notification-order guarantee (§5).
        survivors.sort_by_key(|item| item.published_at);

        // Step 8: notify. Notifiers run in declared order; an item is sent
        // through every notifier before the next item is sent.
        for notifier in &notifiers {
            for item in &survivors {
                self.retry.run(|| notifier.send(item)).await?;
            }
        }

        // Step 9: persist. Runs after notify, never before (§4.6, §9).
        if !survivors.is_empty() {
            self.retry.run(|| self.store.insert_many(&survivors)).await?;
        }

        // Step 10: reschedule, anchored to the end of this tick.
        let finished_at = self.clock.now();
        entry.reschedule_from(finished_at);

        let summary = TickSummary {
            workflow: workflow.name.clone(),
            started_at,
            finished_at,
            new_updates,
            filtered_out,
            notified: survivors.len(),
            channels,
        };
        log_summary(&summary);
        Ok(summary)
    }
}

fn log_summary(summary: &TickSummary) {
    tracing::info!(
        workflow = %summary.workflow,
        started_at = %summary.started_at,
        finished_at = %summary.finished_at,
        duration_ms = summary.duration_ms(),
        new_updates = summary.new_updates,
        filtered_out = summary.filtered_out,
        notified = summary.notified,
        channels = ?summary.channels,
        "tick finished"
    );
}

#[cfg(test)]
#[path = "tick_tests.rs"]
mod tests;
