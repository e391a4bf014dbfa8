// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The declarative scheduling unit and its heap element.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A single `{type, name, config}` entry from the YAML surface, decoded only
/// as far as the type discriminator and a raw JSON blob. The registry
/// decodes the blob into a concrete shape in a second pass — keeping this
/// decode step separate from plugin-specific validation keeps the error
/// taxonomy (fatal at config time vs. fatal at build time) clean.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPluginConfig {
    pub type_tag: String,
    pub name: String,
    pub config: Value,
}

impl RawPluginConfig {
    pub fn new(type_tag: impl Into<String>, name: impl Into<String>, config: Value) -> Self {
        Self {
            type_tag: type_tag.into(),
            name: name.into(),
            config,
        }
    }
}

/// The declarative unit of scheduling: one source, an ordered filter chain,
/// and a non-empty notifier list. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    pub name: String,
    pub enabled: bool,
    pub interval: Duration,
    pub source: RawPluginConfig,
    pub filters: Vec<RawPluginConfig>,
    pub notifiers: Vec<RawPluginConfig>,
}

/// A heap element combining a workflow with its next fire time. Ordering is
/// defined solely by `next_execution` so the workflow heap (component D)
/// orders the earliest entry to the root regardless of workflow identity.
#[derive(Debug, Clone)]
pub struct ExecutionEntry {
    pub workflow: Arc<Workflow>,
    pub interval: Duration,
    pub next_execution: DateTime<Utc>,
}

impl ExecutionEntry {
    pub fn new(workflow: Arc<Workflow>, now: DateTime<Utc>) -> Self {
        let interval = workflow.interval;
        Self {
            workflow,
            interval,
            next_execution: now,
        }
    }

    /// Anchors the next execution to the end of the current tick, per the
    /// fixed-delay-after-completion semantics (§9 Open Question).
    pub fn reschedule_from(&mut self, tick_end: DateTime<Utc>) {
        self.next_execution = tick_end
            + chrono::Duration::from_std(self.interval).unwrap_or(chrono::Duration::zero());
    }
}

impl PartialEq for ExecutionEntry {
    fn eq(&self, other: &Self) -> bool {
        self.next_execution == other.next_execution
    }
}

impl Eq for ExecutionEntry {}

impl PartialOrd for ExecutionEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ExecutionEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.next_execution.cmp(&other.next_execution)
    }
}
