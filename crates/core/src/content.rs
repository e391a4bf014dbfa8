// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The normalized content item emitted by every source adapter.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::SourceId;

/// A single unit of content fetched from a source, normalized across
/// platforms. `(source_id, id)` is the dedup key and must be globally
/// unique in the content store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique within `source_id`; assigned by the originating platform.
    pub id: String,
    pub source_id: SourceId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub author: String,
    /// Human-readable origin tag, e.g. `"Reddit"`, `"YouTube"`, `"RSS"`.
    pub platform: String,
    pub published_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Open mapping from string to arbitrary scalar/string, used by the
    /// `metadata` filter.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl ContentItem {
    /// Shorthand used by log lines that reference an item without dumping
    /// its full payload.
    pub fn log_label(&self) -> String {
        format!("{}:{}", self.platform, self.title)
    }
}
