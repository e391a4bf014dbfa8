// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use keepwatch_core::{ContentItem, PersistError, SourceId};

/// The content-store contract consumed by the workflow engine (§4.4).
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// The newest `published_at` previously stored for `source_id`, or
    /// `None` if the source has never been recorded. Used only to detect
    /// "new source" during bootstrap (§4.6 step 2).
    async fn latest_published(
        &self,
        source_id: &SourceId,
    ) -> Result<Option<DateTime<Utc>>, PersistError>;

    /// The subset of `ids` already stored under `source_id` — the dedup
    /// primitive (§4.6 step 5).
    async fn lookup_existing(
        &self,
        source_id: &SourceId,
        ids: &[String],
    ) -> Result<HashSet<String>, PersistError>;

    /// Atomically inserts new items. Fails on primary-key collision: the
    /// engine only ever calls this with items that already passed
    /// `lookup_existing`, so a collision here is a programming error.
    async fn insert_many(&self, items: &[ContentItem]) -> Result<(), PersistError>;
}
