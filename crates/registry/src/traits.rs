// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The three plugin capability contracts (§4.3).

use async_trait::async_trait;
use keepwatch_core::{ContentItem, FetchError, NotifyError, SourceId};

/// A content source. `fetch` must be idempotent in effect and must return
/// items with non-empty `id`; items may be returned in any order.
#[async_trait]
pub trait Source: Send + Sync {
    fn name(&self) -> &str;
    fn source_type(&self) -> &str;
    /// Stable across restarts for the same configured identity — the
    /// dedup partition key. Must never be derived from a mutable field
    /// such as `name` (§9).
    fn source_id(&self) -> &SourceId;
    async fn fetch(&self) -> Result<Vec<ContentItem>, FetchError>;
}

/// A filter. Must be a pure function of the item — no cross-tick state.
pub trait Filter: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, item: &ContentItem) -> bool;
}

/// A notification channel. `send` should be reasonably idempotent because
/// of the retry wrapper (component E); the engine makes no delivery-dedup
/// effort beyond bounded retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;
    fn notifier_type(&self) -> &str;
    async fn send(&self, item: &ContentItem) -> Result<(), NotifyError>;
}
