// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A deterministic in-memory source, for engine and integration tests.
//! Not reachable from the production registry: only registered when a
//! test opts in via [`crate::register_test_fakes`].

use std::sync::Arc;

use async_trait::async_trait;
use keepwatch_core::{BuildError, ConfigError, ContentItem, FetchError, RawPluginConfig, SourceId};
use keepwatch_registry::{Source, SourceFactory};
use parking_lot::Mutex;

/// Returns a fixed, pre-seeded batch of items on every `fetch`, or a fixed
/// error if one has been configured. `fetch` does not consume or mutate
/// the seeded batch — tests control what the next tick sees by replacing
/// the whole fixture via [`FakeSource::set_items`].
pub struct FakeSource {
    name: String,
    source_id: SourceId,
    items: Mutex<Vec<ContentItem>>,
    error: Mutex<Option<String>>,
}

impl FakeSource {
    pub fn new(name: impl Into<String>, source_id: impl Into<SourceId>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            source_id: source_id.into(),
            items: Mutex::new(Vec::new()),
            error: Mutex::new(None),
        })
    }

    pub fn set_items(&self, items: Vec<ContentItem>) {
        *self.items.lock() = items;
    }

    pub fn fail_next_fetch(&self, cause: impl Into<String>) {
        *self.error.lock() = Some(cause.into());
    }
}

#[async_trait]
impl Source for FakeSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_type(&self) -> &str {
        "fake"
    }

    fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    async fn fetch(&self) -> Result<Vec<ContentItem>, FetchError> {
        if let Some(cause) = self.error.lock().take() {
            return Err(FetchError {
                source_name: self.name.clone(),
                source_type: "fake".to_string(),
                cause,
            });
        }
        Ok(self.items.lock().clone())
    }
}

pub struct FakeSourceFactory;

impl SourceFactory for FakeSourceFactory {
    fn tag(&self) -> &'static str {
        "fake"
    }

    fn validate(&self, _raw: &RawPluginConfig) -> Result<(), ConfigError> {
        Ok(())
    }

    fn build(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Source>, BuildError> {
        Ok(FakeSource::new(raw.name.clone(), SourceId::new(format!("Fake:{}", raw.name))))
    }
}
