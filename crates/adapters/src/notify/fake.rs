// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory notifiers for engine and integration tests: a [`FakeNotifier`]
//! that records every send and can be told to fail its next N attempts,
//! and a [`NoopNotifier`] that always succeeds silently.

use std::sync::Arc;

use async_trait::async_trait;
use keepwatch_core::{BuildError, ConfigError, ContentItem, NotifyError, RawPluginConfig};
use keepwatch_registry::{Notifier, NotifierFactory};
use parking_lot::Mutex;

#[derive(Default)]
pub struct FakeNotifier {
    name: String,
    sent: Mutex<Vec<String>>,
    remaining_failures: Mutex<u32>,
}

impl FakeNotifier {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            sent: Mutex::new(Vec::new()),
            remaining_failures: Mutex::new(0),
        })
    }

    /// The next `count` `send` calls fail; calls after that succeed.
    pub fn fail_next(&self, count: u32) {
        *self.remaining_failures.lock() = count;
    }

    /// Item ids sent successfully, in call order.
    pub fn sent_ids(&self) -> Vec<String> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn notifier_type(&self) -> &str {
        "fake"
    }

    async fn send(&self, item: &ContentItem) -> Result<(), NotifyError> {
        let mut remaining = self.remaining_failures.lock();
        if *remaining > 0 {
            *remaining -= 1;
            return Err(NotifyError {
                notifier_name: self.name.clone(),
                notifier_type: "fake".to_string(),
                cause: "simulated transient failure".to_string(),
            });
        }
        drop(remaining);
        self.sent.lock().push(item.id.clone());
        Ok(())
    }
}

pub struct FakeNotifierFactory;

impl NotifierFactory for FakeNotifierFactory {
    fn tag(&self) -> &'static str {
        "fake"
    }

    fn validate(&self, _raw: &RawPluginConfig) -> Result<(), ConfigError> {
        Ok(())
    }

    fn build(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Notifier>, BuildError> {
        Ok(FakeNotifier::new(raw.name.clone()))
    }
}

pub struct NoopNotifier {
    name: String,
}

impl NoopNotifier {
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self { name: name.into() })
    }
}

#[async_trait]
impl Notifier for NoopNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn notifier_type(&self) -> &str {
        "noop"
    }

    async fn send(&self, _item: &ContentItem) -> Result<(), NotifyError> {
        Ok(())
    }
}

pub struct NoopNotifierFactory;

impl NotifierFactory for NoopNotifierFactory {
    fn tag(&self) -> &'static str {
        "noop"
    }

    fn validate(&self, _raw: &RawPluginConfig) -> Result<(), ConfigError> {
        Ok(())
    }

    fn build(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Notifier>, BuildError> {
        Ok(NoopNotifier::new(raw.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            source_id: keepwatch_core::SourceId::new("Fake:t"),
            title: "t".to_string(),
            description: String::new(),
            url: String::new(),
            author: String::new(),
            platform: "Fake".to_string(),
            published_at: "2026-01-01T00:00:00Z".parse().expect("fixed fixture"),
            updated_at: "2026-01-01T00:00:00Z".parse().expect("fixed fixture"),
            metadata: Default::default(),
        }
    }

    #[tokio::test]
    async fn fails_configured_number_of_times_then_succeeds() {
        let notifier = FakeNotifier::new("n");
        notifier.fail_next(2);
        assert!(notifier.send(&item("a")).await.is_err());
        assert!(notifier.send(&item("a")).await.is_err());
        assert!(notifier.send(&item("a")).await.is_ok());
        assert_eq!(notifier.sent_ids(), vec!["a".to_string()]);
    }
}
