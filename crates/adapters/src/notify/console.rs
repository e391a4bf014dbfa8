// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `notifier: console` — prints the item to stdout. Carried over from the
//! prototype's local-development notifier (SPEC_FULL.md §C); takes no
//! required config.

use std::sync::Arc;

use async_trait::async_trait;
use keepwatch_core::{BuildError, ConfigError, ContentItem, NotifyError, RawPluginConfig};
use keepwatch_registry::{Notifier, NotifierFactory};

pub struct ConsoleNotifier {
    name: String,
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn notifier_type(&self) -> &str {
        "console"
    }

    async fn send(&self, item: &ContentItem) -> Result<(), NotifyError> {
        println!("new content from {}", item.platform);
        println!("title: {}", item.title);
        println!("author: {}", item.author);
        println!("url: {}", item.url);
        println!("published: {}", item.published_at.to_rfc2822());
        println!("-----------------------------------");
        Ok(())
    }
}

pub struct ConsoleNotifierFactory;

impl NotifierFactory for ConsoleNotifierFactory {
    fn tag(&self) -> &'static str {
        "console"
    }

    fn validate(&self, _raw: &RawPluginConfig) -> Result<(), ConfigError> {
        Ok(())
    }

    fn build(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Notifier>, BuildError> {
        Ok(Arc::new(ConsoleNotifier {
            name: raw.name.clone(),
        }))
    }
}
