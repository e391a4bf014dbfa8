// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `filter: keyword` — case-insensitive substring match against the title,
//! OR-combined over a keyword list. Vacuously true when the list is empty.
//!
//! Not one of the recognized tags in §4.2's table, but genuine behavior
//! carried over from the prototype's `KeywordFilter` (SPEC_FULL.md §C);
//! the registry's tagged-variant design accommodates it without touching
//! the required tags.

use std::sync::Arc;

use keepwatch_core::{BuildError, ConfigError, ContentItem, RawPluginConfig};
use keepwatch_registry::{Filter, FilterFactory};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeywordConfig {
    #[serde(default)]
    pub keywords: Vec<String>,
}

pub struct KeywordFilter {
    name: String,
    config: KeywordConfig,
}

impl Filter for KeywordFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, item: &ContentItem) -> bool {
        if self.config.keywords.is_empty() {
            return true;
        }
        let title = item.title.to_lowercase();
        self.config
            .keywords
            .iter()
            .any(|keyword| title.contains(&keyword.to_lowercase()))
    }
}

pub struct KeywordFilterFactory;

impl FilterFactory for KeywordFilterFactory {
    fn tag(&self) -> &'static str {
        "keyword"
    }

    fn validate(&self, raw: &RawPluginConfig) -> Result<(), ConfigError> {
        decode(raw).map(|_| ())
    }

    fn build(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Filter>, BuildError> {
        let config = decode(raw).map_err(|e| BuildError {
            kind: "filter",
            name: raw.name.clone(),
            cause: e.to_string(),
        })?;
        Ok(Arc::new(KeywordFilter {
            name: raw.name.clone(),
            config,
        }))
    }
}

fn decode(raw: &RawPluginConfig) -> Result<KeywordConfig, ConfigError> {
    serde_json::from_value(raw.config.clone()).map_err(|e| ConfigError::InvalidPluginConfig {
        kind: "filter",
        name: raw.name.clone(),
        cause: e.to_string(),
    })
}
