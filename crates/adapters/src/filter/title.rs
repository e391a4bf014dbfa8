// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `filter: title` — substring / prefix / suffix matching against the
//! item title. At least one condition must be configured (§4.2).

use std::sync::Arc;

use keepwatch_core::{BuildError, ConfigError, ContentItem, RawPluginConfig};
use keepwatch_registry::{Filter, FilterFactory};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleConfig {
    #[serde(default)]
    pub substring: Option<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
}

pub struct TitleFilter {
    name: String,
    config: TitleConfig,
}

impl Filter for TitleFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, item: &ContentItem) -> bool {
        if let Some(substring) = &self.config.substring {
            if !item.title.contains(substring.as_str()) {
                return false;
            }
        }
        if let Some(prefix) = &self.config.prefix {
            if !item.title.starts_with(prefix.as_str()) {
                return false;
            }
        }
        if let Some(suffix) = &self.config.suffix {
            if !item.title.ends_with(suffix.as_str()) {
                return false;
            }
        }
        true
    }
}

pub struct TitleFilterFactory;

impl FilterFactory for TitleFilterFactory {
    fn tag(&self) -> &'static str {
        "title"
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
        Ok(Arc::new(TitleFilter {
            name: raw.name.clone(),
            config,
        }))
    }
}

fn decode(raw: &RawPluginConfig) -> Result<TitleConfig, ConfigError> {
    let config: TitleConfig =
        serde_json::from_value(raw.config.clone()).map_err(|e| invalid(raw, e.to_string()))?;
    if config.substring.is_none() && config.prefix.is_none() && config.suffix.is_none() {
        return Err(invalid(
            raw,
            "at least one of substring, prefix, suffix is required".to_string(),
        ));
    }
    Ok(config)
}

fn invalid(raw: &RawPluginConfig, cause: String) -> ConfigError {
    ConfigError::InvalidPluginConfig {
        kind: "filter",
        name: raw.name.clone(),
        cause,
    }
}
