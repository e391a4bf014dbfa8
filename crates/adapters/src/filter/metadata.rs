// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `filter: metadata` — a conjunction of conditions against `item.metadata`.
//!
//! The original prototype's comp validator had its boolean sense inverted
//! (`if validateComp(comp) { return error }`, rejecting every *valid* comp
//! and accepting every invalid one). §9 calls this out explicitly; the
//! correct contract implemented here rejects a comp that is *not* in the
//! recognized set.

use std::sync::Arc;

use keepwatch_core::{BuildError, ConfigError, ContentItem, RawPluginConfig};
use keepwatch_registry::{Filter, FilterFactory};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Equal,
    NotEqual,
    Contains,
    NotContains,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataCondition {
    pub comp: Comparator,
    pub field: String,
    pub value: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    pub conditions: Vec<MetadataCondition>,
}

pub struct MetadataFilter {
    name: String,
    config: MetadataConfig,
}

impl Filter for MetadataFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, item: &ContentItem) -> bool {
        self.config
            .conditions
            .iter()
            .all(|cond| evaluate(cond, item))
    }
}

fn evaluate(cond: &MetadataCondition, item: &ContentItem) -> bool {
    let actual = item.metadata.get(&cond.field);
    match cond.comp {
        Comparator::Equal => actual == Some(&cond.value),
        Comparator::NotEqual => actual != Some(&cond.value),
        Comparator::Contains => match (actual.and_then(Value::as_str), cond.value.as_str()) {
            (Some(haystack), Some(needle)) => haystack.contains(needle),
            _ => false,
        },
        Comparator::NotContains => match (actual.and_then(Value::as_str), cond.value.as_str()) {
            (Some(haystack), Some(needle)) => !haystack.contains(needle),
            _ => false,
        },
    }
}

pub struct MetadataFilterFactory;

impl FilterFactory for MetadataFilterFactory {
    fn tag(&self) -> &'static str {
        "metadata"
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
        Ok(Arc::new(MetadataFilter {
            name: raw.name.clone(),
            config,
        }))
    }
}

fn decode(raw: &RawPluginConfig) -> Result<MetadataConfig, ConfigError> {
    let config: MetadataConfig =
        serde_json::from_value(raw.config.clone()).map_err(|e| invalid(raw, e.to_string()))?;
    for cond in &config.conditions {
        if matches!(cond.comp, Comparator::Contains | Comparator::NotContains)
            && cond.value.as_str().is_none()
        {
            return Err(invalid(
                raw,
                format!("comp {:?} requires a string value", cond.comp),
            ));
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn item(category: &str) -> ContentItem {
        let mut metadata = BTreeMap::new();
        metadata.insert("category".to_string(), Value::String(category.to_string()));
        ContentItem {
            id: "a".to_string(),
            source_id: keepwatch_core::SourceId::new("RSS:feed"),
            title: "title".to_string(),
            description: String::new(),
            url: "https://example.com/a".to_string(),
            author: String::new(),
            platform: "RSS".to_string(),
            published_at: "2026-01-01T00:00:00Z".parse().expect("fixed fixture"),
            updated_at: "2026-01-01T00:00:00Z".parse().expect("fixed fixture"),
            metadata,
        }
    }

    #[test]
    fn unknown_comp_fails_validation() {
        let raw = RawPluginConfig::new(
            "metadata",
            "m",
            json!({"conditions": [{"comp": "startswith", "field": "category", "value": "ga"}]}),
        );
        assert!(MetadataFilterFactory.validate(&raw).is_err());
    }

    #[test]
    fn contains_requires_string_value() {
        let raw = RawPluginConfig::new(
            "metadata",
            "m",
            json!({"conditions": [{"comp": "contains", "field": "category", "value": 1}]}),
        );
        assert!(MetadataFilterFactory.validate(&raw).is_err());
    }

    #[test]
    fn equal_condition_matches_exact_value() {
        let raw = RawPluginConfig::new(
            "metadata",
            "m",
            json!({"conditions": [{"comp": "equal", "field": "category", "value": "ga"}]}),
        );
        let filter = MetadataFilterFactory.build(&raw).expect("builds");
        assert!(filter.apply(&item("ga")));
        assert!(!filter.apply(&item("beta")));
    }

    #[test]
    fn missing_field_fails_equal_and_contains() {
        let raw = RawPluginConfig::new(
            "metadata",
            "m",
            json!({"conditions": [{"comp": "contains", "field": "missing", "value": "x"}]}),
        );
        let filter = MetadataFilterFactory.build(&raw).expect("builds");
        assert!(!filter.apply(&item("ga")));
    }

    #[test]
    fn conditions_are_conjunctive() {
        let raw = RawPluginConfig::new(
            "metadata",
            "m",
            json!({"conditions": [
                {"comp": "equal", "field": "category", "value": "ga"},
                {"comp": "not_equal", "field": "category", "value": "beta"},
            ]}),
        );
        let filter = MetadataFilterFactory.build(&raw).expect("builds");
        assert!(filter.apply(&item("ga")));
    }
}
