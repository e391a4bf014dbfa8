// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `source: rss` — polls an arbitrary RSS/Atom feed.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use keepwatch_core::{BuildError, ConfigError, ContentItem, FetchError, RawPluginConfig, SourceId};
use keepwatch_registry::{Source, SourceFactory};
use serde::Deserialize;

use crate::http::shared_client;

#[derive(Debug, Clone, Deserialize)]
pub struct RssConfig {
    pub feed_url: String,
}

pub struct RssSource {
    name: String,
    config: RssConfig,
    source_id: SourceId,
}

#[async_trait]
impl Source for RssSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_type(&self) -> &str {
        "rss"
    }

    fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    async fn fetch(&self) -> Result<Vec<ContentItem>, FetchError> {
        let err = |cause: String| FetchError {
            source_name: self.name.clone(),
            source_type: "rss".to_string(),
            cause,
        };

        let response = shared_client()
            .get(&self.config.feed_url)
            .send()
            .await
            .map_err(|e| err(e.to_string()))?;
        if !response.status().is_success() {
            return Err(err(format!("non-200 status: {}", response.status())));
        }
        let bytes = response.bytes().await.map_err(|e| err(e.to_string()))?;
        let feed = feed_rs::parser::parse(&bytes[..]).map_err(|e| err(e.to_string()))?;

        let items = feed
            .entries
            .into_iter()
            .map(|entry| {
                let published_at = entry
                    .published
                    .or(entry.updated)
                    .unwrap_or_else(Utc::now);
                let title = entry
                    .title
                    .map(|t| t.content)
                    .unwrap_or_else(|| "(untitled)".to_string());
                let description = entry
                    .summary
                    .map(|s| s.content)
                    .unwrap_or_default();
                let url = entry
                    .links
                    .first()
                    .map(|l| l.href.clone())
                    .unwrap_or_default();
                let author = entry
                    .authors
                    .first()
                    .map(|a| a.name.clone())
                    .unwrap_or_default();
                ContentItem {
                    id: entry.id,
                    source_id: self.source_id.clone(),
                    title,
                    description,
                    url,
                    author,
                    platform: "RSS".to_string(),
                    published_at,
                    updated_at: published_at,
                    metadata: BTreeMap::new(),
                }
            })
            .collect();
        Ok(items)
    }
}

pub struct RssSourceFactory;

impl SourceFactory for RssSourceFactory {
    fn tag(&self) -> &'static str {
        "rss"
    }

    fn validate(&self, raw: &RawPluginConfig) -> Result<(), ConfigError> {
        decode(raw).map(|_| ())
    }

    fn build(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Source>, BuildError> {
        let config = decode(raw).map_err(|e| BuildError {
            kind: "source",
            name: raw.name.clone(),
            cause: e.to_string(),
        })?;
        let source_id = SourceId::new(format!("RSS:{}", config.feed_url));
        Ok(Arc::new(RssSource {
            name: raw.name.clone(),
            config,
            source_id,
        }))
    }
}

fn decode(raw: &RawPluginConfig) -> Result<RssConfig, ConfigError> {
    let config: RssConfig =
        serde_json::from_value(raw.config.clone()).map_err(|e| invalid(raw, e.to_string()))?;
    if url::Url::parse(&config.feed_url).is_err() {
        return Err(invalid(raw, format!("feed_url {:?} is not a valid URL", config.feed_url)));
    }
    Ok(config)
}

fn invalid(raw: &RawPluginConfig, cause: String) -> ConfigError {
    ConfigError::InvalidPluginConfig {
        kind: "source",
        name: raw.name.clone(),
        cause,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn source_id_is_derived_from_feed_url() {
        let raw = RawPluginConfig::new(
            "rss",
            "a",
            json!({"feed_url": "https://example.com/feed.xml"}),
        );
        let factory = RssSourceFactory;
        let source = factory.build(&raw).expect("builds");
        assert_eq!(source.source_id().as_str(), "RSS:https://example.com/feed.xml");
    }

    #[test]
    fn malformed_url_fails_validation() {
        let raw = RawPluginConfig::new("rss", "a", json!({"feed_url": "not a url"}));
        let factory = RssSourceFactory;
        assert!(factory.validate(&raw).is_err());
    }
}
