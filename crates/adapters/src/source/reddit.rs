// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `source: reddit` — polls a subreddit's public JSON listing.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use keepwatch_core::{BuildError, ConfigError, ContentItem, FetchError, RawPluginConfig, SourceId};
use keepwatch_registry::{Source, SourceFactory};
use serde::Deserialize;

use crate::http::shared_client;

#[derive(Debug, Clone, Deserialize)]
pub struct RedditConfig {
    pub subreddit: String,
    #[serde(default)]
    pub username: Option<String>,
}

pub struct RedditSource {
    name: String,
    config: RedditConfig,
    source_id: SourceId,
}

#[async_trait]
impl Source for RedditSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_type(&self) -> &str {
        "reddit"
    }

    fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    async fn fetch(&self) -> Result<Vec<ContentItem>, FetchError> {
        let url = format!(
            "https://www.reddit.com/r/{}/new.json?limit=25",
            self.config.subreddit
        );
        let err = |cause: String| FetchError {
            source_name: self.name.clone(),
            source_type: "reddit".to_string(),
            cause,
        };

        let response = shared_client()
            .get(&url)
            .send()
            .await
            .map_err(|e| err(e.to_string()))?;
        if !response.status().is_success() {
            return Err(err(format!("non-200 status: {}", response.status())));
        }
        let body: RedditListing = response.json().await.map_err(|e| err(e.to_string()))?;

        let items = body
            .data
            .children
            .into_iter()
            .map(|child| {
                let post = child.data;
                let published_at = Utc
                    .timestamp_opt(post.created_utc as i64, 0)
                    .single()
                    .unwrap_or_else(Utc::now);
                ContentItem {
                    id: post.id,
                    source_id: self.source_id.clone(),
                    title: post.title,
                    description: post.selftext.unwrap_or_default(),
                    url: format!("https://www.reddit.com{}", post.permalink),
                    author: post.author,
                    platform: "Reddit".to_string(),
                    published_at,
                    updated_at: published_at,
                    metadata: BTreeMap::new(),
                }
            })
            .collect();
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct RedditListing {
    data: RedditListingData,
}

#[derive(Debug, Deserialize)]
struct RedditListingData {
    children: Vec<RedditChild>,
}

#[derive(Debug, Deserialize)]
struct RedditChild {
    data: RedditPost,
}

#[derive(Debug, Deserialize)]
struct RedditPost {
    id: String,
    title: String,
    #[serde(default)]
    selftext: Option<String>,
    permalink: String,
    author: String,
    created_utc: f64,
}

pub struct RedditSourceFactory;

impl SourceFactory for RedditSourceFactory {
    fn tag(&self) -> &'static str {
        "reddit"
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
        let source_id = SourceId::new(format!("Reddit:{}", config.subreddit));
        Ok(Arc::new(RedditSource {
            name: raw.name.clone(),
            config,
            source_id,
        }))
    }
}

fn decode(raw: &RawPluginConfig) -> Result<RedditConfig, ConfigError> {
    let config: RedditConfig =
        serde_json::from_value(raw.config.clone()).map_err(|e| invalid(raw, e.to_string()))?;
    if config.subreddit.trim().is_empty() {
        return Err(invalid(raw, "subreddit is required".to_string()));
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
    fn source_id_is_stable_for_same_subreddit() {
        let raw = RawPluginConfig::new("reddit", "a", json!({"subreddit": "rust"}));
        let factory = RedditSourceFactory;
        let a = factory.build(&raw).expect("builds");
        let b = factory.build(&raw).expect("builds");
        assert_eq!(a.source_id(), b.source_id());
        assert_eq!(a.source_id().as_str(), "Reddit:rust");
    }

    #[test]
    fn missing_subreddit_fails_validation() {
        let raw = RawPluginConfig::new("reddit", "a", json!({}));
        let factory = RedditSourceFactory;
        assert!(factory.validate(&raw).is_err());
    }
}
