// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `source: youtube` — polls a channel's uploads via the Data API v3
//! `search` endpoint, ordered newest-first.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use keepwatch_core::{BuildError, ConfigError, ContentItem, FetchError, RawPluginConfig, SourceId};
use keepwatch_registry::{Source, SourceFactory};
use serde::Deserialize;

use crate::http::shared_client;

#[derive(Debug, Clone, Deserialize)]
pub struct YoutubeConfig {
    pub channel_id: String,
    #[serde(default)]
    pub youtube_api_key: Option<String>,
}

pub struct YoutubeSource {
    name: String,
    config: YoutubeConfig,
    source_id: SourceId,
}

#[async_trait]
impl Source for YoutubeSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_type(&self) -> &str {
        "youtube"
    }

    fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    async fn fetch(&self) -> Result<Vec<ContentItem>, FetchError> {
        let err = |cause: String| FetchError {
            source_name: self.name.clone(),
            source_type: "youtube".to_string(),
            cause,
        };
        let api_key = self.config.youtube_api_key.as_deref().ok_or_else(|| {
            err("no youtube_api_key configured and no default.credentials.youtube_api_key set".to_string())
        })?;

        let url = format!(
            "https://www.googleapis.com/youtube/v3/search?key={}&channelId={}&part=snippet&order=date&type=video&maxResults=25",
            api_key, self.config.channel_id,
        );

        let response = shared_client()
            .get(&url)
            .send()
            .await
            .map_err(|e| err(e.to_string()))?;
        if !response.status().is_success() {
            return Err(err(format!("non-200 status: {}", response.status())));
        }
        let body: YoutubeSearchResponse = response.json().await.map_err(|e| err(e.to_string()))?;

        let items = body
            .items
            .into_iter()
            .filter_map(|entry| {
                let video_id = entry.id.video_id?;
                let published_at = entry.snippet.published_at;
                Some(ContentItem {
                    id: video_id.clone(),
                    source_id: self.source_id.clone(),
                    title: entry.snippet.title,
                    description: entry.snippet.description,
                    url: format!("https://www.youtube.com/watch?v={video_id}"),
                    author: entry.snippet.channel_title,
                    platform: "YouTube".to_string(),
                    published_at,
                    updated_at: published_at,
                    metadata: BTreeMap::new(),
                })
            })
            .collect();
        Ok(items)
    }
}

#[derive(Debug, Deserialize)]
struct YoutubeSearchResponse {
    items: Vec<YoutubeSearchItem>,
}

#[derive(Debug, Deserialize)]
struct YoutubeSearchItem {
    id: YoutubeSearchItemId,
    snippet: YoutubeSnippet,
}

#[derive(Debug, Deserialize)]
struct YoutubeSearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YoutubeSnippet {
    title: String,
    description: String,
    #[serde(rename = "channelTitle")]
    channel_title: String,
    #[serde(rename = "publishedAt")]
    published_at: DateTime<Utc>,
}

pub struct YoutubeSourceFactory;

impl SourceFactory for YoutubeSourceFactory {
    fn tag(&self) -> &'static str {
        "youtube"
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
        let source_id = SourceId::new(format!("YouTube:{}", config.channel_id));
        Ok(Arc::new(YoutubeSource {
            name: raw.name.clone(),
            config,
            source_id,
        }))
    }
}

fn decode(raw: &RawPluginConfig) -> Result<YoutubeConfig, ConfigError> {
    let config: YoutubeConfig =
        serde_json::from_value(raw.config.clone()).map_err(|e| invalid(raw, e.to_string()))?;
    if config.channel_id.trim().is_empty() {
        return Err(invalid(raw, "channel_id is required".to_string()));
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
