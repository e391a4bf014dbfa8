// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `notifier: discord` — posts an embed to a Discord webhook URL.

use std::sync::Arc;

use async_trait::async_trait;
use keepwatch_core::{BuildError, ConfigError, ContentItem, NotifyError, RawPluginConfig};
use keepwatch_registry::{Notifier, NotifierFactory};
use serde::{Deserialize, Serialize};

use crate::http::shared_client;

const EMBED_COLOR: u32 = 0xDBDE5B;

#[derive(Debug, Clone, Deserialize)]
pub struct DiscordConfig {
    pub url: String,
}

pub struct DiscordNotifier {
    name: String,
    config: DiscordConfig,
}

#[async_trait]
impl Notifier for DiscordNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn notifier_type(&self) -> &str {
        "discord"
    }

    async fn send(&self, item: &ContentItem) -> Result<(), NotifyError> {
        let err = |cause: String| NotifyError {
            notifier_name: self.name.clone(),
            notifier_type: "discord".to_string(),
            cause,
        };

        let payload = WebhookPayload {
            embeds: vec![Embed {
                title: item.title.clone(),
                description: item.description.clone(),
                url: item.url.clone(),
                color: EMBED_COLOR,
                author: EmbedAuthor {
                    name: item.author.clone(),
                },
                footer: EmbedFooter {
                    text: item.platform.clone(),
                },
                timestamp: item.published_at,
            }],
        };

        let response = shared_client()
            .post(&self.config.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| err(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(err(format!("received status {status}: {body}")));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload {
    embeds: Vec<Embed>,
}

#[derive(Debug, Serialize)]
struct Embed {
    title: String,
    description: String,
    url: String,
    color: u32,
    author: EmbedAuthor,
    footer: EmbedFooter,
    timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize)]
struct EmbedAuthor {
    name: String,
}

#[derive(Debug, Serialize)]
struct EmbedFooter {
    text: String,
}

pub struct DiscordNotifierFactory;

impl NotifierFactory for DiscordNotifierFactory {
    fn tag(&self) -> &'static str {
        "discord"
    }

    fn validate(&self, raw: &RawPluginConfig) -> Result<(), ConfigError> {
        decode(raw).map(|_| ())
    }

    fn build(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Notifier>, BuildError> {
        let config = decode(raw).map_err(|e| BuildError {
            kind: "notifier",
            name: raw.name.clone(),
            cause: e.to_string(),
        })?;
        Ok(Arc::new(DiscordNotifier {
            name: raw.name.clone(),
            config,
        }))
    }
}

fn decode(raw: &RawPluginConfig) -> Result<DiscordConfig, ConfigError> {
    let config: DiscordConfig =
        serde_json::from_value(raw.config.clone()).map_err(|e| invalid(raw, e.to_string()))?;
    if url::Url::parse(&config.url).is_err() {
        return Err(invalid(raw, format!("url {:?} is not a valid URL", config.url)));
    }
    Ok(config)
}

fn invalid(raw: &RawPluginConfig, cause: String) -> ConfigError {
    ConfigError::InvalidPluginConfig {
        kind: "notifier",
        name: raw.name.clone(),
        cause,
    }
}
