// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `notifier: ntfy` — publishes to an ntfy topic via its HTTP publish API.

use std::sync::Arc;

use async_trait::async_trait;
use keepwatch_core::{BuildError, ConfigError, ContentItem, NotifyError, RawPluginConfig};
use keepwatch_registry::{Notifier, NotifierFactory};
use serde::Deserialize;

use crate::http::shared_client;

#[derive(Debug, Clone, Deserialize)]
pub struct NtfyConfig {
    pub base_url: String,
    pub topic: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

pub struct NtfyNotifier {
    name: String,
    config: NtfyConfig,
}

#[async_trait]
impl Notifier for NtfyNotifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn notifier_type(&self) -> &str {
        "ntfy"
    }

    async fn send(&self, item: &ContentItem) -> Result<(), NotifyError> {
        let err = |cause: String| NotifyError {
            notifier_name: self.name.clone(),
            notifier_type: "ntfy".to_string(),
            cause,
        };

        let publish_url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.topic
        );

        let mut request = shared_client()
            .post(&publish_url)
            .header("Accept", "application/json")
            .header("X-Message", item.title.clone())
            .header(
                "X-Title",
                format!("New update from {} ({})", item.author, item.platform),
            )
            .header("X-Click", item.url.clone());

        if let Some(priority) = &self.config.priority {
            request = request.header("X-Priority", priority.clone());
        }
        if let Some(token) = &self.config.access_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| err(e.to_string()))?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(err(format!("received status {status}: {body}")));
        }
        Ok(())
    }
}

pub struct NtfyNotifierFactory;

impl NotifierFactory for NtfyNotifierFactory {
    fn tag(&self) -> &'static str {
        "ntfy"
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
        Ok(Arc::new(NtfyNotifier {
            name: raw.name.clone(),
            config,
        }))
    }
}

fn decode(raw: &RawPluginConfig) -> Result<NtfyConfig, ConfigError> {
    let config: NtfyConfig =
        serde_json::from_value(raw.config.clone()).map_err(|e| invalid(raw, e.to_string()))?;
    if url::Url::parse(&config.base_url).is_err() {
        return Err(invalid(
            raw,
            format!("base_url {:?} is not a valid URL", config.base_url),
        ));
    }
    if config.topic.trim().is_empty() {
        return Err(invalid(raw, "topic is required".to_string()));
    }
    if config.access_token.is_none() {
        tracing::warn!(
            notifier = raw.name,
            "no access_token configured, publishing might fail if the host requires authentication"
        );
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
