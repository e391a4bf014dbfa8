// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use keepwatch_core::{ConfigError, RawPluginConfig, Workflow};
use keepwatch_registry::{merge_default_notifiers, Registry};
use serde_json::Value;

use crate::raw::{DatabaseConfig, RawFile, RawPluginEntry, RawWorkflow};

const DEFAULT_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Everything the daemon needs after a config file has been loaded and
/// defaults-resolved, but before plugin validation (which needs a built
/// `Registry`).
pub struct LoadedConfig {
    pub database: DatabaseConfig,
    pub workflows: Vec<Workflow>,
}

/// Reads and parses the YAML file at `path`, resolves `defaults.interval`
/// and notifier default-merging, and injects `defaults.credentials.*` into
/// source configs that omit them. Does not contact the plugin registry —
/// call [`validate_workflows`] once a `Registry` is available.
pub fn load_config(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let raw: RawFile = serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    let default_interval = resolve_default_interval(raw.defaults.interval.as_deref())?;
    let default_notifiers: Vec<RawPluginConfig> = raw
        .defaults
        .notifiers
        .iter()
        .map(to_raw_plugin_config)
        .collect();
    let youtube_api_key = raw.defaults.credentials.youtube_api_key.clone();

    let mut seen_names = HashSet::new();
    let mut workflows = Vec::with_capacity(raw.workflows.len());
    for wf in &raw.workflows {
        if !seen_names.insert(wf.name.clone()) {
            return Err(ConfigError::Invalid {
                workflow: wf.name.clone(),
                message: "duplicate workflow name".to_string(),
            });
        }
        workflows.push(build_workflow(
            wf,
            default_interval,
            &default_notifiers,
            youtube_api_key.as_deref(),
        )?);
    }

    Ok(LoadedConfig {
        database: raw.database,
        workflows,
    })
}

/// Validates every workflow's plugin configs against a built registry
/// (fatal `ConfigError` on the first failure, per §7), and enforces the
/// "non-empty final notifier list" invariant (§3, §4.2).
pub fn validate_workflows(workflows: &[Workflow], registry: &Registry) -> Result<(), ConfigError> {
    for wf in workflows {
        registry.validate_source(&wf.source)?;
        for filter in &wf.filters {
            registry.validate_filter(filter)?;
        }
        if wf.notifiers.is_empty() {
            return Err(ConfigError::Invalid {
                workflow: wf.name.clone(),
                message: "notifier list is empty after default-merging".to_string(),
            });
        }
        for notifier in &wf.notifiers {
            registry.validate_notifier(notifier)?;
        }
        if wf.interval.is_zero() {
            return Err(ConfigError::Invalid {
                workflow: wf.name.clone(),
                message: "interval must be greater than zero".to_string(),
            });
        }
    }
    Ok(())
}

fn resolve_default_interval(raw: Option<&str>) -> Result<Duration, ConfigError> {
    match raw {
        None => {
            tracing::warn!("defaults.interval absent; using 24h");
            Ok(DEFAULT_INTERVAL)
        }
        Some(text) => {
            let parsed = parse_duration(text)?;
            if parsed.is_zero() {
                tracing::warn!("defaults.interval is zero; using 24h");
                Ok(DEFAULT_INTERVAL)
            } else {
                Ok(parsed)
            }
        }
    }
}

fn parse_duration(text: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(text).map_err(|e| ConfigError::Invalid {
        workflow: String::new(),
        message: format!("invalid duration {text:?}: {e}"),
    })
}

fn to_raw_plugin_config(entry: &RawPluginEntry) -> RawPluginConfig {
    RawPluginConfig::new(entry.type_tag.clone(), entry.name.clone(), entry.config.clone())
}

fn build_workflow(
    wf: &RawWorkflow,
    default_interval: Duration,
    default_notifiers: &[RawPluginConfig],
    youtube_api_key: Option<&str>,
) -> Result<Workflow, ConfigError> {
    let interval = match &wf.interval {
        None => default_interval,
        Some(text) => {
            let parsed = parse_duration(text)?;
            if parsed.is_zero() {
                default_interval
            } else {
                parsed
            }
        }
    };

    let mut source = to_raw_plugin_config(&wf.source);
    if source.type_tag == "youtube" {
        inject_youtube_credential(&mut source, youtube_api_key);
    }

    let filters = wf.filters.iter().map(to_raw_plugin_config).collect();
    let notifiers = merge_default_notifiers(
        wf.notifiers.iter().map(to_raw_plugin_config).collect(),
        default_notifiers,
    );

    Ok(Workflow {
        name: wf.name.clone(),
        enabled: wf.enabled,
        interval,
        source,
        filters,
        notifiers,
    })
}

/// Threads `defaults.credentials.youtube_api_key` into a `youtube` source
/// config that doesn't already specify its own key (§4.2, SPEC_FULL.md §C).
fn inject_youtube_credential(source: &mut RawPluginConfig, youtube_api_key: Option<&str>) {
    let Some(key) = youtube_api_key else {
        return;
    };
    let Value::Object(map) = &mut source.config else {
        let mut map = serde_json::Map::new();
        map.insert("youtube_api_key".to_string(), Value::String(key.to_string()));
        source.config = Value::Object(map);
        return;
    };
    map.entry("youtube_api_key".to_string())
        .or_insert_with(|| Value::String(key.to_string()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_default_interval_falls_back_to_24h_with_warning() {
        assert_eq!(
            resolve_default_interval(None).unwrap(),
            Duration::from_secs(24 * 60 * 60)
        );
    }

    #[test]
    fn zero_default_interval_falls_back_to_24h() {
        assert_eq!(
            resolve_default_interval(Some("0s")).unwrap(),
            Duration::from_secs(24 * 60 * 60)
        );
    }

    #[test]
    fn explicit_default_interval_is_honored() {
        assert_eq!(
            resolve_default_interval(Some("1h")).unwrap(),
            Duration::from_secs(3600)
        );
    }

    #[test]
    fn workflow_zero_interval_inherits_default() {
        let wf = RawWorkflow {
            name: "wf".to_string(),
            enabled: true,
            interval: Some("0s".to_string()),
            source: RawPluginEntry {
                type_tag: "rss".to_string(),
                name: "s".to_string(),
                config: Value::Null,
            },
            filters: vec![],
            notifiers: vec![],
        };
        let workflow = build_workflow(&wf, Duration::from_secs(60), &[], None).unwrap();
        assert_eq!(workflow.interval, Duration::from_secs(60));
    }

    #[test]
    fn youtube_credential_is_injected_when_absent() {
        let mut source = RawPluginConfig::new(
            "youtube",
            "yt",
            serde_json::json!({"channel_id": "abc"}),
        );
        inject_youtube_credential(&mut source, Some("secret"));
        assert_eq!(source.config["youtube_api_key"], "secret");
        assert_eq!(source.config["channel_id"], "abc");
    }

    #[test]
    fn youtube_credential_does_not_override_explicit_key() {
        let mut source = RawPluginConfig::new(
            "youtube",
            "yt",
            serde_json::json!({"channel_id": "abc", "youtube_api_key": "explicit"}),
        );
        inject_youtube_credential(&mut source, Some("from-defaults"));
        assert_eq!(source.config["youtube_api_key"], "explicit");
    }

    #[test]
    fn duplicate_workflow_names_are_rejected() {
        let yaml = r#"
database:
  type: sqlite
  filepath: ":memory:"
workflows:
  - name: dup
    source: { type: rss, name: s, config: { feed_url: "https://example.com/a" } }
    notifiers: [{ type: discord, name: d, config: { url: "https://example.com/hook" } }]
  - name: dup
    source: { type: rss, name: s2, config: { feed_url: "https://example.com/b" } }
    notifiers: [{ type: discord, name: d, config: { url: "https://example.com/hook" } }]
"#;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, yaml).unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
