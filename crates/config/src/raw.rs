// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Direct mirror of the YAML surface described in §6, decoded by serde
//! before any defaults resolution or plugin dispatch happens.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(crate) struct RawFile {
    #[serde(default)]
    pub defaults: RawDefaults,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub workflows: Vec<RawWorkflow>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawDefaults {
    pub interval: Option<String>,
    #[serde(default)]
    pub credentials: RawCredentials,
    #[serde(default)]
    pub notifiers: Vec<RawPluginEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawCredentials {
    pub youtube_api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawWorkflow {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub interval: Option<String>,
    pub source: RawPluginEntry,
    #[serde(default)]
    pub filters: Vec<RawPluginEntry>,
    #[serde(default)]
    pub notifiers: Vec<RawPluginEntry>,
}

fn default_enabled() -> bool {
    true
}

/// One `{type, name, config}` entry shared by sources, filters and
/// notifiers in the YAML surface.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawPluginEntry {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "Value::default")]
    pub config: Value,
}

/// `database: { type, filepath }`. Only `type: sqlite` is implemented;
/// other fields are reserved for future backends per §6.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {

    #[serde(rename = "type")]
    pub db_type: String,
    pub filepath: Option<String>,
}
