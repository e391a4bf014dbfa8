// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The shared error taxonomy (§7). Every non-shutdown variant is fatal:
//! it reaches the top of the daemon and ends the process with a non-zero
//! exit code, after a structured log line naming the offending workflow.

use thiserror::Error;

/// Bad YAML, an unknown plugin tag, a missing required field, or an empty
/// notifier list after default-merging. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("workflow {workflow}: {message}")]
    Invalid { workflow: String, message: String },
    #[error("unknown {kind} plugin type {tag:?}")]
    UnknownType { kind: &'static str, tag: String },
    #[error("{kind} {name}: invalid config: {cause}")]
    InvalidPluginConfig {
        kind: &'static str,
        name: String,
        cause: String,
    },
}

/// A plugin constructor rejected its (already-validated) config at tick
/// time. Fatal: aborts the whole scheduler, since it indicates a
/// mis-specified config that slipped validation.
#[derive(Debug, Error)]
#[error("failed to build {kind} {name}: {cause}")]
pub struct BuildError {
    pub kind: &'static str,
    pub name: String,
    pub cause: String,
}

/// Network error, non-200 status, or parse error while fetching a source.
/// Fatal in the current design — surfaces misconfiguration loudly.
#[derive(Debug, Error)]
#[error("source {source_name} ({source_type}): fetch failed: {cause}")]
pub struct FetchError {
    pub source_name: String,
    pub source_type: String,
    pub cause: String,
}

/// A notifier returned an error after retries exhausted. Fatal: items
/// already notified before the failure are not persisted, so on restart
/// they are re-sent once — an accepted trade-off (§7).
#[derive(Debug, Error)]
#[error("notifier {notifier_name} ({notifier_type}): send failed after retries: {cause}")]
pub struct NotifyError {
    pub notifier_name: String,
    pub notifier_type: String,
    pub cause: String,
}

/// A content-store insert failed after retries. Fatal: on restart
/// survivors will be re-notified once (at-least-once).
#[derive(Debug, Error)]
#[error("store insert failed after retries: {cause}")]
pub struct PersistError {
    pub cause: String,
}

/// The top-level error the daemon matches on to pick an exit code and log
/// line. Every variant but `Shutdown` maps to a non-zero exit.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

impl FatalError {
    /// Short, stable tag for the §6 structured end-of-tick / exit log line.
    pub fn kind(&self) -> &'static str {
        match self {
            FatalError::Config(_) => "config",
            FatalError::Build(_) => "build",
            FatalError::Fetch(_) => "fetch",
            FatalError::Notify(_) => "notify",
            FatalError::Persist(_) => "persist",
        }
    }
}
