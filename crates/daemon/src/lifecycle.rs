// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process startup: load config, build the registry, validate every
//! workflow's plugin configs against it, open the content store, and seed
//! the workflow heap with one entry per enabled workflow at `now` (§4.8).

use std::path::Path;
use std::sync::Arc;

use keepwatch_config::load_config;
use keepwatch_core::{Clock, ConfigError, ExecutionEntry, PersistError, ShutdownSignal, SystemClock};
use keepwatch_engine::{Engine, WorkflowHeap};
use keepwatch_registry::Registry;
use keepwatch_storage::SqliteContentStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] PersistError),
    #[error("database.type {0:?} is not supported (only \"sqlite\")")]
    UnsupportedDatabase(String),
    #[error("database.filepath is required for the sqlite backend")]
    MissingDatabasePath,
}

pub struct StartupResult {
    pub engine: Engine,
    pub heap: WorkflowHeap,
    pub shutdown: ShutdownSignal,
}

/// Runs the full startup sequence described in §6/§7: read and parse the
/// YAML file, resolve defaults, register the built-in adapters, validate
/// every workflow against the registry, open the store, and build the
/// initial heap with every enabled workflow due immediately.
pub async fn startup(config_path: &Path) -> Result<StartupResult, LifecycleError> {
    let loaded = load_config(config_path)?;

    let mut registry = Registry::new();
    keepwatch_adapters::register_all(&mut registry);
    keepwatch_config::validate_workflows(&loaded.workflows, &registry)?;

    if loaded.database.db_type != "sqlite" {
        return Err(LifecycleError::UnsupportedDatabase(loaded.database.db_type));
    }
    let filepath = loaded
        .database
        .filepath
        .as_deref()
        .ok_or(LifecycleError::MissingDatabasePath)?;
    let store = SqliteContentStore::open(Path::new(filepath))?;

    let clock = Arc::new(SystemClock);
    let now = clock.now();
    let heap: WorkflowHeap = loaded
        .workflows
        .into_iter()
        .filter(|wf| wf.enabled)
        .map(|wf| ExecutionEntry::new(Arc::new(wf), now))
        .collect();

    let registry = Arc::new(registry);
    let store: Arc<dyn keepwatch_storage::ContentStore> = Arc::new(store);
    let engine = Engine::new(registry, store, clock);

    Ok(StartupResult {
        engine,
        heap,
        shutdown: ShutdownSignal::new(),
    })
}
