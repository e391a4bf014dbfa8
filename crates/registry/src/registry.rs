// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::collections::HashMap;
use std::sync::Arc;

use keepwatch_core::{BuildError, ConfigError, RawPluginConfig};

use crate::factory::{FilterFactory, NotifierFactory, SourceFactory};
use crate::traits::{Filter, Notifier, Source};

/// Holds one factory per recognized type tag, per kind. Built once at
/// startup by the daemon (which registers the concrete adapter factories)
/// and never mutated afterwards.
#[derive(Default)]
pub struct Registry {
    sources: HashMap<&'static str, Box<dyn SourceFactory>>,
    filters: HashMap<&'static str, Box<dyn FilterFactory>>,
    notifiers: HashMap<&'static str, Box<dyn NotifierFactory>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_source(&mut self, factory: Box<dyn SourceFactory>) {
        self.sources.insert(factory.tag(), factory);
    }

    pub fn register_filter(&mut self, factory: Box<dyn FilterFactory>) {
        self.filters.insert(factory.tag(), factory);
    }

    pub fn register_notifier(&mut self, factory: Box<dyn NotifierFactory>) {
        self.notifiers.insert(factory.tag(), factory);
    }

    pub fn validate_source(&self, raw: &RawPluginConfig) -> Result<(), ConfigError> {
        self.sources
            .get(raw.type_tag.as_str())
            .ok_or_else(|| unknown_type("source", raw))?
            .validate(raw)
    }

    pub fn validate_filter(&self, raw: &RawPluginConfig) -> Result<(), ConfigError> {
        self.filters
            .get(raw.type_tag.as_str())
            .ok_or_else(|| unknown_type("filter", raw))?
            .validate(raw)
    }

    pub fn validate_notifier(&self, raw: &RawPluginConfig) -> Result<(), ConfigError> {
        self.notifiers
            .get(raw.type_tag.as_str())
            .ok_or_else(|| unknown_type("notifier", raw))?
            .validate(raw)
    }

    pub fn build_source(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Source>, BuildError> {
        self.sources
            .get(raw.type_tag.as_str())
            .ok_or_else(|| missing_factory("source", raw))?
            .build(raw)
    }

    pub fn build_filter(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Filter>, BuildError> {
        self.filters
            .get(raw.type_tag.as_str())
            .ok_or_else(|| missing_factory("filter", raw))?
            .build(raw)
    }

    pub fn build_notifier(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Notifier>, BuildError> {
        self.notifiers
            .get(raw.type_tag.as_str())
            .ok_or_else(|| missing_factory("notifier", raw))?
            .build(raw)
    }
}

fn unknown_type(kind: &'static str, raw: &RawPluginConfig) -> ConfigError {
    ConfigError::UnknownType {
        kind,
        tag: raw.type_tag.clone(),
    }
}

/// A tag that passed startup validation but has no registered factory at
/// tick time would indicate the registry was rebuilt inconsistently
/// between validate and build — a programming error, surfaced the same way
/// a constructor rejection would be.
fn missing_factory(kind: &'static str, raw: &RawPluginConfig) -> BuildError {
    BuildError {
        kind,
        name: raw.name.clone(),
        cause: format!("no factory registered for tag {:?}", raw.type_tag),
    }
}
