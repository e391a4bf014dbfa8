// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One factory per recognized type tag. `validate` is cheap and runs once
//! at startup over every workflow's configs (fatal `ConfigError` on
//! failure); `build` runs once per tick per workflow (fatal `BuildError`
//! on failure).

use std::sync::Arc;

use keepwatch_core::{BuildError, ConfigError, RawPluginConfig};

use crate::traits::{Filter, Notifier, Source};

pub trait SourceFactory: Send + Sync {
    fn tag(&self) -> &'static str;
    fn validate(&self, raw: &RawPluginConfig) -> Result<(), ConfigError>;
    fn build(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Source>, BuildError>;
}

pub trait FilterFactory: Send + Sync {
    fn tag(&self) -> &'static str;
    fn validate(&self, raw: &RawPluginConfig) -> Result<(), ConfigError>;
    fn build(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Filter>, BuildError>;
}

pub trait NotifierFactory: Send + Sync {
    fn tag(&self) -> &'static str;
    fn validate(&self, raw: &RawPluginConfig) -> Result<(), ConfigError>;
    fn build(&self, raw: &RawPluginConfig) -> Result<Arc<dyn Notifier>, BuildError>;
}
