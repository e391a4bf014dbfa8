// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Concrete source / filter / notifier adapters, and their registry
//! factories. The engine and daemon never reference these types directly —
//! only through the `keepwatch-registry` trait objects `register_all`
//! wires into a `Registry`.

mod http;

pub mod filter;
pub mod notify;
pub mod source;

use keepwatch_registry::Registry;

/// Registers every built-in source, filter and notifier factory. Called
/// once at daemon startup before any config validation happens.
pub fn register_all(registry: &mut Registry) {
    registry.register_source(Box::new(source::reddit::RedditSourceFactory));
    registry.register_source(Box::new(source::youtube::YoutubeSourceFactory));
    registry.register_source(Box::new(source::rss::RssSourceFactory));

    registry.register_filter(Box::new(filter::title::TitleFilterFactory));
    registry.register_filter(Box::new(filter::metadata::MetadataFilterFactory));
    registry.register_filter(Box::new(filter::keyword::KeywordFilterFactory));

    registry.register_notifier(Box::new(notify::discord::DiscordNotifierFactory));
    registry.register_notifier(Box::new(notify::ntfy::NtfyNotifierFactory));
    registry.register_notifier(Box::new(notify::console::ConsoleNotifierFactory));
}

/// Additionally registers the `fake` source/notifier and `noop` notifier
/// tags, for integration tests that want to drive a workflow end-to-end
/// through YAML config rather than constructing trait objects by hand.
#[cfg(any(test, feature = "test-support"))]
pub fn register_test_fakes(registry: &mut Registry) {
    registry.register_source(Box::new(source::fake::FakeSourceFactory));
    registry.register_notifier(Box::new(notify::fake::FakeNotifierFactory));
    registry.register_notifier(Box::new(notify::fake::NoopNotifierFactory));
}
