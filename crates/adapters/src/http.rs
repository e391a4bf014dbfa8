// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A single `reqwest::Client`, built once and shared by every HTTP-backed
//! source and notifier, carrying the common `User-Agent` header (§6).

use std::sync::OnceLock;

const USER_AGENT: &str = concat!("keepwatchd/", env!("CARGO_PKG_VERSION"));

static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();

pub fn shared_client() -> reqwest::Client {
    CLIENT
        .get_or_init(|| {
            reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default()
        })
        .clone()
}
