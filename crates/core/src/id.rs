// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! String-backed identifier newtypes and generators.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// A short, human-inspectable rendering of an identifier, for log lines.
pub trait ShortId {
    fn short(&self) -> String;
}

/// Declares a `String`-backed identifier newtype with the usual trait suite.
#[macro_export]
macro_rules! define_id {
    ($(#[$meta:meta])* $vis:vis struct $name:ident;) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        $vis struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl $crate::id::ShortId for $name {
            fn short(&self) -> String {
                if self.0.len() <= 12 {
                    self.0.clone()
                } else {
                    format!("{}…", &self.0[..12])
                }
            }
        }
    };
}

define_id! {
    /// Stable identity of a built source instance — the dedup partition key.
    ///
    /// Derived deterministically from the configured identity of the source
    /// (e.g. `"Reddit:<subreddit>"`, `"RSS:<url>"`), never from a mutable
    /// display name.
    pub struct SourceId;
}

/// Generates fresh opaque identifiers (workflow run ids, log correlation ids).
pub trait IdGen: Send + Sync {
    fn generate(&self) -> String;
}

/// Production identifier generator, backed by UUID v4.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic identifier generator for tests: `id-1`, `id-2`, ...
#[derive(Debug, Default)]
pub struct SequentialIdGen {
    next: AtomicU64,
}

impl SequentialIdGen {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(1),
        }
    }
}

impl IdGen for SequentialIdGen {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        format!("id-{n}")
    }
}

impl fmt::Debug for dyn IdGen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<dyn IdGen>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    define_id! {
        pub struct TestId;
    }

    #[test]
    fn short_truncates_long_ids() {
        let id = TestId::new("0123456789abcdef");
        assert_eq!(id.short(), "0123456789ab…");
    }

    #[test]
    fn short_preserves_short_ids() {
        let id = TestId::new("abc");
        assert_eq!(id.short(), "abc");
    }

    #[test]
    fn sequential_id_gen_increments() {
        let gen = SequentialIdGen::new();
        assert_eq!(gen.generate(), "id-1");
        assert_eq!(gen.generate(), "id-2");
    }

    #[test]
    fn uuid_id_gen_produces_unique_values() {
        let gen = UuidIdGen;
        assert_ne!(gen.generate(), gen.generate());
    }
}
