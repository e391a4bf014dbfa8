// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The default-notifier-merge contract (§4.2).

use keepwatch_core::RawPluginConfig;

const DEFAULT_SENTINEL_TAG: &str = "default";

/// Expands a workflow's notifier list against `defaults`:
///
/// - An empty workflow notifier list inherits `defaults` verbatim.
/// - The *first* entry tagged `default` is replaced in place by the whole
///   `defaults` list; any subsequent `default` entries are dropped.
/// - Non-sentinel entries pass through unchanged, in declared order.
///
/// Does not itself reject an empty result — callers enforce the "non-empty
/// final notifier list" invariant during workflow validation, since an
/// empty result here just means the operator also left `defaults.notifiers`
/// empty.
pub fn merge_default_notifiers(
    workflow_notifiers: Vec<RawPluginConfig>,
    defaults: &[RawPluginConfig],
) -> Vec<RawPluginConfig> {
    if workflow_notifiers.is_empty() {
        return defaults.to_vec();
    }

    let mut resolved = Vec::with_capacity(workflow_notifiers.len() + defaults.len());
    let mut expanded_default = false;
    for entry in workflow_notifiers {
        if entry.type_tag == DEFAULT_SENTINEL_TAG {
            if !expanded_default {
                resolved.extend(defaults.iter().cloned());
                expanded_default = true;
            }
            // subsequent `default` sentinels are ignored
        } else {
            resolved.push(entry);
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn notifier(tag: &str, name: &str) -> RawPluginConfig {
        RawPluginConfig::new(tag, name, Value::Null)
    }

    #[test]
    fn empty_workflow_list_inherits_defaults_verbatim() {
        let defaults = vec![notifier("discord", "d")];
        let resolved = merge_default_notifiers(vec![], &defaults);
        assert_eq!(resolved, defaults);
    }

    #[test]
    fn first_default_sentinel_expands_in_place() {
        let defaults = vec![notifier("discord", "d1"), notifier("ntfy", "n1")];
        let workflow_list = vec![notifier("discord", "explicit"), notifier("default", "_")];
        let resolved = merge_default_notifiers(workflow_list, &defaults);
        assert_eq!(
            resolved,
            vec![
                notifier("discord", "explicit"),
                notifier("discord", "d1"),
                notifier("ntfy", "n1"),
            ]
        );
    }

    #[test]
    fn subsequent_default_sentinels_are_ignored() {
        let defaults = vec![notifier("discord", "d1")];
        let workflow_list = vec![notifier("default", "_"), notifier("default", "_")];
        let resolved = merge_default_notifiers(workflow_list, &defaults);
        assert_eq!(resolved, vec![notifier("discord", "d1")]);
    }

    #[test]
    fn non_sentinel_entries_pass_through_in_order() {
        let workflow_list = vec![notifier("discord", "a"), notifier("ntfy", "b")];
        let resolved = merge_default_notifiers(workflow_list.clone(), &[]);
        assert_eq!(resolved, workflow_list);
    }
}
