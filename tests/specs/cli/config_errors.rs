//! §7: config errors are fatal at startup and exit the process non-zero
//! before the scheduler loop ever starts.

use crate::prelude::{run_to_completion, write_config};

#[test]
fn missing_config_file_exits_non_zero() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let missing = dir.path().join("does-not-exist.yaml");

    let output = run_to_completion(&missing);
    assert!(!output.status.success());
}

#[test]
fn malformed_yaml_exits_non_zero() {
    let (_dir, path) = write_config("not: [valid: yaml: at all");
    let output = run_to_completion(&path);
    assert!(!output.status.success());
}

#[test]
fn unknown_source_plugin_tag_exits_non_zero() {
    let yaml = r#"
database:
  type: sqlite
  filepath: ":memory:"
workflows:
  - name: wf
    source: { type: nonexistent, name: s, config: {} }
    notifiers: [{ type: console, name: c, config: {} }]
"#;
    let (_dir, path) = write_config(yaml);
    let output = run_to_completion(&path);
    assert!(!output.status.success());
}

#[test]
fn empty_notifier_list_exits_non_zero() {
    let yaml = r#"
database:
  type: sqlite
  filepath: ":memory:"
workflows:
  - name: wf
    source: { type: rss, name: s, config: { feed_url: "https://example.com/feed" } }
    notifiers: []
"#;
    let (_dir, path) = write_config(yaml);
    let output = run_to_completion(&path);
    assert!(!output.status.success());
}

#[test]
fn unsupported_database_backend_exits_non_zero() {
    let yaml = r#"
database:
  type: postgres
  filepath: ":memory:"
workflows: []
"#;
    let (_dir, path) = write_config(yaml);
    let output = run_to_completion(&path);
    assert!(!output.status.success());
}
