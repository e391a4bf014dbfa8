//! Shared helpers for the black-box `keepwatchd` specs.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output};
use std::time::{Duration, Instant};

/// Resolves the built `keepwatchd` binary. Cargo only exports
/// `CARGO_BIN_EXE_<name>` for binaries belonging to the *same* package as
/// the running test binary; since `keepwatch-specs` is a different crate
/// than `keepwatch-daemon`, that env var isn't set here and the binary has
/// to be found under `target/` by hand.
fn keepwatchd_binary() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));

    let llvm_cov_path = manifest_dir.join("target/llvm-cov-target/debug/keepwatchd");
    if llvm_cov_path.exists() {
        return llvm_cov_path;
    }

    let standard = manifest_dir.join("target/debug/keepwatchd");
    if standard.exists() {
        return standard;
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(debug_dir) = exe.parent().and_then(|d| d.parent()) {
            let fallback = debug_dir.join("keepwatchd");
            if fallback.exists() {
                return fallback;
            }
        }
    }

    standard
}

/// Writes `yaml` to `config.yaml` inside a fresh temp directory and returns
/// the directory (kept alive by the caller) and the config path.
pub fn write_config(yaml: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.yaml");
    let mut file = std::fs::File::create(&path).expect("create config.yaml");
    file.write_all(yaml.as_bytes()).expect("write config.yaml");
    (dir, path)
}

/// Runs `keepwatchd <config path>` to completion and returns its output.
/// Only appropriate for configs expected to fail before the scheduler loop
/// starts (bad YAML, unknown plugin tag, empty notifier list, ...) — a
/// valid config runs forever and must be driven through [`spawn`] instead.
pub fn run_to_completion(config_path: &Path) -> Output {
    Command::new(keepwatchd_binary())
        .arg(config_path)
        .output()
        .expect("keepwatchd should run")
}

/// Spawns `keepwatchd <config path>` as a background child process.
pub fn spawn(config_path: &Path) -> Child {
    Command::new(keepwatchd_binary())
        .arg(config_path)
        .spawn()
        .expect("keepwatchd should spawn")
}

/// Sends SIGTERM to `child`'s pid.
pub fn terminate(child: &Child) {
    // Safety: `child.id()` is a live pid owned by this process's child
    // table for as long as `child` hasn't been waited on.
    unsafe {
        libc::kill(child.id() as libc::pid_t, libc::SIGTERM);
    }
}

/// Polls `child` for exit, up to `timeout`, without blocking indefinitely.
pub fn wait_for_exit(child: &mut Child, timeout: Duration) -> Option<std::process::ExitStatus> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Ok(Some(status)) = child.try_wait() {
            return Some(status);
        }
        if Instant::now() >= deadline {
            return None;
        }
        std::thread::sleep(Duration::from_millis(20));
    }
}
