// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! keepwatchd — the content-monitoring scheduler daemon.
//!
//! Usage: `keepwatchd [config-path]`, defaulting to `config.yaml` (§6).
//! No subcommands, no flags. SIGINT/SIGTERM trigger graceful shutdown:
//! the in-flight tick (if any) finishes, then the process exits 0. Any
//! other error is fatal and exits non-zero after a logged cause.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::path::PathBuf;

use keepwatch_daemon::{run_scheduler_loop, startup, LifecycleError};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _guard = setup_logging();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.yaml"));
    info!(path = %config_path.display(), "loading configuration");

    let keepwatch_daemon::StartupResult {
        engine,
        mut heap,
        shutdown,
    } = match startup(&config_path).await {
        Ok(result) => result,
        Err(err) => {
            error!(cause = %err, "failed to start keepwatchd");
            std::process::exit(exit_code_for_lifecycle_error(&err));
        }
    };
    info!(workflows = heap.len(), "startup complete");

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(err) => {
            error!(cause = %err, "failed to install SIGTERM handler");
            std::process::exit(1);
        }
    };
    let mut sigint = match signal(SignalKind::interrupt()) {
        Ok(s) => s,
        Err(err) => {
            error!(cause = %err, "failed to install SIGINT handler");
            std::process::exit(1);
        }
    };

    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
            _ = sigint.recv() => info!("received SIGINT, shutting down"),
        }
        signal_shutdown.terminate();
    });

    let clock = keepwatch_core::SystemClock;
    match run_scheduler_loop(&engine, &mut heap, &shutdown, &clock).await {
        Ok(()) => {
            info!("shutdown complete");
        }
        Err(err) => {
            error!(kind = err.kind(), cause = %err, "scheduler loop ended with a fatal error");
            std::process::exit(1);
        }
    }
}

fn exit_code_for_lifecycle_error(_err: &LifecycleError) -> i32 {
    1
}

fn setup_logging() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stdout());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking))
        .init();

    guard
}
