// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Logging setup.
//!
//! Builds a subscriber that writes to the console and, for benchmark runs, to
//! a timestamped log file. The subscriber is returned as a handle and scoped
//! to the work it should observe rather than installed globally.

use std::fs::{self, File};
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::instrument::{WithDispatch, WithSubscriber};
use tracing::Dispatch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// HTTP client internals are capped at warn.
const QUIET_TARGETS: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls"];

/// A configured subscriber plus the log file it writes to, if any.
pub struct LogHandle {
    dispatch: Dispatch,
    path: Option<PathBuf>,
}

impl LogHandle {
    /// Log file path, when file logging is enabled.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `future` with this subscriber as its default.
    pub fn scope<F: Future>(&self, future: F) -> WithDispatch<F> {
        future.with_subscriber(self.dispatch.clone())
    }
}

/// Console and file logging into `api_benchmark_<timestamp>.log` under `log_dir`.
pub fn init(log_dir: &Path, verbose: bool) -> io::Result<LogHandle> {
    fs::create_dir_all(log_dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = log_dir.join(format!("api_benchmark_{}.log", timestamp));
    let file = File::create(&path)?;

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_filter(filter(verbose)),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Arc::new(file))
                .with_filter(filter(verbose)),
        );

    Ok(LogHandle {
        dispatch: Dispatch::new(subscriber),
        path: Some(path),
    })
}

/// Console-only logging for commands that do not benchmark.
pub fn console(verbose: bool) -> LogHandle {
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_target(false)
            .with_filter(filter(verbose)),
    );

    LogHandle {
        dispatch: Dispatch::new(subscriber),
        path: None,
    }
}

/// `RUST_LOG` if set, otherwise info/debug with client internals quieted.
fn filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    let mut directives = vec![level.to_string()];
    directives.extend(QUIET_TARGETS.iter().map(|t| format!("{}=warn", t)));
    directives.join(",")
}
