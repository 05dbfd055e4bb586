//! File logging
//!
//! The terminal belongs to the UI, so log output goes to a file under the
//! config directory.

use anyhow::Result;
use std::fs;
use std::path::Path;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_FILE_NAME: &str = "ludoteca-tui.log";

fn directive(level: &str) -> String {
    format!("ludoteca_tui={}", level.trim().to_lowercase())
}

/// Build the filter: `RUST_LOG` first, then the configured level
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive(level)))
        .unwrap_or_else(|_| EnvFilter::new(directive("info")))
}

/// File subscriber plus the guard of its background writer. Lines are only
/// guaranteed on disk once the guard is dropped.
fn file_subscriber(
    log_dir: &Path,
    level: &str,
) -> Result<(impl Subscriber + Send + Sync + 'static, WorkerGuard)> {
    fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let subscriber = tracing_subscriber::registry().with(build_filter(level)).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(false),
    );
    Ok((subscriber, guard))
}

/// Install the global subscriber. Keep the returned guard alive until exit
/// and drop it before any `process::exit`.
pub fn init(log_dir: &Path, level: &str) -> Result<WorkerGuard> {
    let (subscriber, guard) = file_subscriber(log_dir, level)?;
    subscriber.try_init()?;
    Ok(guard)
}
