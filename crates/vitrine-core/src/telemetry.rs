//! Tracing setup.
//!
//! Logs go to stderr, filtered by `VITRINE_LOG` (default `warn`). When a log
//! directory is given, a daily-rolling file receives the same events through a
//! non-blocking writer; keep the returned guard alive to flush it.

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the tracing filter directives.
pub const LOG_ENV: &str = "VITRINE_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Keeps the file writer alive; dropping it flushes pending log lines.
#[derive(Debug)]
pub struct TelemetryGuard {
    _file: Option<WorkerGuard>,
}

/// Installs the global subscriber.
pub fn init(log_dir: Option<&Path>) -> Result<TelemetryGuard> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "vitrine.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .try_init()
        .context("install tracing subscriber")?;

    Ok(TelemetryGuard { _file: guard })
}
