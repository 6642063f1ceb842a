//! Tracing setup shared by every `dbot` subcommand.
//!
//! Console output goes to stderr so command output on stdout (the group chat table) stays clean.
//! The long-running bot additionally appends plain-text records to a log file.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

use crate::error::{DbotError, Result};

/// `RUST_LOG` when set and valid, otherwise `default_level`.
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Installs the global subscriber.
///
/// With `log_file`, its parent directory is created if missing and records are appended to it
/// without ANSI colors, span closes included. Fails with [`DbotError::Io`] when the file cannot be
/// opened and [`DbotError::Config`] when a global subscriber is already installed.
pub fn init_tracing(log_file: Option<&Path>, default_level: &str) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_writer(Arc::new(file))
                    .with_ansi(false)
                    .with_span_events(FmtSpan::CLOSE)
                    .with_thread_ids(true)
                    .with_target(true),
            )
        }
        None => None,
    };

    let console_layer = fmt::layer().with_writer(io::stderr).with_target(true);

    Registry::default()
        .with(env_filter(default_level))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| DbotError::Config(format!("tracing subscriber already installed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_rejects_directory_as_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = init_tracing(Some(dir.path()), "info").unwrap_err();
        assert!(matches!(err, DbotError::Io(_)));
    }

    #[test]
    fn test_init_tracing_creates_log_file_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("dbot.log");

        init_tracing(Some(&path), "debug").unwrap();
        tracing::info!(test = "logger", "written to file");
        assert!(path.exists());

        let err = init_tracing(None, "warn").unwrap_err();
        assert!(matches!(err, DbotError::Config(_)));
    }
}
