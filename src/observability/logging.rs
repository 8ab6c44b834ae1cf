//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global tracing subscriber from the document's
//!   passthrough logging settings
//! - Console output always; non-blocking file output when a path is set
//! - `RUST_LOG` overrides the configured level
//!
//! The library never installs a subscriber on its own; only the host
//! binary calls [`init`], once, between loading the document and
//! composing directives.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

const DEFAULT_LEVEL: &str = "info";
const DEFAULT_LOG_FILE: &str = "service.log";

/// Errors initializing the logging subsystem.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file's parent directory could not be created.
    #[error("failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber per the document's logging settings.
///
/// Returns the file writer's guard when file logging is active; the host
/// must keep it alive until exit or buffered lines are lost.
pub fn init(settings: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = env_filter(&settings.level);
    let console = tracing_subscriber::fmt::layer();

    if settings.path.is_empty() {
        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .try_init()?;
        return Ok(None);
    }

    let (directory, file_name) = split_log_path(Path::new(&settings.path));
    fs::create_dir_all(&directory).map_err(|source| LoggingError::CreateDir {
        path: directory.clone(),
        source,
    })?;

    let appender = tracing_appender::rolling::never(&directory, &file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()?;

    Ok(Some(guard))
}

/// `RUST_LOG` wins when set; otherwise the configured level; otherwise
/// `info`. An unparseable directive falls back to `info`.
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = if level.is_empty() { DEFAULT_LEVEL } else { level };
            EnvFilter::try_new(level)
        })
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Split a configured log path into (directory, file name).
///
/// A path with no parent logs into the working directory; a path that
/// names a directory gets the default file name.
fn split_log_path(path: &Path) -> (PathBuf, PathBuf) {
    let directory = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = match path.file_name() {
        Some(name) => PathBuf::from(name),
        None => PathBuf::from(DEFAULT_LOG_FILE),
    };
    (directory, file_name)
}
