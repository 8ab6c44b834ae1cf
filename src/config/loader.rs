//! Configuration loading from disk.
//!
//! The document is read exactly once per process lifetime. Any read or
//! parse failure is an unrecoverable startup condition: no retries, no
//! defaults, no partially-populated document.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::BootstrapConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read (missing, permissions, I/O).
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not a valid document.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load the bootstrap document from a TOML file.
///
/// On success the returned config reflects exactly the file's contents:
/// no coercion, no normalization, and no validation beyond what the
/// parser enforces. Empty string fields stay empty; that is how the
/// composer decides an integration is not configured.
pub fn load(path: impl AsRef<Path>) -> Result<BootstrapConfig, ConfigError> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(config)
}
