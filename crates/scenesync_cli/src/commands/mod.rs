//! CLI command implementations.

pub mod inspect;
pub mod keygen;
pub mod merge;
pub mod open;
pub mod seal;

use scenesync_core::{CoreError, Element, EncryptionKey};
use scenesync_protocol::ProtocolError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// A file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// A file did not hold an element collection.
    #[error("{path}: not an element collection: {source}")]
    Elements {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// Key, cipher or envelope error.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Invalid argument.
    #[error("{0}")]
    Usage(String),
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::Protocol(ProtocolError::Crypto(err))
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

pub(crate) fn read_file(path: &Path) -> CliResult<Vec<u8>> {
    std::fs::read(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_file(path: &Path, contents: &[u8]) -> CliResult<()> {
    std::fs::write(path, contents).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn read_elements(path: &Path) -> CliResult<Vec<Element>> {
    let bytes = read_file(path)?;
    serde_json::from_slice(&bytes).map_err(|source| CliError::Elements {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_key(text: &str) -> CliResult<EncryptionKey> {
    Ok(EncryptionKey::from_base64url(text)?)
}

pub(crate) fn to_json(elements: &[Element]) -> CliResult<String> {
    serde_json::to_string_pretty(elements)
        .map_err(|err| CliError::Protocol(ProtocolError::Payload(err)))
}
