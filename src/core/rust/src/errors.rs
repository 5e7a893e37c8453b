/* src/core/rust/src/errors.rs */

use std::path::PathBuf;

use thiserror::Error;

/// Why a single configuration source could not produce a value.
///
/// These never leave the resolver: each one only moves resolution on to the
/// next tier and ends up in the logs.
#[derive(Debug, Error)]
pub enum SourceError {
  #[error("{} does not exist", .path.display())]
  Missing { path: PathBuf },

  #[error("could not read {}", .path.display())]
  Unreadable { path: PathBuf },

  #[error("request to {url} failed: {source}")]
  Network {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  #[error("{url} returned HTTP {status}")]
  Status { url: String, status: u16 },

  #[error("{origin} is not a valid configuration document: {source}")]
  Parse {
    origin: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("invalid origin-relative path {0:?}")]
  InvalidPath(String),
}

impl SourceError {
  /// True for failures of reaching a source, false for bad content.
  pub fn is_unavailable(&self) -> bool {
    !matches!(self, Self::Parse { .. })
  }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LanguageError {
  #[error("unsupported language {0:?}")]
  Unknown(String),
}

#[derive(Debug, Error)]
pub enum PreferenceError {
  #[error("failed to access preference file {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("preference file {} is corrupt: {source}", .path.display())]
  Json {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}
