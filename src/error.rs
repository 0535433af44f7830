//! Error types for the node engine and the front end.

use std::path::PathBuf;
use thiserror::Error;

/// Kind of a [`NodeError`], for callers that branch on the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotLoaded,
    AlreadyExists,
    InvalidValue,
    InvalidKey,
    Cancelled,
    Io,
}

/// Errors raised by the value codec, the node tree and the filesystem providers.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("infinite: node not found: {key}")]
    NotFound { key: String },

    #[error("infinite: node not loaded: {}", path.display())]
    NotLoaded { path: PathBuf },

    #[error("infinite: node already exists: {key}")]
    AlreadyExists { key: String },

    #[error("infinite: value is invalid: {0}")]
    InvalidValue(String),

    #[error("infinite: invalid key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("infinite: operation cancelled")]
    Cancelled,

    #[error("infinite: I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            NodeError::NotFound { .. } => ErrorKind::NotFound,
            NodeError::NotLoaded { .. } => ErrorKind::NotLoaded,
            NodeError::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            NodeError::InvalidValue(_) => ErrorKind::InvalidValue,
            NodeError::InvalidKey { .. } => ErrorKind::InvalidKey,
            NodeError::Cancelled => ErrorKind::Cancelled,
            NodeError::Io { .. } => ErrorKind::Io,
        }
    }

    /// Wrap a provider error with the path it failed on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NodeError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn not_loaded(path: impl Into<PathBuf>) -> Self {
        NodeError::NotLoaded { path: path.into() }
    }
}

/// Errors surfaced by the CLI and configuration layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
