//! Storage settings and resolution of the database root.

use crate::error::{ApiError, NodeError};
use crate::types::{Depth, MAX_NAME_LEN};
use crate::value::Codec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_root() -> PathBuf {
    PathBuf::from("db")
}

fn default_max_name_len() -> usize {
    MAX_NAME_LEN
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database root directory (relative to the working directory)
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Longest filename the codec may produce
    #[serde(default = "default_max_name_len")]
    pub max_name_len: usize,

    /// Default load depth; None loads everything
    #[serde(default)]
    pub depth: Option<usize>,
}

impl StorageConfig {
    /// Resolve the database root against `workspace_root`.
    pub fn resolve_root(&self, workspace_root: &Path) -> PathBuf {
        if self.root.is_absolute() {
            self.root.clone()
        } else {
            workspace_root.join(&self.root)
        }
    }

    pub fn depth(&self) -> Depth {
        Depth::from(self.depth)
    }

    /// Codec for the configured filename budget.
    pub fn codec(&self) -> Result<Codec, NodeError> {
        Codec::new(self.max_name_len)
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        self.codec()
            .map(drop)
            .map_err(|e| ApiError::ConfigError(format!("storage.max_name_len: {}", e)))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            max_name_len: default_max_name_len(),
            depth: None,
        }
    }
}
