//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::InfiniteConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment.
    pub fn load(workspace_root: &Path) -> Result<InfiniteConfig, ApiError> {
        let config = MergeService::load(workspace_root)?;
        config.storage.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<InfiniteConfig, ApiError> {
        let config = MergeService::load_from_file(path)?;
        config.storage.validate()?;
        Ok(config)
    }

    /// Create default configuration.
    pub fn default() -> InfiniteConfig {
        InfiniteConfig::default()
    }
}
