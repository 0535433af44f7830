//! Layered configuration: defaults, global file, workspace file, environment.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;
pub mod workspace;

pub use facade::ConfigLoader;
pub use workspace::StorageConfig;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration for the `infinite` binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfiniteConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}
