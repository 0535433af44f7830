//! Built-in defaults, the lowest configuration layer.

use crate::types::MAX_NAME_LEN;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("storage.root", "db")?
        .set_default("storage.max_name_len", MAX_NAME_LEN as i64)
}
