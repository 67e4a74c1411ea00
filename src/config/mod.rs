mod types;

pub use types::{validate_table, Config, ExtensionConfig};

use crate::error::{Result, StampinatorError};
use std::fs;

impl Config {
    pub fn validate(&self) -> Result<()> {
        self.extension.validate().map_err(StampinatorError::Config)?;
        for table in &self.table {
            validate_table(table).map_err(StampinatorError::Config)?;
        }
        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &str) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .map_err(|e| StampinatorError::Config(format!("Failed to read config file '{}': {}", path, e)))?;

    let config: Config = toml::from_str(&contents)?;
    config.validate()?;

    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(config: &Config, path: &str) -> Result<()> {
    config.validate()?;

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string)
        .map_err(|e| StampinatorError::Config(format!("Failed to write config file '{}': {}", path, e)))?;

    Ok(())
}
