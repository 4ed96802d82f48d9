//! # Configuration System
//!
//! Optional TOML configuration for the companion host.
//!
//! The host looks for `tabfloater.toml` beside its executable, or at the path
//! named by `TABFLOATER_CONFIG`. A missing file means defaults. Every field is
//! optional:
//!
//! ```toml
//! log_level = "info"
//! log_file = "C:/Tools/tabfloater/tabfloater.log"
//! max_message_bytes = 1048576
//! respond_to_unknown_actions = true
//! ```

pub mod loading;
pub mod types;

pub use loading::{
    CONFIG_ENV_VAR, CONFIG_FILE_NAME, LOG_FILE_NAME, executable_dir, load_config_file,
    load_host_config, resolve_config_path,
};
pub use types::HostConfig;

/// Log levels accepted in `log_level`.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

impl HostConfig {
    /// Check field values that serde cannot.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        if self.max_message_bytes == 0 {
            return Err(crate::errors::ConfigError::InvalidConfiguration {
                message: "max_message_bytes must be greater than 0".to_string(),
            });
        }

        let level = self.log_level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(crate::errors::ConfigError::InvalidConfiguration {
                message: format!(
                    "log_level '{}' is not one of: {}",
                    self.log_level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        Ok(())
    }
}
