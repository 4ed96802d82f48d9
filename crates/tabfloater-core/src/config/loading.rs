//! Configuration file discovery and parsing.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::types::HostConfig;
use crate::errors::ConfigError;

/// Config file name looked up beside the executable.
pub const CONFIG_FILE_NAME: &str = "tabfloater.toml";

/// Default log file name beside the executable.
pub const LOG_FILE_NAME: &str = "tabfloater.log";

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "TABFLOATER_CONFIG";

/// Directory holding the running executable.
pub fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(|e| ConfigError::ExecutableDirUnavailable {
        message: e.to_string(),
    })?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ConfigError::ExecutableDirUnavailable {
            message: format!("'{}' has no parent directory", exe.display()),
        })
}

/// Pick the config file: `override_path` if given, else the default beside
/// the executable.
pub fn resolve_config_path(exe_dir: &Path, override_path: Option<PathBuf>) -> PathBuf {
    override_path.unwrap_or_else(|| exe_dir.join(CONFIG_FILE_NAME))
}

/// Load the host configuration.
///
/// A missing file yields defaults. Unreadable, unparseable or invalid files
/// are errors; the caller decides whether to fall back.
pub fn load_host_config(exe_dir: &Path) -> Result<HostConfig, ConfigError> {
    let override_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let path = resolve_config_path(exe_dir, override_path);

    if !path.exists() {
        debug!(
            event = "core.config.load_skipped",
            path = %path.display(),
            reason = "not_found"
        );
        return Ok(HostConfig::default());
    }

    load_config_file(&path)
}

/// Parse and validate one config file.
pub fn load_config_file(path: &Path) -> Result<HostConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    let config: HostConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseFailed {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    config.validate()?;

    debug!(event = "core.config.load_completed", path = %path.display());
    Ok(config)
}
