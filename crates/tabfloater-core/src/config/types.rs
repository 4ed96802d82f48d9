use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tabfloater_protocol::DEFAULT_MAX_INCOMING_BYTES;

use super::loading::LOG_FILE_NAME;

/// Configuration for the companion host process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Default log level when `TABFLOATER_LOG` is not set.
    pub log_level: String,

    /// Log file location. Relative paths resolve against the executable
    /// directory. Defaults to `tabfloater.log` beside the executable.
    pub log_file: Option<PathBuf>,

    /// Largest incoming frame the host will accept. A `u32`, like the wire
    /// length prefix.
    pub max_message_bytes: u32,

    /// Answer unrecognized actions with an error instead of staying silent.
    pub respond_to_unknown_actions: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            log_file: None,
            max_message_bytes: DEFAULT_MAX_INCOMING_BYTES as u32,
            respond_to_unknown_actions: false,
        }
    }
}

impl HostConfig {
    /// Where the host writes its log, given the executable directory.
    pub fn log_path(&self, exe_dir: &Path) -> PathBuf {
        match &self.log_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => exe_dir.join(path),
            None => exe_dir.join(LOG_FILE_NAME),
        }
    }

    /// `max_message_bytes` as a frame reader cap.
    pub fn max_incoming_bytes(&self) -> usize {
        self.max_message_bytes as usize
    }
}
