use std::error::Error;

use tabfloater_protocol::ProtocolError;

/// Base trait for all application errors
pub trait TabfloaterError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

impl TabfloaterError for ProtocolError {
    fn error_code(&self) -> &'static str {
        match self {
            ProtocolError::Io(_) => "PROTOCOL_IO_ERROR",
            ProtocolError::FrameTooLarge { .. } => "FRAME_TOO_LARGE",
            ProtocolError::ResponseTooLarge { .. } => "RESPONSE_TOO_LARGE",
            ProtocolError::InvalidUtf8 { .. } => "INVALID_UTF8",
            ProtocolError::InvalidJson { .. } => "INVALID_JSON",
            ProtocolError::NotAnObject { .. } => "MESSAGE_NOT_OBJECT",
            ProtocolError::SerializationFailed { .. } => "SERIALIZATION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        self.is_malformed_frame()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    ParseFailed { path: String, message: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Could not determine the executable directory: {message}")]
    ExecutableDirUnavailable { message: String },
}

impl TabfloaterError for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ReadFailed { .. } => "CONFIG_READ_FAILED",
            ConfigError::ParseFailed { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            ConfigError::ExecutableDirUnavailable { .. } => "EXE_DIR_UNAVAILABLE",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            ConfigError::ParseFailed { .. } | ConfigError::InvalidConfiguration { .. }
        )
    }
}
