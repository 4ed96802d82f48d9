use tabfloater_protocol::ProtocolError;

use crate::errors::TabfloaterError;

/// Failure while handling one request. Reported to the extension as
/// `{success: false, error}`; the loop continues.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("unknown action: {action}")]
    UnknownAction { action: String },

    #[error("malformed message: {source}")]
    MalformedMessage {
        #[from]
        source: ProtocolError,
    },

    #[error("internal error while handling '{action}': {message}")]
    Panicked { action: String, message: String },
}

impl TabfloaterError for DispatchError {
    fn error_code(&self) -> &'static str {
        match self {
            DispatchError::UnknownAction { .. } => "UNKNOWN_ACTION",
            DispatchError::MalformedMessage { .. } => "MALFORMED_MESSAGE",
            DispatchError::Panicked { .. } => "HANDLER_PANICKED",
        }
    }

    fn is_user_error(&self) -> bool {
        !matches!(self, DispatchError::Panicked { .. })
    }
}

/// Failure of the loop itself. Ends the host with a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Failed to read from the browser: {0}")]
    Read(ProtocolError),

    #[error("Failed to write to the browser: {0}")]
    Write(ProtocolError),
}

impl TabfloaterError for HostError {
    fn error_code(&self) -> &'static str {
        match self {
            HostError::Read(_) => "HOST_READ_FAILED",
            HostError::Write(_) => "HOST_WRITE_FAILED",
        }
    }
}
