use crate::errors::TabfloaterError;

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error(
        "Invalid extension id '{id}': expected 32 characters in the range a-p (without 'chrome-extension://')"
    )]
    InvalidExtensionId { id: String },

    #[error("Unknown browser '{name}'. Supported browsers: chrome, chromium, edge")]
    UnknownBrowser { name: String },

    #[error("Host executable not found at '{path}'")]
    HostNotFound { path: String },

    #[error("No manifest directory for {browser} on this platform")]
    ManifestDirUnavailable { browser: String },

    #[error("Failed to serialize manifest: {message}")]
    ManifestSerializationFailed { message: String },

    #[error("File operation on '{path}' failed: {source}")]
    FileOperationFailed {
        path: String,
        source: std::io::Error,
    },

    #[error("Registry operation on '{key}' failed with code {code}")]
    RegistryFailed { key: String, code: u32 },
}

impl TabfloaterError for InstallError {
    fn error_code(&self) -> &'static str {
        match self {
            InstallError::InvalidExtensionId { .. } => "INVALID_EXTENSION_ID",
            InstallError::UnknownBrowser { .. } => "UNKNOWN_BROWSER",
            InstallError::HostNotFound { .. } => "HOST_NOT_FOUND",
            InstallError::ManifestDirUnavailable { .. } => "MANIFEST_DIR_UNAVAILABLE",
            InstallError::ManifestSerializationFailed { .. } => "MANIFEST_SERIALIZATION_FAILED",
            InstallError::FileOperationFailed { .. } => "FILE_OPERATION_FAILED",
            InstallError::RegistryFailed { .. } => "REGISTRY_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            InstallError::InvalidExtensionId { .. }
                | InstallError::UnknownBrowser { .. }
                | InstallError::HostNotFound { .. }
        )
    }
}
