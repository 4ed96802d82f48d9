use crate::errors::TabfloaterError;
use crate::window::types::WindowHandle;

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("Failed to enumerate windows: {message}")]
    EnumerationFailed { message: String },

    #[error("Window not found: '{title}'")]
    WindowNotFound { title: String },

    #[error("Failed to update extended style of window {handle}: {message}")]
    StyleUpdateFailed {
        handle: WindowHandle,
        message: String,
    },

    #[error("Failed to move window {handle} to the topmost band: {message}")]
    ZOrderUpdateFailed {
        handle: WindowHandle,
        message: String,
    },

    #[error("Window pinning is not supported on {platform}")]
    PlatformUnsupported { platform: String },
}

impl TabfloaterError for WindowError {
    fn error_code(&self) -> &'static str {
        match self {
            WindowError::EnumerationFailed { .. } => "WINDOW_ENUMERATION_FAILED",
            WindowError::WindowNotFound { .. } => "WINDOW_NOT_FOUND",
            WindowError::StyleUpdateFailed { .. } => "WINDOW_STYLE_UPDATE_FAILED",
            WindowError::ZOrderUpdateFailed { .. } => "WINDOW_ZORDER_UPDATE_FAILED",
            WindowError::PlatformUnsupported { .. } => "PLATFORM_UNSUPPORTED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, WindowError::WindowNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_window_error_display() {
        let error = WindowError::WindowNotFound {
            title: "Test Window".to_string(),
        };
        assert_eq!(error.to_string(), "Window not found: 'Test Window'");
        assert_eq!(error.error_code(), "WINDOW_NOT_FOUND");
        assert!(error.is_user_error());
    }

    #[test]
    fn test_zorder_error_display() {
        let error = WindowError::ZOrderUpdateFailed {
            handle: WindowHandle(0x1a2b),
            message: "access denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to move window 0x1a2b to the topmost band: access denied"
        );
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_unsupported_platform() {
        let error = WindowError::PlatformUnsupported {
            platform: "linux".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Window pinning is not supported on linux"
        );
        assert_eq!(error.error_code(), "PLATFORM_UNSUPPORTED");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WindowError>();
    }

    #[test]
    fn test_error_source() {
        let error = WindowError::WindowNotFound {
            title: "test".to_string(),
        };
        assert!(error.source().is_none());
    }
}
