use crate::window::errors::WindowError;
use crate::window::traits::WindowBackend;
use crate::window::types::{WindowHandle, WindowInfo};

/// Backend for platforms without window pinning support.
pub struct UnsupportedWindowBackend {
    platform: String,
}

impl UnsupportedWindowBackend {
    pub fn new(platform: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
        }
    }

    fn unsupported(&self) -> WindowError {
        WindowError::PlatformUnsupported {
            platform: self.platform.clone(),
        }
    }
}

impl WindowBackend for UnsupportedWindowBackend {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn enumerate_visible_windows(&self) -> Result<Vec<WindowInfo>, WindowError> {
        Err(self.unsupported())
    }

    fn set_always_on_top(&self, _handle: WindowHandle) -> Result<(), WindowError> {
        Err(self.unsupported())
    }
}
