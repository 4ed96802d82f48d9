//! In-memory window backend for tests.
//!
//! Public so integration tests in other crates can drive the dispatcher
//! without a desktop session.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use crate::window::errors::WindowError;
use crate::window::traits::WindowBackend;
use crate::window::types::{WindowHandle, WindowInfo};

#[derive(Default)]
struct FakeDesktop {
    windows: Vec<WindowInfo>,
    topmost: HashSet<WindowHandle>,
    topmost_calls: Vec<WindowHandle>,
    enumeration_failure: Option<String>,
    topmost_failure: Option<String>,
    panic_on_enumerate: bool,
}

/// A scripted desktop: a fixed window list plus a record of pin requests.
#[derive(Default)]
pub struct FakeWindowBackend {
    desktop: Mutex<FakeDesktop>,
}

impl FakeWindowBackend {
    pub fn with_windows(windows: Vec<WindowInfo>) -> Self {
        Self {
            desktop: Mutex::new(FakeDesktop {
                windows,
                ..FakeDesktop::default()
            }),
        }
    }

    fn desktop(&self) -> MutexGuard<'_, FakeDesktop> {
        // A panic inside a test backend call poisons the lock; the data is
        // still consistent.
        self.desktop.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a window at the end of the enumeration order.
    pub fn open_window(&self, window: WindowInfo) {
        self.desktop().windows.push(window);
    }

    pub fn close_window(&self, handle: WindowHandle) {
        let mut desktop = self.desktop();
        desktop.windows.retain(|w| w.handle != handle);
        desktop.topmost.remove(&handle);
    }

    /// Make every later enumeration fail with `message`.
    pub fn fail_enumeration(&self, message: impl Into<String>) {
        self.desktop().enumeration_failure = Some(message.into());
    }

    /// Make every later pin request fail with `message`.
    pub fn fail_topmost(&self, message: impl Into<String>) {
        self.desktop().topmost_failure = Some(message.into());
    }

    /// Make every later enumeration panic.
    pub fn panic_on_enumerate(&self) {
        self.desktop().panic_on_enumerate = true;
    }

    pub fn is_topmost(&self, handle: WindowHandle) -> bool {
        self.desktop().topmost.contains(&handle)
    }

    /// Handles passed to `set_always_on_top`, in call order.
    pub fn topmost_calls(&self) -> Vec<WindowHandle> {
        self.desktop().topmost_calls.clone()
    }
}

impl WindowBackend for FakeWindowBackend {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn enumerate_visible_windows(&self) -> Result<Vec<WindowInfo>, WindowError> {
        let desktop = self.desktop();
        if desktop.panic_on_enumerate {
            drop(desktop);
            panic!("fake window enumeration panicked");
        }
        if let Some(message) = &desktop.enumeration_failure {
            return Err(WindowError::EnumerationFailed {
                message: message.clone(),
            });
        }
        Ok(desktop.windows.clone())
    }

    fn set_always_on_top(&self, handle: WindowHandle) -> Result<(), WindowError> {
        let mut desktop = self.desktop();
        desktop.topmost_calls.push(handle);
        if let Some(message) = &desktop.topmost_failure {
            return Err(WindowError::ZOrderUpdateFailed {
                handle,
                message: message.clone(),
            });
        }
        desktop.topmost.insert(handle);
        Ok(())
    }
}
