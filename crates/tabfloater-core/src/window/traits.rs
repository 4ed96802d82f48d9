//! Window backend trait definition.

use super::errors::WindowError;
use super::types::{WindowHandle, WindowInfo};

/// Access to the OS window manager.
///
/// Implementations hold no window state between calls; every request
/// re-enumerates.
pub trait WindowBackend: Send + Sync {
    /// Short name for logs (e.g., "win32").
    fn name(&self) -> &'static str;

    /// Visible top-level windows in the window manager's own order.
    fn enumerate_visible_windows(&self) -> Result<Vec<WindowInfo>, WindowError>;

    /// Mark the window always-on-top and raise it into the topmost band
    /// without moving or resizing it. Setting it twice is harmless.
    fn set_always_on_top(&self, handle: WindowHandle) -> Result<(), WindowError>;
}
