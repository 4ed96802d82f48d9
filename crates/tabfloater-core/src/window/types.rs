use std::fmt;

/// Opaque OS window identifier (an `HWND` on Windows).
///
/// Valid only for the request that resolved it; never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// A visible top-level window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
}

impl WindowInfo {
    pub fn new(handle: WindowHandle, title: impl Into<String>) -> Self {
        Self {
            handle,
            title: title.into(),
        }
    }
}
