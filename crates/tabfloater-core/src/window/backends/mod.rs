mod fake;
mod unsupported;
#[cfg(windows)]
mod win32;

pub use fake::FakeWindowBackend;
pub use unsupported::UnsupportedWindowBackend;
#[cfg(windows)]
pub use win32::Win32WindowBackend;

use super::traits::WindowBackend;

/// Create the window backend for the running platform.
///
/// On Windows: the Win32 backend.
/// Elsewhere: a backend that fails every enumeration, so each request is
/// answered with the failure text.
pub fn create_backend() -> Box<dyn WindowBackend> {
    #[cfg(windows)]
    {
        Box::new(Win32WindowBackend)
    }
    #[cfg(not(windows))]
    {
        Box::new(UnsupportedWindowBackend::new(std::env::consts::OS))
    }
}
