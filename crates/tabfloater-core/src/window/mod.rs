//! Window search and always-on-top pinning.
//!
//! The OS surface is the [`WindowBackend`] trait. [`handler`] holds the
//! matching rules on top of it, so they run the same against Win32 and
//! against [`FakeWindowBackend`] in tests.

pub mod backends;
mod errors;
pub mod handler;
mod traits;
mod types;

pub use backends::{FakeWindowBackend, UnsupportedWindowBackend, create_backend};
pub use errors::WindowError;
pub use handler::{find_first_window_by_title, make_window_floating, title_matches};
pub use traits::WindowBackend;
pub use types::{WindowHandle, WindowInfo};
