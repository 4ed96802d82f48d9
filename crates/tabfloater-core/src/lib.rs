//! tabfloater-core: Core library for the TabFloater companion host
//!
//! The browser extension launches the host and sends it native messaging
//! frames. This crate turns those frames into window operations and answers.
//!
//! # Main Entry Points
//!
//! - [`dispatch`] - The request/response loop
//! - [`window`] - Window search and always-on-top pinning
//! - [`config`] - Host configuration
//! - [`install`] - Manifest and registry setup for the browser

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod install;
pub mod logging;
pub mod window;

pub use config::HostConfig;
pub use dispatch::{DispatchOptions, HostError, SessionStats, run_host};
pub use errors::TabfloaterError;
pub use window::{WindowBackend, WindowError, WindowHandle, WindowInfo, create_backend};

pub use logging::{init_file_logging, init_logging, init_stderr_logging};
