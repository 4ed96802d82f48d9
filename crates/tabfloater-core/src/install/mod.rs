//! Registration of the companion host with the browser.
//!
//! The browser finds a native messaging host through a manifest file naming
//! the executable and the extension origins allowed to launch it. On Windows
//! the manifest location is published through a registry key; on Linux and
//! macOS the manifest sits in a per-browser directory.

mod errors;
pub mod handler;
mod launcher;
mod manifest;
mod registry;
mod types;

pub use errors::InstallError;
pub use handler::{
    InstallReport, InstallRequest, UninstallReport, UninstallRequest, install, manifest_path_for,
    uninstall,
};
pub use launcher::{LAUNCHER_FILE_NAME, launcher_script, write_launcher};
pub use manifest::{build_manifest, manifest_to_json, write_manifest};
pub use types::{Browser, ExtensionId, HostManifest};

/// Name the extension uses in `chrome.runtime.connectNative`.
pub const HOST_NAME: &str = "tabfloater_companion";

pub const HOST_DESCRIPTION: &str = "TabFloater Companion Application";

/// Host executable file name for the running platform.
pub fn host_executable_name() -> String {
    format!("tabfloater-host{}", std::env::consts::EXE_SUFFIX)
}
