use std::fs;
use std::path::Path;

use tracing::info;

use super::errors::InstallError;

/// Script the manifest points at; it forwards to the host executable.
#[cfg(windows)]
pub const LAUNCHER_FILE_NAME: &str = "run_companion.bat";
#[cfg(not(windows))]
pub const LAUNCHER_FILE_NAME: &str = "run_companion.sh";

/// Launcher script body that runs `host_path` with the browser's arguments.
pub fn launcher_script(host_path: &Path) -> String {
    if cfg!(windows) {
        format!("@echo off\r\n\"{}\" %*\r\n", host_path.display())
    } else {
        format!("#!/bin/sh\nexec \"{}\" \"$@\"\n", host_path.display())
    }
}

/// Write the launcher to `path`. On Unix it is marked executable.
pub fn write_launcher(path: &Path, host_path: &Path) -> Result<(), InstallError> {
    let file_error = |source| InstallError::FileOperationFailed {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| InstallError::FileOperationFailed {
            path: parent.display().to_string(),
            source,
        })?;
    }
    fs::write(path, launcher_script(host_path)).map_err(file_error)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(file_error)?;
    }

    info!(
        event = "core.install.launcher_written",
        path = %path.display(),
        host = %host_path.display()
    );
    Ok(())
}
