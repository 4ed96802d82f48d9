use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use super::errors::InstallError;
use super::launcher::{LAUNCHER_FILE_NAME, write_launcher};
use super::manifest::{build_manifest, write_manifest};
use super::registry;
use super::types::{Browser, ExtensionId};
use super::HOST_NAME;

#[derive(Debug, Clone)]
pub struct InstallRequest {
    pub extension_id: ExtensionId,
    pub browser: Browser,
    /// Path of the `tabfloater-host` executable.
    pub host_path: PathBuf,
    /// Overrides where the manifest is written.
    pub manifest_dir: Option<PathBuf>,
    /// Publish the manifest path in the registry (Windows only).
    pub register: bool,
}

#[derive(Debug, Clone)]
pub struct UninstallRequest {
    pub browser: Browser,
    pub host_path: PathBuf,
    pub manifest_dir: Option<PathBuf>,
    pub unregister: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub launcher_path: PathBuf,
    pub manifest_path: PathBuf,
    pub registry_key: Option<String>,
}

/// What was actually removed. Artifacts that were already gone stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UninstallReport {
    pub launcher_path: Option<PathBuf>,
    pub manifest_path: Option<PathBuf>,
    pub registry_key: Option<String>,
}

/// Manifest location for `browser`.
///
/// An explicit directory wins. Otherwise Windows keeps the manifest in a
/// `manifest` directory beside the host, and other platforms use the
/// browser's per-user `NativeMessagingHosts` directory.
pub fn manifest_path_for(
    browser: Browser,
    host_dir: &Path,
    manifest_dir: Option<&Path>,
) -> Result<PathBuf, InstallError> {
    let file_name = format!("{}.json", HOST_NAME);

    if let Some(dir) = manifest_dir {
        return Ok(dir.join(file_name));
    }
    if cfg!(windows) {
        return Ok(host_dir.join("manifest").join(file_name));
    }
    browser
        .user_manifest_dir()
        .map(|dir| dir.join(file_name))
        .ok_or_else(|| InstallError::ManifestDirUnavailable {
            browser: browser.to_string(),
        })
}

fn absolute_host_path(host_path: &Path) -> Result<PathBuf, InstallError> {
    std::path::absolute(host_path).map_err(|source| InstallError::FileOperationFailed {
        path: host_path.display().to_string(),
        source,
    })
}

fn host_dir(host_path: &Path) -> PathBuf {
    host_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Registers the host so the extension can launch it.
///
/// Writes a launcher script next to the host, a manifest pointing at that
/// launcher, and on Windows the registry key naming the manifest. Running it
/// again overwrites the same files.
pub fn install(request: &InstallRequest) -> Result<InstallReport, InstallError> {
    info!(
        event = "core.install.install_started",
        browser = %request.browser,
        extension_id = %request.extension_id,
        host_path = %request.host_path.display()
    );

    // 1. Resolve and check the host executable
    let host_path = absolute_host_path(&request.host_path)?;
    if !host_path.is_file() {
        return Err(InstallError::HostNotFound {
            path: host_path.display().to_string(),
        });
    }
    let host_dir = host_dir(&host_path);

    // 2. Launcher beside the host
    let launcher_path = host_dir.join(LAUNCHER_FILE_NAME);
    write_launcher(&launcher_path, &host_path)?;

    // 3. Manifest naming the launcher
    let manifest_path =
        manifest_path_for(request.browser, &host_dir, request.manifest_dir.as_deref())?;
    let manifest = build_manifest(&request.extension_id, &launcher_path);
    write_manifest(&manifest_path, &manifest)?;

    // 4. Registry entry
    let registry_key = if request.register {
        registry::register(request.browser, &manifest_path)?
    } else {
        None
    };

    info!(
        event = "core.install.install_completed",
        launcher = %launcher_path.display(),
        manifest = %manifest_path.display(),
        registry_key = ?registry_key
    );

    Ok(InstallReport {
        launcher_path,
        manifest_path,
        registry_key,
    })
}

fn remove_if_present(path: &Path) -> Result<Option<PathBuf>, InstallError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(Some(path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!(event = "core.install.remove_skipped", path = %path.display());
            Ok(None)
        }
        Err(source) => Err(InstallError::FileOperationFailed {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Removes what `install` created. Missing pieces are skipped.
pub fn uninstall(request: &UninstallRequest) -> Result<UninstallReport, InstallError> {
    info!(
        event = "core.install.uninstall_started",
        browser = %request.browser,
        host_path = %request.host_path.display()
    );

    let host_path = absolute_host_path(&request.host_path)?;
    let host_dir = host_dir(&host_path);

    let registry_key = if request.unregister {
        registry::unregister(request.browser)?
    } else {
        None
    };

    let manifest_path =
        manifest_path_for(request.browser, &host_dir, request.manifest_dir.as_deref())?;
    let manifest_path = remove_if_present(&manifest_path)?;
    let launcher_path = remove_if_present(&host_dir.join(LAUNCHER_FILE_NAME))?;

    info!(
        event = "core.install.uninstall_completed",
        manifest_removed = manifest_path.is_some(),
        launcher_removed = launcher_path.is_some(),
        registry_removed = registry_key.is_some()
    );

    Ok(UninstallReport {
        launcher_path,
        manifest_path,
        registry_key,
    })
}
