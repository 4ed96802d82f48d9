use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing::info;

use super::errors::InstallError;
use super::types::{ExtensionId, HostManifest};
use super::{HOST_DESCRIPTION, HOST_NAME};

/// Manifest allowing `extension_id` to launch the program at `launch_path`.
pub fn build_manifest(extension_id: &ExtensionId, launch_path: &Path) -> HostManifest {
    HostManifest {
        name: HOST_NAME.to_string(),
        description: HOST_DESCRIPTION.to_string(),
        path: launch_path.display().to_string(),
        host_type: "stdio".to_string(),
        allowed_origins: vec![extension_id.origin()],
    }
}

/// Pretty JSON with four-space indentation.
pub fn manifest_to_json(manifest: &HostManifest) -> Result<String, InstallError> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    manifest
        .serialize(&mut serializer)
        .map_err(|e| InstallError::ManifestSerializationFailed {
            message: e.to_string(),
        })?;
    String::from_utf8(out).map_err(|e| InstallError::ManifestSerializationFailed {
        message: e.to_string(),
    })
}

/// Write `manifest` to `path`, creating parent directories.
pub fn write_manifest(path: &Path, manifest: &HostManifest) -> Result<(), InstallError> {
    let json = manifest_to_json(manifest)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| InstallError::FileOperationFailed {
            path: parent.display().to_string(),
            source,
        })?;
    }
    fs::write(path, json).map_err(|source| InstallError::FileOperationFailed {
        path: path.display().to_string(),
        source,
    })?;

    info!(event = "core.install.manifest_written", path = %path.display());
    Ok(())
}
