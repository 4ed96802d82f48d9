//! `HKEY_CURRENT_USER` registration of the manifest path (Windows only).

use std::path::Path;

use super::errors::InstallError;
use super::types::Browser;

#[cfg(windows)]
pub fn register(browser: Browser, manifest_path: &Path) -> Result<Option<String>, InstallError> {
    use windows::Win32::Foundation::ERROR_SUCCESS;
    use windows::Win32::System::Registry::{HKEY_CURRENT_USER, REG_SZ, RegSetKeyValueW};
    use windows::core::{HSTRING, PCWSTR};

    let key = browser.registry_key();
    let data: Vec<u16> = manifest_path
        .display()
        .to_string()
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect();
    let byte_len = (data.len() * std::mem::size_of::<u16>()) as u32;

    // Creates the key when absent; the default value holds the manifest path.
    let status = unsafe {
        RegSetKeyValueW(
            HKEY_CURRENT_USER,
            &HSTRING::from(key.as_str()),
            PCWSTR::null(),
            REG_SZ.0,
            Some(data.as_ptr().cast()),
            byte_len,
        )
    };
    if status != ERROR_SUCCESS {
        return Err(InstallError::RegistryFailed { key, code: status.0 });
    }

    tracing::info!(event = "core.install.registry_written", key = %key);
    Ok(Some(key))
}

/// Removes the key. A key that does not exist counts as removed.
#[cfg(windows)]
pub fn unregister(browser: Browser) -> Result<Option<String>, InstallError> {
    use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_SUCCESS};
    use windows::Win32::System::Registry::{HKEY_CURRENT_USER, RegDeleteKeyW};
    use windows::core::HSTRING;

    let key = browser.registry_key();
    let status = unsafe { RegDeleteKeyW(HKEY_CURRENT_USER, &HSTRING::from(key.as_str())) };
    if status == ERROR_FILE_NOT_FOUND {
        return Ok(None);
    }
    if status != ERROR_SUCCESS {
        return Err(InstallError::RegistryFailed { key, code: status.0 });
    }

    tracing::info!(event = "core.install.registry_removed", key = %key);
    Ok(Some(key))
}

/// Browsers outside Windows read manifests straight from disk.
#[cfg(not(windows))]
pub fn register(_browser: Browser, _manifest_path: &Path) -> Result<Option<String>, InstallError> {
    Ok(None)
}

#[cfg(not(windows))]
pub fn unregister(_browser: Browser) -> Result<Option<String>, InstallError> {
    Ok(None)
}
