use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::HOST_NAME;
use super::errors::InstallError;

const ORIGIN_SCHEME: &str = "chrome-extension://";
const EXTENSION_ID_LEN: usize = 32;

/// Chromium-family browsers the host can register with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Browser {
    #[default]
    Chrome,
    Chromium,
    Edge,
}

impl Browser {
    pub const ALL: [Browser; 3] = [Browser::Chrome, Browser::Chromium, Browser::Edge];

    /// Parse a browser name (case-insensitive).
    pub fn parse(name: &str) -> Result<Self, InstallError> {
        match name.to_lowercase().as_str() {
            "chrome" | "google-chrome" => Ok(Browser::Chrome),
            "chromium" => Ok(Browser::Chromium),
            "edge" | "msedge" | "microsoft-edge" => Ok(Browser::Edge),
            _ => Err(InstallError::UnknownBrowser {
                name: name.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Chromium => "chromium",
            Browser::Edge => "edge",
        }
    }

    /// Registry key under `HKEY_CURRENT_USER` naming the manifest path.
    pub fn registry_key(&self) -> String {
        let vendor = match self {
            Browser::Chrome => r"Google\Chrome",
            Browser::Chromium => "Chromium",
            Browser::Edge => r"Microsoft\Edge",
        };
        format!(r"Software\{}\NativeMessagingHosts\{}", vendor, HOST_NAME)
    }

    /// Per-user manifest directory, relative to the platform config dir.
    ///
    /// `None` on Windows, where the manifest location comes from the registry.
    fn user_manifest_subdir(&self) -> Option<&'static str> {
        if cfg!(target_os = "macos") {
            Some(match self {
                Browser::Chrome => "Google/Chrome/NativeMessagingHosts",
                Browser::Chromium => "Chromium/NativeMessagingHosts",
                Browser::Edge => "Microsoft Edge/NativeMessagingHosts",
            })
        } else if cfg!(windows) {
            None
        } else {
            Some(match self {
                Browser::Chrome => "google-chrome/NativeMessagingHosts",
                Browser::Chromium => "chromium/NativeMessagingHosts",
                Browser::Edge => "microsoft-edge/NativeMessagingHosts",
            })
        }
    }

    /// Directory the browser scans for user-level host manifests.
    pub fn user_manifest_dir(&self) -> Option<PathBuf> {
        let subdir = self.user_manifest_subdir()?;
        dirs::config_dir().map(|dir| dir.join(subdir))
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated Chromium extension id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExtensionId(String);

impl ExtensionId {
    /// Accepts a bare id, or one wrapped as `chrome-extension://<id>/`.
    ///
    /// Ids are 32 characters from `a` to `p`; uppercase input is folded.
    pub fn parse(input: &str) -> Result<Self, InstallError> {
        let trimmed = input.trim();
        let bare = trimmed
            .strip_prefix(ORIGIN_SCHEME)
            .unwrap_or(trimmed)
            .trim_end_matches('/')
            .to_lowercase();

        let valid = bare.len() == EXTENSION_ID_LEN && bare.chars().all(|c| ('a'..='p').contains(&c));
        if !valid {
            return Err(InstallError::InvalidExtensionId {
                id: input.to_string(),
            });
        }
        Ok(Self(bare))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The origin string used in `allowed_origins`.
    pub fn origin(&self) -> String {
        format!("{}{}/", ORIGIN_SCHEME, self.0)
    }
}

impl fmt::Display for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Native messaging host manifest, as read by the browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostManifest {
    pub name: String,
    pub description: String,
    /// Absolute path of the program the browser launches.
    pub path: String,
    /// Always `"stdio"`.
    #[serde(rename = "type")]
    pub host_type: String,
    pub allowed_origins: Vec<String>,
}
