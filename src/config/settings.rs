//! Typed artifact settings.

use std::time::Duration;

use super::loader::IniConfig;
use crate::error::{HoistError, Result};

pub const KEY_VERSION: &str = "artifact_version";
pub const KEY_BASE_URL: &str = "artifact_base_url";
pub const KEY_FILENAME_PATTERN: &str = "artifact_filename_pattern";
pub const KEY_VERIFY_CHECKSUM: &str = "artifact_verify_checksum";
pub const KEY_NAME: &str = "artifact_name";
pub const KEY_MANIFEST: &str = "artifact_manifest";
pub const KEY_TIMEOUT_SECS: &str = "artifact_timeout_secs";
pub const KEY_USE_RUNTIME: &str = "artifact_use_runtime";

/// Default artifact name, also the cache `kind` directory.
pub const DEFAULT_NAME: &str = "artifact";

/// Default checksum manifest file name.
pub const DEFAULT_MANIFEST: &str = "SHA256SUMS";

/// Settings for the artifact this project pins, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactSettings {
    /// Pinned artifact version.
    pub version: String,
    /// Base URL; artifacts live under `<base_url>/<version>/`.
    pub base_url: String,
    /// Filename template with three `%s` slots: version, major, minor.
    pub filename_pattern: String,
    /// Verify downloads against the remote manifest.
    pub verify_checksum: bool,
    /// Artifact name, used as the cache `kind`.
    pub name: String,
    /// Manifest file name under `<base_url>/<version>/`.
    pub manifest: String,
    /// Request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Exec the runtime with the artifact as its first argument.
    pub use_runtime: bool,
}

impl ArtifactSettings {
    /// Resolve settings, applying defaults for optional keys.
    pub fn from_config(config: &IniConfig) -> Result<Self> {
        let version = config.get_required(KEY_VERSION, false)?;
        let base_url = config.get_required(KEY_BASE_URL, false)?;
        let name = config
            .get(KEY_NAME, false)?
            .unwrap_or_else(|| DEFAULT_NAME.to_string());
        let filename_pattern = config
            .get(KEY_FILENAME_PATTERN, true)?
            .unwrap_or_else(|| default_pattern(&name));
        let verify_checksum = config.get_bool(KEY_VERIFY_CHECKSUM)?.unwrap_or(false);
        let manifest = config
            .get(KEY_MANIFEST, false)?
            .unwrap_or_else(|| DEFAULT_MANIFEST.to_string());
        let timeout = config
            .get(KEY_TIMEOUT_SECS, false)?
            .map(|raw| {
                raw.parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|_| HoistError::InvalidConfig {
                        message: format!(
                            "'{KEY_TIMEOUT_SECS}' in {} must be a whole number of seconds, got {raw:?}",
                            config.file_name()
                        ),
                    })
            })
            .transpose()?;
        let use_runtime = config.get_bool(KEY_USE_RUNTIME)?.unwrap_or(false);

        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(HoistError::InvalidConfig {
                message: format!("'{KEY_NAME}' must be a plain directory name, got {name:?}"),
            });
        }

        Ok(Self {
            version,
            base_url,
            filename_pattern,
            verify_checksum,
            name,
            manifest,
            timeout,
            use_runtime,
        })
    }

    /// Directory URL holding every file for the pinned version.
    pub fn version_url(&self) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), self.version)
    }

    /// URL of an artifact file for the pinned version.
    pub fn artifact_url(&self, filename: &str) -> String {
        format!("{}/{}", self.version_url(), filename)
    }

    /// URL of the checksum manifest for the pinned version.
    pub fn manifest_url(&self) -> String {
        format!("{}/{}", self.version_url(), self.manifest)
    }
}

/// Filename pattern used when none is configured.
pub fn default_pattern(name: &str) -> String {
    format!("{name}-%s-py%s%s")
}
