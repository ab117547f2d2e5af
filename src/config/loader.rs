//! Loading `hoist.ini` from the working directory.
//!
//! Only the `[DEFAULT]` section is consulted. Lines before any section
//! header belong to it as well; other sections are parsed and ignored.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::interpolation::interpolate;
use crate::error::{HoistError, Result};

/// Name of the config file expected in the working directory.
pub const CONFIG_FILE: &str = "hoist.ini";

const DEFAULT_SECTION: &str = "DEFAULT";

/// Key/value view of the DEFAULT section of an INI file.
#[derive(Debug, Clone)]
pub struct IniConfig {
    path: PathBuf,
    defaults: HashMap<String, String>,
}

impl IniConfig {
    /// Load [`CONFIG_FILE`] from `dir`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file doesn't exist.
    /// Returns `InvalidConfig` if a line cannot be parsed.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let content = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HoistError::ConfigNotFound {
                    path: path.clone(),
                    file: CONFIG_FILE.to_string(),
                }
            } else {
                HoistError::Io(e)
            }
        })?;
        let config = Self::parse(&path, &content)?;
        tracing::debug!(
            "Loaded {} keys from {}",
            config.defaults.len(),
            config.path().display()
        );
        Ok(config)
    }

    /// Parse INI text; `path` is only used in messages.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let mut defaults: HashMap<String, String> = HashMap::new();
        let mut in_default = true;
        let mut last_key: Option<String> = None;

        for (index, raw_line) in content.lines().enumerate() {
            let line_no = index + 1;
            let line = raw_line.trim_end();
            let trimmed = line.trim_start();

            if trimmed.is_empty() {
                last_key = None;
                continue;
            }
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            // Indented lines continue the previous value.
            if line.len() != trimmed.len() {
                if let Some(key) = &last_key {
                    if in_default {
                        if let Some(value) = defaults.get_mut(key) {
                            value.push('\n');
                            value.push_str(trimmed);
                        }
                    }
                    continue;
                }
            }

            if let Some(header) = trimmed.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .ok_or_else(|| invalid(path, line_no, "unterminated section header"))?;
                in_default = name.trim() == DEFAULT_SECTION;
                last_key = None;
                continue;
            }

            let split = trimmed
                .find(['=', ':'])
                .ok_or_else(|| invalid(path, line_no, "expected 'key = value'"))?;
            let key = trimmed[..split].trim().to_lowercase();
            let value = trimmed[split + 1..].trim().to_string();
            if key.is_empty() {
                return Err(invalid(path, line_no, "empty key"));
            }

            if in_default {
                if defaults.contains_key(&key) {
                    return Err(invalid(path, line_no, &format!("duplicate key '{key}'")));
                }
                defaults.insert(key.clone(), value);
            }
            last_key = Some(key);
        }

        Ok(Self {
            path: path.to_path_buf(),
            defaults,
        })
    }

    /// Path the config was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used in diagnostics.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| CONFIG_FILE.to_string())
    }

    /// Look up an optional key; `raw` skips interpolation.
    pub fn get(&self, key: &str, raw: bool) -> Result<Option<String>> {
        let Some(value) = self.defaults.get(&key.to_lowercase()) else {
            return Ok(None);
        };
        if raw {
            return Ok(Some(value.clone()));
        }
        interpolate(key, value, &self.defaults).map(Some)
    }

    /// Look up a key that must be present.
    ///
    /// # Errors
    ///
    /// Returns `MissingConfigKey` naming the key and the config file.
    pub fn get_required(&self, key: &str, raw: bool) -> Result<String> {
        self.get(key, raw)?
            .ok_or_else(|| HoistError::MissingConfigKey {
                key: key.to_string(),
                file: self.file_name(),
            })
    }

    /// Look up an optional boolean (`1/yes/true/on`, `0/no/false/off`).
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let Some(value) = self.get(key, false)? else {
            return Ok(None);
        };
        match value.to_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Ok(Some(true)),
            "0" | "no" | "false" | "off" => Ok(Some(false)),
            _ => Err(HoistError::InvalidConfig {
                message: format!("'{key}' in {} is not a boolean: {value:?}", self.file_name()),
            }),
        }
    }
}

fn invalid(path: &Path, line_no: usize, message: &str) -> HoistError {
    HoistError::InvalidConfig {
        message: format!("{}:{line_no}: {message}", path.display()),
    }
}
