//! Process-scoped launch context.
//!
//! Everything hoist reads from the process environment is captured once at
//! startup into a [`Context`] and handed to each component explicitly.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::anyhow;

use crate::error::Result;

/// Selects a specific runtime version, e.g. `3.8`.
pub const RUNTIME_VERSION_VAR: &str = "HOIST_RUNTIME_VERSION";

/// Enables debug logging when set to anything but empty or `0`.
pub const DEBUG_VAR: &str = "HOIST_DEBUG";

/// Path of the runtime to use; set by hoist when it relaunches itself.
pub const RUNTIME_VAR: &str = "HOIST_RUNTIME";

/// Marks a process that hoist already relaunched once.
pub const RELAUNCHED_VAR: &str = "HOIST_RELAUNCHED";

/// Overrides the cache root (default `~/.hoist`).
pub const CACHE_DIR_VAR: &str = "HOIST_CACHE_DIR";

/// Directory under the home directory holding the cache.
const DEFAULT_CACHE_DIR: &str = ".hoist";

/// Environment-derived settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    /// Raw value of `HOIST_RUNTIME_VERSION`.
    pub runtime_version: Option<String>,
    /// Value of `HOIST_RUNTIME`.
    pub runtime_path: Option<PathBuf>,
    /// Whether `HOIST_RELAUNCHED` is set.
    pub relaunched: bool,
    /// Whether `HOIST_DEBUG` is enabled.
    pub debug: bool,
    /// Value of `HOIST_CACHE_DIR`.
    pub cache_dir: Option<PathBuf>,
}

impl EnvSettings {
    /// Read settings from the current process environment.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars_os())
    }

    /// Read settings from an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut settings = Self::default();
        for (key, value) in vars {
            let Some(key) = key.to_str() else { continue };
            if value.is_empty() {
                continue;
            }
            match key {
                RUNTIME_VERSION_VAR => {
                    settings.runtime_version = Some(value.to_string_lossy().trim().to_string())
                }
                RUNTIME_VAR => settings.runtime_path = Some(PathBuf::from(value)),
                RELAUNCHED_VAR => settings.relaunched = true,
                DEBUG_VAR => settings.debug = value.to_string_lossy() != "0",
                CACHE_DIR_VAR => settings.cache_dir = Some(PathBuf::from(value)),
                _ => {}
            }
        }
        settings
    }
}

/// Read-only context shared by every stage of a launch.
#[derive(Debug, Clone)]
pub struct Context {
    cwd: PathBuf,
    cache_root: PathBuf,
    env: EnvSettings,
}

impl Context {
    /// Build the context for this process from already-read settings.
    pub fn with_settings(env: EnvSettings) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        let cache_root = match &env.cache_dir {
            Some(dir) => dir.clone(),
            None => dirs::home_dir()
                .ok_or_else(|| {
                    anyhow!("Could not determine the home directory; set {CACHE_DIR_VAR}")
                })?
                .join(DEFAULT_CACHE_DIR),
        };
        Ok(Self::new(cwd, cache_root, env))
    }

    /// Build a context from explicit parts.
    pub fn new(cwd: impl Into<PathBuf>, cache_root: impl Into<PathBuf>, env: EnvSettings) -> Self {
        Self {
            cwd: cwd.into(),
            cache_root: cache_root.into(),
            env,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    pub fn env(&self) -> &EnvSettings {
        &self.env
    }
}
