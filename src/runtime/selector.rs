//! Runtime selection.
//!
//! Decides whether the active runtime is acceptable or whether hoist must
//! relaunch itself under a different one. [`decide`] is pure: PATH lookup is
//! injected, and the result is a [`RuntimeDecision`] rather than an exec.

use std::path::PathBuf;

use super::descriptor::{Runtime, RuntimeDescriptor};
use crate::context::RUNTIME_VERSION_VAR;
use crate::error::{HoistError, Result};

/// Which runtimes hoist accepts and prefers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePolicy {
    /// Executable base name; version `3.8` is looked up as `python3.8`.
    pub name: String,
    /// Executables tried, in order, when no runtime path is given.
    pub default_candidates: Vec<String>,
    /// Versions the artifact can run under.
    pub supported: Vec<RuntimeDescriptor>,
    /// Preferred minor per major version.
    pub preferred: Vec<RuntimeDescriptor>,
}

impl Default for RuntimePolicy {
    fn default() -> Self {
        Self {
            name: "python".to_string(),
            default_candidates: vec!["python3".to_string(), "python".to_string()],
            supported: vec![
                RuntimeDescriptor::new(3, 6),
                RuntimeDescriptor::new(3, 7),
                RuntimeDescriptor::new(3, 8),
                RuntimeDescriptor::new(3, 9),
            ],
            preferred: vec![RuntimeDescriptor::new(3, 8)],
        }
    }
}

impl RuntimePolicy {
    /// Conventional executable name for a runtime version.
    pub fn executable_name(&self, version: RuntimeDescriptor) -> String {
        format!("{}{}", self.name, version)
    }

    pub fn supports(&self, version: RuntimeDescriptor) -> bool {
        self.supported.contains(&version)
    }

    fn supported_list(&self) -> String {
        self.supported
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Outcome of runtime selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeDecision {
    /// Keep going with the active runtime.
    Continue(Runtime),
    /// Re-exec hoist with this runtime selected.
    Relaunch { runtime: PathBuf },
}

/// Decide between continuing and relaunching.
///
/// * `override_version` - raw `HOIST_RUNTIME_VERSION`, if set
/// * `relaunched` - whether this process is already a relaunch
/// * `lookup` - finds an executable by name on PATH
pub fn decide<F>(
    policy: &RuntimePolicy,
    active: &Runtime,
    override_version: Option<&str>,
    relaunched: bool,
    lookup: F,
) -> Result<RuntimeDecision>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    if let Some(raw) = override_version {
        let wanted: RuntimeDescriptor =
            raw.parse()
                .map_err(|_| HoistError::InvalidRuntimeVersion {
                    value: raw.to_string(),
                    var: RUNTIME_VERSION_VAR.to_string(),
                })?;

        if wanted != active.descriptor {
            let name = policy.executable_name(wanted);
            let path = lookup(&name).ok_or(HoistError::RuntimeNotFound { name })?;
            return relaunch(path, relaunched);
        }
    } else {
        for preferred in &policy.preferred {
            if preferred.major != active.descriptor.major
                || preferred.minor == active.descriptor.minor
            {
                continue;
            }
            if relaunched {
                tracing::debug!(
                    "Already relaunched; staying on {} instead of preferring {}",
                    active.descriptor,
                    preferred
                );
                break;
            }
            if let Some(path) = lookup(&policy.executable_name(*preferred)) {
                tracing::debug!(
                    "Preferring runtime {} at {}",
                    preferred,
                    path.display()
                );
                return relaunch(path, relaunched);
            }
        }
    }

    check_supported(policy, active)?;
    Ok(RuntimeDecision::Continue(active.clone()))
}

fn relaunch(path: PathBuf, relaunched: bool) -> Result<RuntimeDecision> {
    if relaunched {
        return Err(HoistError::RelaunchLoop { path });
    }
    Ok(RuntimeDecision::Relaunch { runtime: path })
}

fn check_supported(policy: &RuntimePolicy, active: &Runtime) -> Result<()> {
    if policy.supports(active.descriptor) {
        return Ok(());
    }
    Err(HoistError::UnsupportedRuntime {
        found: active.descriptor.to_string(),
        path: active.path.clone(),
        supported: policy.supported_list(),
    })
}

/// PATH lookup backed by the `which` crate.
pub fn which_lookup(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
