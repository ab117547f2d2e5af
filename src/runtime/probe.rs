//! Active runtime discovery.
//!
//! The active runtime is the one named by `HOIST_RUNTIME` when hoist was
//! relaunched, otherwise the first default candidate found on PATH. Its
//! version comes from running `<runtime> --version`.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context as _;

use super::descriptor::{Runtime, RuntimeDescriptor};
use super::selector::RuntimePolicy;
use crate::error::{HoistError, Result};

/// Find the active runtime and its version.
pub fn discover<F>(policy: &RuntimePolicy, explicit: Option<&Path>, lookup: F) -> Result<Runtime>
where
    F: Fn(&str) -> Option<PathBuf>,
{
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => policy
            .default_candidates
            .iter()
            .find_map(|name| lookup(name))
            .ok_or_else(|| HoistError::RuntimeNotFound {
                name: policy.default_candidates.join(" or "),
            })?,
    };

    let descriptor = probe_version(&path)?;
    tracing::debug!("Active runtime {} at {}", descriptor, path.display());
    Ok(Runtime { path, descriptor })
}

/// Run `<path> --version` and parse the reported `major.minor`.
///
/// Older interpreters print their version on stderr, so both streams are
/// searched.
pub fn probe_version(path: &Path) -> Result<RuntimeDescriptor> {
    let output = Command::new(path)
        .arg("--version")
        .output()
        .with_context(|| format!("Failed to run {} --version", path.display()))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    RuntimeDescriptor::from_version_output(&stdout)
        .or_else(|| RuntimeDescriptor::from_version_output(&stderr))
        .ok_or_else(|| HoistError::UnsupportedRuntime {
            found: format!("unknown version ({})", stdout.trim()),
            path: path.to_path_buf(),
            supported: "a runtime that reports <major>.<minor> from --version".to_string(),
        })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn fake_runtime(dir: &Path, name: &str, script: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn probes_version_from_stdout() {
        let temp = TempDir::new().unwrap();
        let path = fake_runtime(temp.path(), "python3", "echo 'Python 3.8.10'");
        assert_eq!(probe_version(&path).unwrap(), RuntimeDescriptor::new(3, 8));
    }

    #[test]
    fn probes_version_from_stderr() {
        let temp = TempDir::new().unwrap();
        let path = fake_runtime(temp.path(), "python2", "echo 'Python 2.7.18' >&2");
        assert_eq!(probe_version(&path).unwrap(), RuntimeDescriptor::new(2, 7));
    }

    #[test]
    fn unparseable_version_is_unsupported() {
        let temp = TempDir::new().unwrap();
        let path = fake_runtime(temp.path(), "python3", "echo 'no idea'");
        let err = probe_version(&path).unwrap_err();
        assert!(matches!(err, HoistError::UnsupportedRuntime { .. }));
    }

    #[test]
    fn missing_executable_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(probe_version(&temp.path().join("nope")).is_err());
    }

    #[test]
    fn discover_uses_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = fake_runtime(temp.path(), "python3.9", "echo 'Python 3.9.1'");
        let runtime = discover(&RuntimePolicy::default(), Some(&path), |_| None).unwrap();
        assert_eq!(runtime.path, path);
        assert_eq!(runtime.descriptor, RuntimeDescriptor::new(3, 9));
    }

    #[test]
    fn discover_tries_candidates_in_order() {
        let temp = TempDir::new().unwrap();
        let python = fake_runtime(temp.path(), "python", "echo 'Python 3.7.3'");
        let dir = temp.path().to_path_buf();
        let runtime = discover(&RuntimePolicy::default(), None, |name| {
            let candidate = dir.join(name);
            candidate.exists().then_some(candidate)
        })
        .unwrap();
        assert_eq!(runtime.path, python);
        assert_eq!(runtime.descriptor, RuntimeDescriptor::new(3, 7));
    }

    #[test]
    fn discover_without_candidates_fails() {
        let err = discover(&RuntimePolicy::default(), None, |_| None).unwrap_err();
        match err {
            HoistError::RuntimeNotFound { name } => assert_eq!(name, "python3 or python"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
