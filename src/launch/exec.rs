//! Process replacement.
//!
//! [`Launch`] is the only place hoist hands control to another program.
//! [`Exec`] replaces the current process image; tests substitute a
//! recording implementation.

use std::convert::Infallible;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use crate::error::{HoistError, Result};

/// A program to run in place of hoist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Executable to run.
    pub program: PathBuf,
    /// Arguments after `argv[0]`.
    pub args: Vec<OsString>,
    /// Variables added to the inherited environment.
    pub env: Vec<(OsString, OsString)>,
    /// Inherited variables the program must not see.
    pub env_remove: Vec<OsString>,
}

impl LaunchRequest {
    pub fn new(program: impl Into<PathBuf>, args: Vec<OsString>) -> Self {
        Self {
            program: program.into(),
            args,
            env: Vec::new(),
            env_remove: Vec::new(),
        }
    }

    /// Add an environment variable.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Drop an inherited environment variable.
    pub fn env_remove(mut self, key: impl Into<OsString>) -> Self {
        self.env_remove.push(key.into());
        self
    }

    /// The equivalent [`Command`].
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for key in &self.env_remove {
            cmd.env_remove(key);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}

/// Hands the process over to another program.
pub trait Launch {
    /// Run `request` in place of the current process.
    ///
    /// Only returns on failure.
    fn launch(&self, request: &LaunchRequest) -> Result<Infallible>;
}

/// Replaces the process image (`execvp` on unix).
#[derive(Debug, Clone, Copy, Default)]
pub struct Exec;

impl Launch for Exec {
    fn launch(&self, request: &LaunchRequest) -> Result<Infallible> {
        tracing::debug!(
            "Executing {} with {} argument(s)",
            request.program.display(),
            request.args.len()
        );
        let source = replace_process(request.command());
        Err(HoistError::Exec {
            path: request.program.clone(),
            source,
        })
    }
}

#[cfg(unix)]
fn replace_process(mut cmd: Command) -> std::io::Error {
    use std::os::unix::process::CommandExt;
    cmd.exec()
}

/// Without `exec`, run the program to completion and mirror its exit status.
#[cfg(not(unix))]
fn replace_process(mut cmd: Command) -> std::io::Error {
    match cmd.status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(e) => e,
    }
}
