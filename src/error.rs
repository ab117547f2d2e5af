//! Error types for hoist operations.
//!
//! This module defines [`HoistError`], the single error type used throughout
//! the launcher, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every error is terminal for the current invocation; nothing retries
//! - Messages carry the URL, path or expected/actual values needed to
//!   diagnose the failure without reading the source
//! - [`HoistError::exit_code`] maps each error onto the process exit code

use std::path::PathBuf;
use thiserror::Error;

/// Exit code for every fatal error except checksum failures.
pub const EXIT_FAILURE: u8 = 1;

/// Exit code reserved for checksum verification failures.
pub const EXIT_CHECKSUM_MISMATCH: u8 = 3;

/// Core error type for hoist operations.
#[derive(Debug, Error)]
pub enum HoistError {
    /// Config file missing from the working directory.
    #[error(
        "Configuration not found: {path} (run hoist from the directory that contains {file})"
    )]
    ConfigNotFound { path: PathBuf, file: String },

    /// Required key absent from the DEFAULT section.
    #[error("Missing required key '{key}' in the [DEFAULT] section of {file}")]
    MissingConfigKey { key: String, file: String },

    /// Malformed config file or value.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Runtime override not of the form `major.minor`.
    #[error("Invalid runtime version '{value}' in {var}: expected <major>.<minor>, e.g. 3.8")]
    InvalidRuntimeVersion { value: String, var: String },

    /// No runtime executable could be found.
    #[error("Runtime not found: {name} is not on PATH")]
    RuntimeNotFound { name: String },

    /// The active runtime is outside the supported set.
    #[error("Unsupported runtime {found} at {path}; supported versions: {supported}")]
    UnsupportedRuntime {
        found: String,
        path: PathBuf,
        supported: String,
    },

    /// A relaunched process asked to be relaunched again.
    #[error("Refusing to relaunch twice: already relaunched, selection still wants {path}")]
    RelaunchLoop { path: PathBuf },

    /// Artifact download failed.
    #[error("Failed to download {url}: {message}")]
    Download { url: String, message: String },

    /// Checksum manifest could not be fetched.
    #[error("Failed to fetch checksum manifest {url}: {message}")]
    ManifestUnavailable { url: String, message: String },

    /// Manifest has no line for the artifact.
    #[error("Checksum manifest {url} has no entry for '{filename}'")]
    ManifestEntryMissing { url: String, filename: String },

    /// Received byte count differs from the advertised Content-Length.
    #[error("Download of {url} was truncated or corrupted: expected {expected} bytes, received {received}")]
    LengthMismatch {
        url: String,
        expected: u64,
        received: u64,
    },

    /// Downloaded content does not hash to the manifest digest.
    #[error(
        "Checksum mismatch for {filename}: expected {expected}, got {actual}. \
         The download may be corrupted; please run the command again to retry"
    )]
    ChecksumMismatch {
        filename: String,
        expected: String,
        actual: String,
    },

    /// Creating a directory failed for a reason other than it existing.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Process replacement failed.
    #[error("Failed to execute {path}: {source}")]
    Exec {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HoistError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            HoistError::ChecksumMismatch { .. } => EXIT_CHECKSUM_MISMATCH,
            _ => EXIT_FAILURE,
        }
    }
}

/// Result type alias for hoist operations.
pub type Result<T> = std::result::Result<T, HoistError>;
