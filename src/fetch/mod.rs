//! Artifact fetching.
//!
//! [`Fetch`] is the seam the launcher downloads through; [`HttpFetcher`] is
//! the real implementation.

pub mod checksum;
pub mod http;
pub mod manifest;
pub mod progress;

use std::path::Path;

use crate::error::Result;

pub use checksum::{sha256_file, verify_digest};
pub use http::HttpFetcher;
pub use manifest::ChecksumManifest;
pub use progress::DownloadProgress;

/// File mode applied to published executables.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Places a remote file at a local path.
pub trait Fetch {
    /// Download `url` to `dest` unless `dest` already exists.
    ///
    /// Returns whether a transfer happened. `mode` is applied to `dest`
    /// after it is published.
    fn fetch(&self, url: &str, dest: &Path, mode: Option<u32>) -> Result<bool>;
}
