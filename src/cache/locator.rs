//! Cache entry paths and the local override file.

use std::path::{Path, PathBuf};

use super::identity::ArtifactIdentity;

/// Working-directory file that replaces the cached artifact when present.
pub const LOCAL_OVERRIDE_FILE: &str = "artifact.local";

/// Subdirectory of the cache root holding executables.
const BIN_DIR: &str = "bin";

/// Computes where artifacts live under a cache root.
#[derive(Debug, Clone)]
pub struct CacheLocator {
    /// Root directory for cache.
    root: PathBuf,
}

impl CacheLocator {
    /// Create a locator for a cache root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the cache entry for `identity`.
    pub fn locate(&self, kind: &str, identity: &ArtifactIdentity) -> PathBuf {
        locate(identity, &self.root, kind)
    }
}

/// `<cache_root>/bin/<kind>/<identity>`.
pub fn locate(identity: &ArtifactIdentity, cache_root: &Path, kind: &str) -> PathBuf {
    cache_root.join(BIN_DIR).join(kind).join(identity.as_str())
}

/// The local override in `cwd`, if one exists.
pub fn local_override(cwd: &Path) -> Option<PathBuf> {
    let path = cwd.join(LOCAL_OVERRIDE_FILE);
    path.is_file().then_some(path)
}
