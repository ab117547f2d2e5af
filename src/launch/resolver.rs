//! Artifact resolution.
//!
//! Resolution order:
//! 1. `artifact.local` in the working directory
//! 2. The cache entry for this version and runtime
//! 3. A fresh download into the cache entry

use std::ffi::OsString;
use std::path::PathBuf;

use super::exec::LaunchRequest;
use crate::cache::{local_override, ArtifactIdentity, CacheLocator};
use crate::config::ArtifactSettings;
use crate::context::{Context, RELAUNCHED_VAR, RUNTIME_VAR};
use crate::error::Result;
use crate::fetch::{Fetch, EXECUTABLE_MODE};
use crate::runtime::Runtime;

/// Resolves the artifact for one invocation and prepares its launch.
pub struct Launcher<'a, F: Fetch> {
    ctx: &'a Context,
    settings: &'a ArtifactSettings,
    runtime: &'a Runtime,
    fetcher: F,
}

impl<'a, F: Fetch> Launcher<'a, F> {
    pub fn new(
        ctx: &'a Context,
        settings: &'a ArtifactSettings,
        runtime: &'a Runtime,
        fetcher: F,
    ) -> Self {
        Self {
            ctx,
            settings,
            runtime,
            fetcher,
        }
    }

    /// Filename of the artifact build for the active runtime.
    pub fn identity(&self) -> Result<ArtifactIdentity> {
        ArtifactIdentity::from_pattern(
            &self.settings.filename_pattern,
            &self.settings.version,
            self.runtime.descriptor,
        )
    }

    /// Path of the executable to launch, downloading it if needed.
    pub fn resolve(&self) -> Result<PathBuf> {
        if let Some(path) = local_override(self.ctx.cwd()) {
            tracing::info!("Using local override {}", path.display());
            return Ok(path);
        }

        let identity = self.identity()?;
        let dest = CacheLocator::new(self.ctx.cache_root()).locate(&self.settings.name, &identity);
        if dest.exists() {
            tracing::debug!("Cache hit: {}", dest.display());
            return Ok(dest);
        }

        let url = self.settings.artifact_url(identity.as_str());
        self.fetcher.fetch(&url, &dest, Some(EXECUTABLE_MODE))?;
        Ok(dest)
    }

    /// Launch request for `artifact` with the caller's arguments.
    pub fn request(&self, artifact: PathBuf, args: Vec<OsString>) -> LaunchRequest {
        let request = if self.settings.use_runtime {
            let mut runtime_args = Vec::with_capacity(args.len() + 1);
            runtime_args.push(artifact.into_os_string());
            runtime_args.extend(args);
            LaunchRequest::new(self.runtime.path.clone(), runtime_args)
        } else {
            LaunchRequest::new(artifact, args)
        };
        // The artifact may run hoist again; that run starts fresh.
        request
            .env(RUNTIME_VAR, self.runtime.path.clone())
            .env_remove(RELAUNCHED_VAR)
    }
}
