//! The launch pipeline.
//!
//! Runtime negotiation, configuration, artifact resolution and the final
//! process replacement, in that order.

use std::convert::Infallible;
use std::path::PathBuf;

use anyhow::Context as _;

use super::args::Cli;
use crate::config::{ArtifactSettings, IniConfig};
use crate::context::{Context, RELAUNCHED_VAR, RUNTIME_VAR};
use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::launch::{Launch, LaunchRequest, Launcher};
use crate::runtime::{decide, discover, which_lookup, RuntimeDecision, RuntimePolicy};

type Lookup = Box<dyn Fn(&str) -> Option<PathBuf>>;

/// Runs the artifact pinned by `hoist.ini` with the caller's arguments.
pub struct RunCommand<'a> {
    cli: Cli,
    ctx: &'a Context,
    policy: RuntimePolicy,
    lookup: Lookup,
}

impl<'a> RunCommand<'a> {
    pub fn new(cli: Cli, ctx: &'a Context) -> Self {
        Self {
            cli,
            ctx,
            policy: RuntimePolicy::default(),
            lookup: Box::new(which_lookup),
        }
    }

    /// Replace the PATH lookup used to find runtimes.
    pub fn with_lookup(mut self, lookup: impl Fn(&str) -> Option<PathBuf> + 'static) -> Self {
        self.lookup = Box::new(lookup);
        self
    }

    /// Run the pipeline. Only returns on failure.
    pub fn execute<L: Launch>(&self, launcher: &L) -> Result<Infallible> {
        let env = self.ctx.env();
        let lookup = |name: &str| (self.lookup)(name);

        let active = discover(&self.policy, env.runtime_path.as_deref(), lookup)?;
        let decision = decide(
            &self.policy,
            &active,
            env.runtime_version.as_deref(),
            env.relaunched,
            lookup,
        )?;

        let runtime = match decision {
            RuntimeDecision::Continue(runtime) => runtime,
            RuntimeDecision::Relaunch { runtime } => {
                tracing::info!("Relaunching under {}", runtime.display());
                return launcher.launch(&self.relaunch_request(runtime)?);
            }
        };

        let config = IniConfig::load(self.ctx.cwd())?;
        let settings = ArtifactSettings::from_config(&config)?;
        tracing::debug!(
            "Artifact {} {} from {}",
            settings.name,
            settings.version,
            settings.base_url
        );

        let mut fetcher = HttpFetcher::new(settings.timeout)?;
        if settings.verify_checksum {
            fetcher = fetcher.verify_against(settings.manifest_url());
        }

        let resolver = Launcher::new(self.ctx, &settings, &runtime, fetcher);
        let artifact = resolver.resolve()?;
        launcher.launch(&resolver.request(artifact, self.cli.args.clone()))
    }

    fn relaunch_request(&self, runtime: PathBuf) -> Result<LaunchRequest> {
        let exe = std::env::current_exe().context("Failed to locate the hoist executable")?;
        Ok(LaunchRequest::new(exe, self.cli.args.clone())
            .env(RUNTIME_VAR, runtime)
            .env(RELAUNCHED_VAR, "1"))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::context::EnvSettings;
    use crate::error::HoistError;
    use std::cell::RefCell;
    use std::ffi::OsString;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::TempDir;

    /// Captures the request instead of replacing the process.
    #[derive(Default)]
    struct RecordingLauncher {
        request: RefCell<Option<LaunchRequest>>,
    }

    impl Launch for RecordingLauncher {
        fn launch(&self, request: &LaunchRequest) -> Result<Infallible> {
            *self.request.borrow_mut() = Some(request.clone());
            Err(anyhow::anyhow!("recorded").into())
        }
    }

    fn executable(dir: &Path, name: &str, script: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    struct Fixture {
        bin: TempDir,
        cwd: TempDir,
        cache: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                bin: TempDir::new().unwrap(),
                cwd: TempDir::new().unwrap(),
                cache: TempDir::new().unwrap(),
            }
        }

        fn runtime(&self, name: &str, version: &str) -> PathBuf {
            executable(self.bin.path(), name, &format!("echo 'Python {version}'"))
        }

        fn config(&self, text: &str) {
            fs::write(self.cwd.path().join("hoist.ini"), text).unwrap();
        }

        fn ctx(&self, env: EnvSettings) -> Context {
            Context::new(self.cwd.path(), self.cache.path(), env)
        }

        fn command<'a>(&self, ctx: &'a Context, args: &[&str]) -> RunCommand<'a> {
            let bin = self.bin.path().to_path_buf();
            RunCommand::new(Cli::from_args(args.iter().copied()), ctx).with_lookup(move |name| {
                let candidate = bin.join(name);
                candidate.exists().then_some(candidate)
            })
        }
    }

    fn recorded(launcher: &RecordingLauncher) -> LaunchRequest {
        launcher.request.borrow().clone().expect("launch was not called")
    }

    #[test]
    fn local_override_is_launched_with_args() {
        let fx = Fixture::new();
        let python = fx.runtime("python3", "3.8.10");
        fx.config("[DEFAULT]\nartifact_version = 1.2.3\nartifact_base_url = http://127.0.0.1:9/a\n");
        let local = executable(fx.cwd.path(), "artifact.local", "exit 0");
        let ctx = fx.ctx(EnvSettings::default());
        let launcher = RecordingLauncher::default();

        let err = fx
            .command(&ctx, &["--", "status"])
            .execute(&launcher)
            .unwrap_err();

        assert_eq!(err.to_string(), "recorded");
        let request = recorded(&launcher);
        assert_eq!(request.program, local);
        assert_eq!(
            request.args,
            vec![OsString::from("--"), OsString::from("status")]
        );
        assert_eq!(
            request.env,
            vec![(OsString::from(RUNTIME_VAR), python.into_os_string())]
        );
    }

    #[test]
    fn cached_artifact_is_launched_without_network() {
        let fx = Fixture::new();
        fx.runtime("python3", "3.8.10");
        fx.config("[DEFAULT]\nartifact_version = 1.2.3\nartifact_base_url = http://127.0.0.1:9/a\n");
        let cached = fx.cache.path().join("bin/artifact/artifact-1.2.3-py38");
        fs::create_dir_all(cached.parent().unwrap()).unwrap();
        fs::write(&cached, "cached").unwrap();
        let ctx = fx.ctx(EnvSettings::default());
        let launcher = RecordingLauncher::default();

        fx.command(&ctx, &[]).execute(&launcher).unwrap_err();

        assert_eq!(recorded(&launcher).program, cached);
    }

    #[test]
    fn preferred_runtime_triggers_relaunch() {
        let fx = Fixture::new();
        fx.runtime("python3", "3.7.3");
        let preferred = fx.runtime("python3.8", "3.8.10");
        let ctx = fx.ctx(EnvSettings::default());
        let launcher = RecordingLauncher::default();

        fx.command(&ctx, &["x"]).execute(&launcher).unwrap_err();

        let request = recorded(&launcher);
        assert_eq!(request.program, std::env::current_exe().unwrap());
        assert_eq!(request.args, vec![OsString::from("x")]);
        assert_eq!(
            request.env,
            vec![
                (OsString::from(RUNTIME_VAR), preferred.into_os_string()),
                (OsString::from(RELAUNCHED_VAR), OsString::from("1")),
            ]
        );
    }

    #[test]
    fn relaunch_happens_before_config_is_read() {
        let fx = Fixture::new();
        fx.runtime("python3", "3.7.3");
        fx.runtime("python3.8", "3.8.10");
        let ctx = fx.ctx(EnvSettings::default());
        let launcher = RecordingLauncher::default();

        // No hoist.ini exists, yet the relaunch still happens.
        let err = fx.command(&ctx, &[]).execute(&launcher).unwrap_err();
        assert_eq!(err.to_string(), "recorded");
    }

    #[test]
    fn relaunched_process_uses_explicit_runtime() {
        let fx = Fixture::new();
        fx.runtime("python3", "3.7.3");
        let selected = fx.runtime("python3.8", "3.8.10");
        fx.config("[DEFAULT]\nartifact_version = 1.2.3\nartifact_base_url = http://127.0.0.1:9/a\n");
        executable(fx.cwd.path(), "artifact.local", "exit 0");
        let ctx = fx.ctx(EnvSettings {
            runtime_path: Some(selected.clone()),
            relaunched: true,
            ..EnvSettings::default()
        });
        let launcher = RecordingLauncher::default();

        fx.command(&ctx, &[]).execute(&launcher).unwrap_err();

        let request = recorded(&launcher);
        assert_eq!(
            request.env,
            vec![(OsString::from(RUNTIME_VAR), selected.into_os_string())]
        );
    }

    #[test]
    fn missing_version_key_is_reported() {
        let fx = Fixture::new();
        fx.runtime("python3", "3.8.10");
        fx.config("[DEFAULT]\nartifact_base_url = http://127.0.0.1:9/a\n");
        let ctx = fx.ctx(EnvSettings::default());
        let launcher = RecordingLauncher::default();

        let err = fx.command(&ctx, &[]).execute(&launcher).unwrap_err();

        assert!(matches!(err, HoistError::MissingConfigKey { .. }));
        let message = err.to_string();
        assert!(message.contains("artifact_version"));
        assert!(message.contains("hoist.ini"));
        assert!(launcher.request.borrow().is_none());
    }

    #[test]
    fn missing_runtime_is_reported() {
        let fx = Fixture::new();
        let ctx = fx.ctx(EnvSettings::default());
        let launcher = RecordingLauncher::default();

        let err = fx.command(&ctx, &[]).execute(&launcher).unwrap_err();

        assert!(matches!(err, HoistError::RuntimeNotFound { .. }));
        assert_eq!(err.exit_code(), 1);
    }
}
