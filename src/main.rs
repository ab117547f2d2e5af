//! hoist entry point.

use std::io::IsTerminal;
use std::process::ExitCode;

use hoist::cli::{Cli, RunCommand};
use hoist::context::{Context, EnvSettings};
use hoist::launch::Exec;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `HOIST_DEBUG` sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
///
/// Logs go to stderr; stdout belongs to the artifact.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("hoist=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hoist=info"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::from_env();
    let env = EnvSettings::from_env();
    init_tracing(env.debug);

    tracing::debug!("hoist starting with args: {:?}", cli.args);

    let result = Context::with_settings(env)
        .and_then(|ctx| RunCommand::new(cli, &ctx).execute(&Exec));

    match result {
        Ok(never) => match never {},
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
