//! Command-line interface for hoist.
//!
//! - [`args`] - Argument capture
//! - [`run`] - The launch pipeline behind the binary

pub mod args;
pub mod run;

pub use args::Cli;
pub use run::RunCommand;
