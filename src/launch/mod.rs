//! Artifact resolution and process replacement.

pub mod exec;
pub mod resolver;

pub use exec::{Exec, Launch, LaunchRequest};
pub use resolver::Launcher;
