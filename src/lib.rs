//! hoist - a bootstrap launcher for pinned artifacts.
//!
//! hoist reads the artifact version a project pins in `hoist.ini`, makes
//! sure a matching build for the active runtime is cached locally (fetching
//! and verifying it if not), and then replaces itself with that artifact.
//!
//! # Modules
//!
//! - [`cache`] - Cache layout and artifact identity
//! - [`cli`] - Argument capture and the launch pipeline
//! - [`config`] - `hoist.ini` loading and interpolation
//! - [`context`] - Process environment captured at startup
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Streaming download, verification and atomic publish
//! - [`launch`] - Artifact resolution and process replacement
//! - [`runtime`] - Runtime discovery and relaunch decisions
//!
//! # Example
//!
//! ```
//! use hoist::cache::ArtifactIdentity;
//! use hoist::runtime::RuntimeDescriptor;
//!
//! let identity =
//!     ArtifactIdentity::from_pattern("tool-%s-py%s%s", "1.2.3", RuntimeDescriptor::new(3, 8))
//!         .unwrap();
//! assert_eq!(identity.as_str(), "tool-1.2.3-py38");
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod fetch;
pub mod launch;
pub mod runtime;

pub use error::{HoistError, Result};
