//! Configuration loading.
//!
//! hoist reads a single INI file, [`CONFIG_FILE`], from the working
//! directory and only consults its `[DEFAULT]` section.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use hoist::config::{ArtifactSettings, IniConfig};
//!
//! let config = IniConfig::parse(
//!     Path::new("hoist.ini"),
//!     "[DEFAULT]\nartifact_version = 1.2.3\nartifact_base_url = http://example/artifacts\n",
//! )
//! .unwrap();
//! let settings = ArtifactSettings::from_config(&config).unwrap();
//! assert_eq!(settings.artifact_url("a"), "http://example/artifacts/1.2.3/a");
//! ```

pub mod interpolation;
pub mod loader;
pub mod settings;

pub use interpolation::{interpolate, parse_interpolation, Segment};
pub use loader::{IniConfig, CONFIG_FILE};
pub use settings::{default_pattern, ArtifactSettings};
