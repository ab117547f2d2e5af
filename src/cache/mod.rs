//! Artifact cache layout.
//!
//! Fetched artifacts live at `<cache-root>/bin/<kind>/<identity>`. A file at
//! that path is always complete and verified: the fetcher only ever renames
//! finished downloads into place.

pub mod identity;
pub mod locator;

pub use identity::ArtifactIdentity;
pub use locator::{local_override, locate, CacheLocator, LOCAL_OVERRIDE_FILE};
