//! Runtime negotiation.
//!
//! Finds the runtime the artifact will run under and decides whether hoist
//! can continue with it or must relaunch itself under a different one.

pub mod descriptor;
pub mod probe;
pub mod selector;

pub use descriptor::{ParseDescriptorError, Runtime, RuntimeDescriptor};
pub use probe::{discover, probe_version};
pub use selector::{decide, which_lookup, RuntimeDecision, RuntimePolicy};
