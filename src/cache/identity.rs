//! Artifact identity: the filename shared by the remote URL and cache entry.

use std::fmt;

use crate::error::{HoistError, Result};
use crate::runtime::RuntimeDescriptor;

/// Filename of one artifact build for one runtime version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactIdentity(String);

impl ArtifactIdentity {
    /// Apply `pattern` to `(version, runtime.major, runtime.minor)`.
    ///
    /// The pattern must contain exactly three `%s` slots; `%%` is a literal
    /// percent sign.
    ///
    /// # Example
    ///
    /// ```
    /// use hoist::cache::ArtifactIdentity;
    /// use hoist::runtime::RuntimeDescriptor;
    ///
    /// let id = ArtifactIdentity::from_pattern(
    ///     "tool-%s-py%s%s",
    ///     "1.2.3",
    ///     RuntimeDescriptor::new(3, 8),
    /// )
    /// .unwrap();
    /// assert_eq!(id.as_str(), "tool-1.2.3-py38");
    /// ```
    pub fn from_pattern(pattern: &str, version: &str, runtime: RuntimeDescriptor) -> Result<Self> {
        let major = runtime.major.to_string();
        let minor = runtime.minor.to_string();
        let values = [version, major.as_str(), minor.as_str()];

        let mut out = String::with_capacity(pattern.len() + version.len());
        let mut used = 0;
        let mut chars = pattern.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('%') => out.push('%'),
                Some('s') => {
                    let value = values
                        .get(used)
                        .ok_or_else(|| bad_pattern(pattern, "more than three %s slots"))?;
                    out.push_str(value);
                    used += 1;
                }
                _ => return Err(bad_pattern(pattern, "'%' must be followed by 's' or '%'")),
            }
        }

        if used != values.len() {
            return Err(bad_pattern(
                pattern,
                "expected three %s slots (version, runtime major, runtime minor)",
            ));
        }
        if out.is_empty() || out.contains(['/', '\\']) || out == "." || out == ".." {
            return Err(HoistError::InvalidConfig {
                message: format!("artifact filename {out:?} is not a plain file name"),
            });
        }

        Ok(Self(out))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn bad_pattern(pattern: &str, reason: &str) -> HoistError {
    HoistError::InvalidConfig {
        message: format!("artifact_filename_pattern {pattern:?}: {reason}"),
    }
}
