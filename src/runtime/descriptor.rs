//! Runtime version descriptors.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)").unwrap());

/// `{major, minor}` version of a runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuntimeDescriptor {
    pub major: u32,
    pub minor: u32,
}

impl RuntimeDescriptor {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Extract the first `major.minor` from `--version` output.
    ///
    /// # Example
    ///
    /// ```
    /// use hoist::runtime::RuntimeDescriptor;
    ///
    /// let found = RuntimeDescriptor::from_version_output("Python 3.8.10");
    /// assert_eq!(found, Some(RuntimeDescriptor::new(3, 8)));
    /// ```
    pub fn from_version_output(output: &str) -> Option<Self> {
        let caps = VERSION_RE.captures(output)?;
        Some(Self {
            major: caps[1].parse().ok()?,
            minor: caps[2].parse().ok()?,
        })
    }
}

impl fmt::Display for RuntimeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Error returned when a string is not of the form `<int>.<int>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected <major>.<minor>")]
pub struct ParseDescriptorError;

impl FromStr for RuntimeDescriptor {
    type Err = ParseDescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s.trim().split_once('.').ok_or(ParseDescriptorError)?;
        let parse = |part: &str| {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseDescriptorError);
            }
            part.parse::<u32>().map_err(|_| ParseDescriptorError)
        };
        Ok(Self {
            major: parse(major)?,
            minor: parse(minor)?,
        })
    }
}

/// A runtime executable together with the version it reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runtime {
    pub path: PathBuf,
    pub descriptor: RuntimeDescriptor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_major_minor() {
        assert_eq!("3.8".parse(), Ok(RuntimeDescriptor::new(3, 8)));
        assert_eq!(" 2.7 ".parse(), Ok(RuntimeDescriptor::new(2, 7)));
        assert_eq!("3.10".parse(), Ok(RuntimeDescriptor::new(3, 10)));
    }

    #[test]
    fn rejects_malformed_versions() {
        for bad in ["3", "3.", ".8", "3.8.1", "three.eight", "3.x", "-3.8", "+3.8", ""] {
            assert!(
                bad.parse::<RuntimeDescriptor>().is_err(),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn parse_error_is_a_std_error() {
        let err = "3.x".parse::<RuntimeDescriptor>().unwrap_err();
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert_eq!(boxed.to_string(), "expected <major>.<minor>");
    }

    #[test]
    fn displays_as_major_dot_minor() {
        assert_eq!(RuntimeDescriptor::new(3, 9).to_string(), "3.9");
    }

    #[test]
    fn version_output_extraction() {
        assert_eq!(
            RuntimeDescriptor::from_version_output("Python 3.9.1\n"),
            Some(RuntimeDescriptor::new(3, 9))
        );
        assert_eq!(
            RuntimeDescriptor::from_version_output("Python 2.7.18"),
            Some(RuntimeDescriptor::new(2, 7))
        );
        assert_eq!(RuntimeDescriptor::from_version_output("no version here"), None);
    }

    #[test]
    fn ordering_is_by_major_then_minor() {
        assert!(RuntimeDescriptor::new(2, 9) < RuntimeDescriptor::new(3, 0));
        assert!(RuntimeDescriptor::new(3, 6) < RuntimeDescriptor::new(3, 10));
    }
}
