//! Remote checksum manifests.
//!
//! A manifest lists one artifact per line as `<filename> <hex-digest>`.
//! Lines in `sha256sum` output order (`<hex-digest>  <filename>`, with an
//! optional `*` binary marker) are accepted too. Blank lines and `#`
//! comments are skipped.

use std::collections::HashMap;

/// Filename to hex digest mapping, held in memory only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecksumManifest {
    entries: HashMap<String, String>,
}

impl ChecksumManifest {
    /// Parse manifest text.
    pub fn parse(text: &str) -> Self {
        let mut entries = HashMap::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let (Some(first), Some(second)) = (parts.next(), parts.next()) else {
                tracing::debug!("Skipping malformed manifest line: {line:?}");
                continue;
            };

            let (filename, digest) = if is_hex(first) && !is_hex(second) {
                (second.trim_start_matches('*'), first)
            } else {
                (first, second)
            };
            entries.insert(filename.to_string(), digest.to_lowercase());
        }

        Self { entries }
    }

    /// Digest listed for `filename`.
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.entries.get(filename).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}
