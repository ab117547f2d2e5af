//! Checksum computation and comparison for downloaded artifacts.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{HoistError, Result};

/// Computes the SHA-256 of a file as a lowercase hex string.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Compare a computed digest against the manifest's.
///
/// # Errors
///
/// Returns `ChecksumMismatch` when the digests differ (case-insensitive).
pub fn verify_digest(filename: &str, expected: &str, actual: &str) -> Result<()> {
    if expected.eq_ignore_ascii_case(actual) {
        return Ok(());
    }
    Err(HoistError::ChecksumMismatch {
        filename: filename.to_string(),
        expected: expected.to_lowercase(),
        actual: actual.to_lowercase(),
    })
}
