//! Streaming artifact download with crash-safe publish.
//!
//! A download goes to a temporary file created next to the destination, so
//! the final rename never crosses filesystems. The temporary file is owned
//! by a [`NamedTempFile`] guard and is unlinked on every failure path; only
//! a complete (and, when enabled, verified) download is renamed into place.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Context as _;
use reqwest::blocking::Client;
use tempfile::NamedTempFile;

use super::checksum::{sha256_file, verify_digest};
use super::manifest::ChecksumManifest;
use super::progress::DownloadProgress;
use super::Fetch;
use crate::error::{HoistError, Result};

/// Size of each read from the response body.
const CHUNK_SIZE: usize = 8192;

/// Downloads artifacts over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    manifest_url: Option<String>,
    show_progress: bool,
}

impl HttpFetcher {
    /// Create a fetcher; `timeout` of `None` never gives up on a request.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("hoist/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            manifest_url: None,
            show_progress: true,
        })
    }

    /// Verify every download against the manifest at `manifest_url`.
    ///
    /// The manifest entry is looked up by the destination's file name.
    pub fn verify_against(mut self, manifest_url: impl Into<String>) -> Self {
        self.manifest_url = Some(manifest_url.into());
        self
    }

    /// Suppress the progress display.
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Stream `url` into `file`, returning the number of bytes received.
    fn download(&self, url: &str, label: &str, file: &mut NamedTempFile) -> Result<u64> {
        let mut response = self.client.get(url).send().map_err(|e| HoistError::Download {
            url: url.to_string(),
            message: describe(&e),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HoistError::Download {
                url: url.to_string(),
                message: format!("HTTP {status}"),
            });
        }

        let expected = response.content_length();
        let progress = if self.show_progress {
            DownloadProgress::new(label, expected)
        } else {
            DownloadProgress::hidden()
        };

        let received = match copy_body(url, &mut response, file, expected, &progress) {
            Ok(received) => received,
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        };

        progress.finish();
        tracing::debug!("Received {received} bytes from {url}");
        Ok(received)
    }

    fn fetch_manifest(&self, url: &str) -> Result<ChecksumManifest> {
        let unavailable = |message: String| HoistError::ManifestUnavailable {
            url: url.to_string(),
            message,
        };

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| unavailable(describe(&e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(unavailable(format!("HTTP {status}")));
        }
        let text = response.text().map_err(|e| unavailable(describe(&e)))?;
        let manifest = ChecksumManifest::parse(&text);
        if manifest.is_empty() {
            tracing::warn!("Checksum manifest {url} lists no files");
        } else {
            tracing::debug!("Checksum manifest {url} lists {} file(s)", manifest.len());
        }
        Ok(manifest)
    }

    fn verify(&self, manifest_url: &str, filename: &str, file: &Path) -> Result<()> {
        let manifest = self.fetch_manifest(manifest_url)?;
        let expected = manifest
            .get(filename)
            .ok_or_else(|| HoistError::ManifestEntryMissing {
                url: manifest_url.to_string(),
                filename: filename.to_string(),
            })?;
        let actual = sha256_file(file)?;
        verify_digest(filename, expected, &actual)?;
        tracing::debug!("Checksum verified for {filename}: {actual}");
        Ok(())
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path, mode: Option<u32>) -> Result<bool> {
        if dest.exists() {
            tracing::debug!("{} already present; not fetching", dest.display());
            return Ok(false);
        }

        let parent = match dest.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        ensure_dir(parent)?;

        let filename = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Dropping the guard on any early return unlinks the partial file.
        let mut temp = NamedTempFile::new_in(parent)?;

        tracing::info!("Downloading {url}");
        self.download(url, &filename, &mut temp)?;

        if let Some(manifest_url) = &self.manifest_url {
            self.verify(manifest_url, &filename, temp.path())?;
        }

        temp.persist(dest).map_err(|e| HoistError::Io(e.error))?;
        if let Some(mode) = mode {
            set_mode(dest, mode)?;
        }

        tracing::info!("Installed {}", dest.display());
        Ok(true)
    }
}

/// Copy a response body into `writer`, checking it against `expected`.
fn copy_body<R: Read, W: Write>(
    url: &str,
    reader: &mut R,
    writer: &mut W,
    expected: Option<u64>,
    progress: &DownloadProgress,
) -> Result<u64> {
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut received: u64 = 0;
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            // A body cut short of its Content-Length surfaces as a read error.
            Err(e) => match expected {
                Some(expected) if received < expected => {
                    tracing::debug!("Body of {url} ended early: {}", describe(&e));
                    return Err(HoistError::LengthMismatch {
                        url: url.to_string(),
                        expected,
                        received,
                    });
                }
                _ => {
                    return Err(HoistError::Download {
                        url: url.to_string(),
                        message: describe(&e),
                    })
                }
            },
        };
        writer.write_all(&buffer[..n])?;
        received += n as u64;
        progress.advance(n as u64);
    }
    writer.flush()?;
    check_length(url, expected, received)?;
    Ok(received)
}

/// Compare the received byte count with the advertised one.
fn check_length(url: &str, expected: Option<u64>, received: u64) -> Result<()> {
    match expected {
        Some(expected) if expected != received => Err(HoistError::LengthMismatch {
            url: url.to_string(),
            expected,
            received,
        }),
        Some(_) => Ok(()),
        None => {
            tracing::warn!("{url} did not advertise a Content-Length; skipping length check");
            Ok(())
        }
    }
}

/// Create `dir` and its parents; an existing entry is not an error.
fn ensure_dir(dir: &Path) -> Result<()> {
    match fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(HoistError::CreateDir {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

/// Render an error and its sources on one line.
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
