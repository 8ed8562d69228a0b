//! Streaming HTTP download of installer binaries.

use crate::error::{InstallerError, Result};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const USER_AGENT: &str = concat!("runtime-installer/", env!("CARGO_PKG_VERSION"));

/// Size of each chunk read from the response body.
const CHUNK_SIZE: usize = 64 * 1024;

/// Bytes received so far and the total size when the server reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    pub received: u64,
    pub total: Option<u64>,
}

/// Downloads files over HTTP/HTTPS into a local folder.
///
/// Only connecting is bounded; the transfer itself runs as long as the
/// server keeps sending.
pub struct HttpDownloader {
    client: Client,
    connect_timeout: Duration,
}

impl HttpDownloader {
    /// Create a downloader with the default 30-second connect timeout.
    pub fn new() -> Result<Self> {
        Self::with_connect_timeout(Duration::from_secs(30))
    }

    /// Create a downloader with a custom connect timeout.
    pub fn with_connect_timeout(connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(connect_timeout)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| InstallerError::PlatformUnavailable {
                message: format!("Failed to build HTTP client: {}", root_cause(&e)),
            })?;
        Ok(Self {
            client,
            connect_timeout,
        })
    }

    /// Get the configured connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    /// Download `url` into `target_dir`, naming the file after the URL's
    /// last path segment. An existing file with that name is overwritten.
    ///
    /// # Errors
    ///
    /// Any network, HTTP status or disk failure is a `DownloadFailed`.
    pub fn download(
        &self,
        url: &str,
        target_dir: &Path,
        on_progress: &mut dyn FnMut(DownloadProgress),
    ) -> Result<PathBuf> {
        let file_name = file_name_from_url(url)?;
        let failed = |message: String| InstallerError::DownloadFailed {
            url: url.to_string(),
            message,
        };

        fs::create_dir_all(target_dir).map_err(|e| {
            failed(format!(
                "cannot create download folder {}: {}",
                target_dir.display(),
                e
            ))
        })?;
        let path = target_dir.join(&file_name);

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| failed(root_cause(&e)))?;

        if !response.status().is_success() {
            return Err(failed(format!("HTTP {} fetching {}", response.status(), url)));
        }

        let total = response.content_length();
        tracing::debug!(
            "Downloading {} ({} bytes) to {}",
            url,
            total.map_or_else(|| "unknown".to_string(), |t| t.to_string()),
            path.display()
        );

        let mut file = File::create(&path)
            .map_err(|e| failed(format!("cannot create {}: {}", path.display(), e)))?;

        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut received = 0u64;
        loop {
            let read = response
                .read(&mut buffer)
                .map_err(|e| failed(root_cause(&e)))?;
            if read == 0 {
                break;
            }
            file.write_all(&buffer[..read])
                .map_err(|e| failed(format!("cannot write {}: {}", path.display(), e)))?;
            received += read as u64;
            on_progress(DownloadProgress { received, total });
        }

        file.flush()
            .map_err(|e| failed(format!("cannot write {}: {}", path.display(), e)))?;

        if let Some(expected) = total {
            if received != expected {
                return Err(failed(format!(
                    "connection closed after {} of {} bytes",
                    received, expected
                )));
            }
        }

        tracing::info!("Downloaded {} bytes to {}", received, path.display());
        Ok(path)
    }
}

/// The last non-empty path segment of a URL, used as the local file name.
pub fn file_name_from_url(url: &str) -> Result<String> {
    let parsed = reqwest::Url::parse(url).map_err(|e| InstallerError::DownloadFailed {
        url: url.to_string(),
        message: format!("invalid URL: {}", e),
    })?;

    parsed
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .map(String::from)
        .ok_or_else(|| InstallerError::DownloadFailed {
            url: url.to_string(),
            message: "URL has no file name".to_string(),
        })
}

/// Innermost message of an error chain.
fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}

/// Format a byte count for progress messages.
pub fn format_bytes(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / MB)
    } else {
        format!("{} KB", bytes.div_ceil(1024))
    }
}
