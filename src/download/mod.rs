//! Installer download and integrity verification.
//!
//! - [`http`] streams the installer into the downloads folder
//! - [`digest`] computes and compares SHA-512 digests

pub mod digest;
pub mod http;

pub use digest::{digests_match, sha512_file, verify_file, DigestCheck};
pub use http::{file_name_from_url, format_bytes, DownloadProgress, HttpDownloader};

use std::path::PathBuf;

/// A downloaded installer and what is known about its integrity.
///
/// The file stays on disk after the pipeline finishes, whatever the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    /// Where the installer came from.
    pub source_url: String,
    /// Where it was written.
    pub local_path: PathBuf,
    /// Configured SHA-512, if any.
    pub expected_digest: Option<String>,
    /// Computed SHA-512, once verification has run with a configured digest.
    pub actual_digest: Option<String>,
}

impl DownloadArtifact {
    /// Create an artifact for a finished download, before verification.
    pub fn new(
        source_url: impl Into<String>,
        local_path: impl Into<PathBuf>,
        expected_digest: Option<String>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            local_path: local_path.into(),
            expected_digest,
            actual_digest: None,
        }
    }

    /// File name of the local installer.
    pub fn file_name(&self) -> String {
        self.local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
