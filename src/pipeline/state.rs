//! Pipeline states.
//!
//! ```text
//! Unchecked ─┬─> Satisfied
//!            └─> NeedsInstall ─┬─> Declined
//!                              ├─> ManualPageOpened
//!                              └─> Downloading ─┬─> DownloadFailed
//!                                               └─> Downloaded ─┬─> IntegrityFailed
//!                                                               └─> Verified ─┬─> RevealedOnly
//!                                                                             └─> Installing ─┬─> InstallFailed
//!                                                                                             └─> Installed
//! ```

use std::path::PathBuf;

use crate::download::DownloadArtifact;

/// Where the pipeline is. Every transition moves strictly forward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing has been probed yet.
    Unchecked,
    /// A satisfying version is installed.
    Satisfied,
    /// No satisfying version was found.
    NeedsInstall,
    /// The operator chose not to install.
    Declined,
    /// The manual download page was opened instead.
    ManualPageOpened,
    /// The installer is being fetched.
    Downloading,
    /// The fetch failed.
    DownloadFailed { reason: String },
    /// The installer is on disk, not yet verified.
    Downloaded(DownloadArtifact),
    /// The digest did not match.
    IntegrityFailed { expected: String, actual: String },
    /// The installer passed verification (or had nothing to verify against).
    Verified(DownloadArtifact),
    /// The operator chose to install later; the file was shown instead.
    RevealedOnly(PathBuf),
    /// The installer is about to run.
    Installing(DownloadArtifact),
    /// The installer could not run or reported failure.
    InstallFailed { reason: String },
    /// The installer reported success.
    Installed,
}

impl PipelineState {
    /// Stable name for logs and tests.
    pub fn name(&self) -> &'static str {
        match self {
            PipelineState::Unchecked => "unchecked",
            PipelineState::Satisfied => "satisfied",
            PipelineState::NeedsInstall => "needs_install",
            PipelineState::Declined => "declined",
            PipelineState::ManualPageOpened => "manual_page_opened",
            PipelineState::Downloading => "downloading",
            PipelineState::DownloadFailed { .. } => "download_failed",
            PipelineState::Downloaded(_) => "downloaded",
            PipelineState::IntegrityFailed { .. } => "integrity_failed",
            PipelineState::Verified(_) => "verified",
            PipelineState::RevealedOnly(_) => "revealed_only",
            PipelineState::Installing(_) => "installing",
            PipelineState::InstallFailed { .. } => "install_failed",
            PipelineState::Installed => "installed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.is_success() || self.is_failure()
    }

    /// Terminal states that end the run successfully.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            PipelineState::Satisfied
                | PipelineState::ManualPageOpened
                | PipelineState::RevealedOnly(_)
                | PipelineState::Installed
        )
    }

    /// Terminal states that end the run with a failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            PipelineState::Declined
                | PipelineState::DownloadFailed { .. }
                | PipelineState::IntegrityFailed { .. }
                | PipelineState::InstallFailed { .. }
        )
    }

    /// Process exit status for a terminal state.
    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }
}
