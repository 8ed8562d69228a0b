//! Error types for runtime installer operations.
//!
//! This module defines [`InstallerError`], the error type used by every
//! pipeline stage, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Stage errors (download, integrity, install) are caught by the pipeline
//!   orchestrator and turned into terminal states; they never reach `main`
//! - Configuration errors are returned to `main`, which reports them and exits
//! - Use `anyhow::Error` (via `InstallerError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for runtime installer operations.
#[derive(Debug, Error)]
pub enum InstallerError {
    /// The runtime install root is missing or unreadable.
    #[error("Install directory unavailable: {path}: {message}")]
    DirectoryUnavailable { path: PathBuf, message: String },

    /// Network, transport or disk failure while fetching the installer.
    #[error("Download failed: {message}")]
    DownloadFailed { url: String, message: String },

    /// The downloaded file does not match the configured digest.
    #[error("File integrity check failed.\nexpected: {expected}\n  actual: {actual}")]
    IntegrityMismatch { expected: String, actual: String },

    /// The installer process could not be started or elevation was refused.
    #[error("Runtime installation failed: {message}")]
    InstallLaunchFailed { installer: PathBuf, message: String },

    /// The installer did not finish within the allowed time.
    #[error("Runtime installation did not finish within {timeout_secs}s: {installer}")]
    InstallTimedOut { installer: PathBuf, timeout_secs: u64 },

    /// The installer ran but reported failure.
    #[error("Runtime installer exited with code {code}: {installer}")]
    InstallerExited { installer: PathBuf, code: i32 },

    /// A platform lookup (downloads folder, architecture) could not be resolved.
    #[error("Platform lookup failed: {message}")]
    PlatformUnavailable { message: String },

    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for runtime installer operations.
pub type Result<T> = std::result::Result<T, InstallerError>;
