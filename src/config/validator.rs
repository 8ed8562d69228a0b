//! Configuration validation rules.
//!
//! This module validates the merged configuration:
//! - Download URLs must be absolute http(s) URLs
//! - Configured digests must be 128 hex characters (SHA-512)
//! - The manual download page must be set
//! - The installer timeout must be positive

use crate::config::{FamilySettings, InstallerArtifact, InstallerConfig};
use crate::error::{InstallerError, Result};

/// Length of a hex-encoded SHA-512 digest.
pub const SHA512_HEX_LEN: usize = 128;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &InstallerConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.install_timeout.is_zero() {
        errors.push(ValidationError {
            rule: "zero-timeout".to_string(),
            message: "install_timeout_secs must be greater than zero".to_string(),
        });
    }

    errors.extend(validate_family(&config.desktop));
    errors.extend(validate_family(&config.web));

    errors
}

fn validate_family(settings: &FamilySettings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_artifact(settings, "x64", &settings.x64));
    if let Some(arm64) = &settings.arm64 {
        errors.extend(validate_artifact(settings, "arm64", arm64));
    }

    if settings.manual_download_page.trim().is_empty() {
        errors.push(ValidationError {
            rule: "missing-manual-page".to_string(),
            message: format!("{}.manual_download_page must not be empty", settings.family),
        });
    }

    errors
}

fn validate_artifact(
    settings: &FamilySettings,
    arch: &str,
    artifact: &InstallerArtifact,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let url_ok = reqwest::Url::parse(&artifact.url)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !url_ok {
        errors.push(ValidationError {
            rule: "invalid-url".to_string(),
            message: format!(
                "{}.download_url_{} '{}' is not an http(s) URL",
                settings.family, arch, artifact.url
            ),
        });
    }

    if let Some(digest) = &artifact.sha512 {
        if !is_sha512_hex(digest) {
            errors.push(ValidationError {
                rule: "invalid-digest".to_string(),
                message: format!(
                    "{}.sha512_{} must be {} hex characters",
                    settings.family, arch, SHA512_HEX_LEN
                ),
            });
        }
    }

    errors
}

/// Check that a string looks like a hex SHA-512 digest (either case).
pub fn is_sha512_hex(digest: &str) -> bool {
    digest.len() == SHA512_HEX_LEN && digest.chars().all(|c| c.is_ascii_hexdigit())
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` if any validation rules fail.
pub fn validate(config: &InstallerConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(InstallerError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
