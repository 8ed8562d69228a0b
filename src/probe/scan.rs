//! Snapshot of the version folders under an install root.

use crate::config::RuntimeRequirement;
use crate::error::{InstallerError, Result};
use semver::Version;
use std::fs;
use std::path::{Path, PathBuf};

use super::version::{parse_installed_version, satisfies};

/// Names of the subdirectories found under an install root at scan time.
///
/// Read-only and recomputed on every run; nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledVersionSet {
    root: PathBuf,
    names: Vec<String>,
}

impl InstalledVersionSet {
    /// List the immediate subdirectories of `root`.
    ///
    /// Entries that cannot be read or are not directories are skipped.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryUnavailable` if `root` is missing or unreadable.
    pub fn scan(root: &Path) -> Result<Self> {
        let entries = fs::read_dir(root).map_err(|e| InstallerError::DirectoryUnavailable {
            path: root.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry in {}: {}", root.display(), e);
                    continue;
                }
            };
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();

        Ok(Self {
            root: root.to_path_buf(),
            names,
        })
    }

    /// Build a set from known names (no filesystem access).
    pub fn from_names<I, S>(root: impl Into<PathBuf>, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort();
        Self {
            root: root.into(),
            names,
        }
    }

    /// The scanned install root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// All subdirectory names, sorted.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Check if no subdirectories were found.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Parsed versions, highest first. Unparsable names are dropped.
    pub fn versions(&self, allow_prerelease: bool) -> Vec<Version> {
        let mut versions: Vec<Version> = self
            .names
            .iter()
            .filter_map(|name| {
                let parsed = parse_installed_version(name, allow_prerelease);
                if parsed.is_none() {
                    tracing::debug!("Ignoring non-version folder '{}'", name);
                }
                parsed
            })
            .collect();
        versions.sort_by(|a, b| b.cmp(a));
        versions
    }

    /// The highest installed version that satisfies the requirement.
    pub fn best_match(&self, requirement: &RuntimeRequirement) -> Option<Version> {
        self.versions(requirement.allow_prerelease)
            .into_iter()
            .find(|v| satisfies(v, requirement))
    }

    /// Check if any installed version satisfies the requirement.
    pub fn satisfies(&self, requirement: &RuntimeRequirement) -> bool {
        self.names.iter().any(|name| {
            parse_installed_version(name, requirement.allow_prerelease)
                .is_some_and(|v| satisfies(&v, requirement))
        })
    }
}
