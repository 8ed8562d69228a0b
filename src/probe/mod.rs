//! Installed runtime detection.
//!
//! The probe lists the version folders under a runtime family's install
//! root and reports whether any of them satisfies the requirement. It is
//! best-effort: a missing or unreadable root means "not installed", never
//! an error for the caller.
//!
//! # Example
//!
//! ```
//! use runtime_installer::config::{Architecture, FamilySettings};
//! use runtime_installer::probe::is_satisfied;
//! use tempfile::TempDir;
//!
//! let root = TempDir::new().unwrap();
//! std::fs::create_dir(root.path().join("10.0.2")).unwrap();
//!
//! let requirement = FamilySettings::desktop_defaults().requirement(Architecture::X64);
//! assert!(is_satisfied(root.path(), &requirement));
//! ```

pub mod scan;
pub mod version;

pub use scan::InstalledVersionSet;
pub use version::{parse_installed_version, satisfies, version_from_file_name};

use crate::config::RuntimeRequirement;
use semver::Version;
use std::path::Path;

/// Find the highest installed version under `install_root` that satisfies
/// the requirement.
pub fn find_satisfying(install_root: &Path, requirement: &RuntimeRequirement) -> Option<Version> {
    match InstalledVersionSet::scan(install_root) {
        Ok(installed) => {
            tracing::debug!(
                "Found {} folder(s) under {}",
                installed.names().len(),
                install_root.display()
            );
            installed.best_match(requirement)
        }
        Err(e) => {
            tracing::debug!("{}; treating runtime as not installed", e);
            None
        }
    }
}

/// Check whether the requirement is satisfied by an installed version.
pub fn is_satisfied(install_root: &Path, requirement: &RuntimeRequirement) -> bool {
    find_satisfying(install_root, requirement).is_some()
}
