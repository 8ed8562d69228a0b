//! Version parsing for installed runtime folders.
//!
//! Installed runtimes live in folders named by their version, e.g.
//! `10.0.2` or `10.0.0-rc.2.25502.107`. A folder counts toward a requirement
//! when it parses, shares the requirement's major version, and its numeric
//! `major.minor.patch` is at least the minimum.

use crate::config::RuntimeRequirement;
use semver::Version;

/// Parse a folder name as an installed version.
///
/// Returns `None` for names that are not `major.minor.patch`. Pre-release
/// folders are rejected unless `allow_prerelease` is set, in which case the
/// suffix after the first `-` is dropped and only the numeric part is kept.
pub fn parse_installed_version(name: &str, allow_prerelease: bool) -> Option<Version> {
    let name = name.trim();
    let (base, prerelease) = match name.split_once('-') {
        Some((base, suffix)) => (base, Some(suffix)),
        None => (name, None),
    };

    if prerelease.is_some() && !allow_prerelease {
        return None;
    }

    let version = Version::parse(base).ok()?;
    Some(Version::new(version.major, version.minor, version.patch))
}

/// Check whether a parsed version satisfies a requirement.
pub fn satisfies(version: &Version, requirement: &RuntimeRequirement) -> bool {
    let min = &requirement.min_version;
    version.major == min.major
        && (version.major, version.minor, version.patch) >= (min.major, min.minor, min.patch)
}

/// Extract the first `N.N.N` version from an installer file name.
///
/// `windowsdesktop-runtime-10.0.1-win-x64.exe` yields `10.0.1`.
pub fn version_from_file_name(file_name: &str) -> Option<String> {
    let pattern = regex::Regex::new(r"(\d+\.\d+\.\d+)").ok()?;
    pattern
        .captures(file_name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
