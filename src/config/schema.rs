//! On-disk configuration schema.
//!
//! Every key is optional; anything left out keeps its built-in value.

use serde::Deserialize;
use std::path::PathBuf;

/// Root of `runtime-installer.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    /// Maximum time to wait for the installer, in seconds.
    pub install_timeout_secs: Option<u64>,

    /// Switch passed to the installer in silent mode.
    pub silent_switch: Option<String>,

    /// Folder the installer is downloaded into.
    pub download_dir: Option<PathBuf>,

    /// Root of the dotnet installation (the folder containing `shared/`).
    pub dotnet_root: Option<PathBuf>,

    /// Overrides for the desktop runtime.
    pub desktop: Option<FamilyOverride>,

    /// Overrides for the hosting bundle.
    pub web: Option<FamilyOverride>,
}

/// Per-family overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FamilyOverride {
    pub application_name: Option<String>,
    pub min_version: Option<String>,
    pub allow_prerelease: Option<bool>,
    pub download_url_x64: Option<String>,
    /// Empty string disables the integrity check.
    pub sha512_x64: Option<String>,
    pub download_url_arm64: Option<String>,
    pub sha512_arm64: Option<String>,
    pub manual_download_page: Option<String>,
}
