//! Configuration for the runtime installer.
//!
//! This module handles:
//! - Runtime families, architectures and requirements in [`requirement`]
//! - The on-disk YAML schema in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use runtime_installer::config::{Architecture, InstallerConfig, RuntimeFamily};
//!
//! let config = InstallerConfig::default();
//! let requirement = config.family(RuntimeFamily::Desktop).requirement(Architecture::X64);
//! assert_eq!(requirement.min_version.to_string(), "10.0.0");
//! assert!(requirement.download_url.ends_with("win-x64.exe"));
//! ```
//!
//! # Configuration File Locations
//!
//! 1. `--config <path>` when given
//! 2. `runtime-installer.yml` next to the executable
//!
//! Without either, the built-in settings are used as-is.

pub mod loader;
pub mod requirement;
pub mod schema;
pub mod validator;

pub use loader::{
    apply_file, discover_config_path, load_config, load_config_file, parse_config,
    CONFIG_FILE_NAME,
};
pub use requirement::{
    Architecture, FamilySettings, InstallerArtifact, RuntimeFamily, RuntimeRequirement,
};
pub use schema::{ConfigFile, FamilyOverride};
pub use validator::{validate, validate_config, ValidationError};

use std::path::PathBuf;
use std::time::Duration;

/// Default bound on how long to wait for the installer.
pub const DEFAULT_INSTALL_TIMEOUT: Duration = Duration::from_secs(180);

/// Default switch that makes the runtime installers unattended.
pub const DEFAULT_SILENT_SWITCH: &str = "/quiet";

/// Effective configuration, constructed once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerConfig {
    /// Desktop runtime settings.
    pub desktop: FamilySettings,
    /// Hosting bundle settings.
    pub web: FamilySettings,
    /// How long to wait for the installer before giving up.
    pub install_timeout: Duration,
    /// Switch appended to the installer command line in silent mode.
    pub silent_switch: String,
    /// Download folder override. `None` uses the platform downloads folder.
    pub download_dir: Option<PathBuf>,
    /// Dotnet root override. `None` uses the platform's machine-wide root.
    pub dotnet_root: Option<PathBuf>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            desktop: FamilySettings::desktop_defaults(),
            web: FamilySettings::web_defaults(),
            install_timeout: DEFAULT_INSTALL_TIMEOUT,
            silent_switch: DEFAULT_SILENT_SWITCH.to_string(),
            download_dir: None,
            dotnet_root: None,
        }
    }
}

impl InstallerConfig {
    /// Settings for one runtime family.
    pub fn family(&self, family: RuntimeFamily) -> &FamilySettings {
        match family {
            RuntimeFamily::Desktop => &self.desktop,
            RuntimeFamily::Web => &self.web,
        }
    }
}
