//! The check → confirm → download → verify → install pipeline.
//!
//! This module provides:
//! - [`PipelineState`], the linear state machine
//! - [`Pipeline`], which drives it to a terminal state
//! - [`Mode`], the single silent/interactive switch read at each decision point

pub mod confirm;
pub mod orchestrator;
pub mod state;

pub use confirm::{ask_initial_choice, ask_install_now, InitialChoice};
pub use orchestrator::{Pipeline, PipelineRun};
pub use state::PipelineState;

use std::path::PathBuf;
use std::time::Duration;

use crate::config::{
    InstallerConfig, RuntimeFamily, DEFAULT_INSTALL_TIMEOUT, DEFAULT_SILENT_SWITCH,
};
use crate::platform::Platform;

/// Whether the operator is asked anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Prompt at each decision point.
    #[default]
    Interactive,
    /// Never prompt; take the affirmative choice and pass the silent switch.
    Silent,
}

impl Mode {
    pub fn from_silent(silent: bool) -> Self {
        if silent {
            Mode::Silent
        } else {
            Mode::Interactive
        }
    }

    pub fn is_silent(&self) -> bool {
        matches!(self, Mode::Silent)
    }
}

/// Run-wide settings, fixed before the pipeline starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub mode: Mode,
    /// Folder whose subfolders are the installed versions.
    pub install_root: PathBuf,
    /// Where to save the installer; `None` uses the platform downloads folder.
    pub download_dir: Option<PathBuf>,
    pub install_timeout: Duration,
    pub silent_switch: String,
}

impl PipelineSettings {
    /// Settings with the built-in timeout and silent switch.
    pub fn new(mode: Mode, install_root: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            install_root: install_root.into(),
            download_dir: None,
            install_timeout: DEFAULT_INSTALL_TIMEOUT,
            silent_switch: DEFAULT_SILENT_SWITCH.to_string(),
        }
    }

    /// Settings taken from the loaded configuration.
    pub fn from_config(config: &InstallerConfig, mode: Mode, install_root: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            install_root: install_root.into(),
            download_dir: config.download_dir.clone(),
            install_timeout: config.install_timeout,
            silent_switch: config.silent_switch.clone(),
        }
    }

    /// Settings for `family`, with its install root under the configured
    /// dotnet root or, failing that, the platform's.
    pub fn for_family(
        config: &InstallerConfig,
        mode: Mode,
        family: RuntimeFamily,
        platform: &dyn Platform,
    ) -> Self {
        let dotnet_root = config
            .dotnet_root
            .clone()
            .unwrap_or_else(|| platform.dotnet_root());
        Self::from_config(config, mode, family.install_root(&dotnet_root))
    }

    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    pub fn with_install_timeout(mut self, timeout: Duration) -> Self {
        self.install_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockPlatform;

    #[test]
    fn mode_from_flag() {
        assert_eq!(Mode::from_silent(true), Mode::Silent);
        assert_eq!(Mode::from_silent(false), Mode::Interactive);
        assert!(Mode::Silent.is_silent());
    }

    #[test]
    fn settings_follow_config() {
        let mut config = InstallerConfig::default();
        config.install_timeout = Duration::from_secs(42);
        config.download_dir = Some(PathBuf::from("/tmp/dl"));

        let settings = PipelineSettings::from_config(&config, Mode::Silent, "/dotnet/shared/x");
        assert_eq!(settings.install_timeout, Duration::from_secs(42));
        assert_eq!(settings.download_dir, Some(PathBuf::from("/tmp/dl")));
        assert_eq!(settings.silent_switch, "/quiet");
    }

    #[test]
    fn configured_dotnet_root_beats_platform() {
        let platform = MockPlatform::new("/platform/dotnet", "/dl");
        let mut config = InstallerConfig::default();

        let settings =
            PipelineSettings::for_family(&config, Mode::Silent, RuntimeFamily::Web, &platform);
        assert_eq!(
            settings.install_root,
            PathBuf::from("/platform/dotnet/shared/Microsoft.AspNetCore.App")
        );

        config.dotnet_root = Some(PathBuf::from("/opt/dotnet"));
        let settings =
            PipelineSettings::for_family(&config, Mode::Silent, RuntimeFamily::Desktop, &platform);
        assert_eq!(
            settings.install_root,
            PathBuf::from("/opt/dotnet/shared/Microsoft.WindowsDesktop.App")
        );
    }
}
