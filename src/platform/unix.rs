//! Linux and macOS platform support.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::Context;

use super::{
    default_downloads_dir, exit_code, wait_with_deadline, LaunchOutcome, Platform,
};
use crate::config::Architecture;
use crate::error::{InstallerError, Result};

/// Unix implementation of [`Platform`].
#[derive(Debug, Default)]
pub struct UnixPlatform;

impl UnixPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for UnixPlatform {
    fn architecture(&self) -> Architecture {
        Architecture::from_name(std::env::consts::ARCH).unwrap_or_default()
    }

    fn dotnet_root(&self) -> PathBuf {
        PathBuf::from(default_dotnet_root())
    }

    fn downloads_dir(&self) -> Result<PathBuf> {
        default_downloads_dir()
    }

    fn open_url(&self, url: &str) -> Result<()> {
        let opener = opener();
        Command::new(opener)
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to run {} {}", opener, url))?;
        Ok(())
    }

    fn reveal_file(&self, path: &Path) -> Result<()> {
        let mut cmd = Command::new(opener());
        if cfg!(target_os = "macos") {
            cmd.arg("-R").arg(path);
        } else {
            cmd.arg(path.parent().unwrap_or(path));
        }
        cmd.stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to show {}", path.display()))?;
        Ok(())
    }

    fn launch_elevated(
        &self,
        program: &Path,
        args: &[String],
        timeout: Duration,
    ) -> Result<LaunchOutcome> {
        let installer = program.to_path_buf();
        let launch_failed = |message: String| InstallerError::InstallLaunchFailed {
            installer: installer.clone(),
            message,
        };

        let mut cmd = if is_elevated() {
            Command::new(program)
        } else {
            let mut sudo = Command::new("sudo");
            sudo.arg(program);
            sudo
        };
        cmd.args(args);
        tracing::debug!("Launching {:?}", cmd);

        let mut child = cmd.spawn().map_err(|e| launch_failed(e.to_string()))?;
        match wait_with_deadline(&mut child, timeout).map_err(|e| launch_failed(e.to_string()))? {
            Some(status) => Ok(LaunchOutcome::Exited(exit_code(status))),
            None => {
                tracing::warn!("Installer still running after {:?}", timeout);
                Ok(LaunchOutcome::TimedOut)
            }
        }
    }
}

fn default_dotnet_root() -> &'static str {
    if cfg!(target_os = "macos") {
        "/usr/local/share/dotnet"
    } else {
        "/usr/share/dotnet"
    }
}

fn opener() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Check if running as root.
pub fn is_elevated() -> bool {
    // SAFETY: geteuid() is a simple syscall that returns the effective user ID
    unsafe { libc::geteuid() == 0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn architecture_matches_build_target() {
        let arch = UnixPlatform::new().architecture();
        if cfg!(target_arch = "aarch64") {
            assert_eq!(arch, Architecture::Arm64);
        } else {
            assert_eq!(arch, Architecture::X64);
        }
    }

    #[test]
    fn default_root_is_shared_dotnet() {
        assert!(default_dotnet_root().ends_with("share/dotnet"));
        assert_eq!(
            UnixPlatform::new().dotnet_root(),
            PathBuf::from(default_dotnet_root())
        );
    }
}
