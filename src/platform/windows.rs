//! Windows platform support.
//!
//! Elevation goes through PowerShell's `Start-Process -Verb RunAs`, which
//! raises the UAC prompt and reports the installer's exit code back.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use anyhow::Context;

use super::{
    default_downloads_dir, env_var, exit_code, wait_with_deadline, LaunchOutcome, Platform,
};
use crate::config::Architecture;
use crate::error::{InstallerError, Result};

/// Windows implementation of [`Platform`].
#[derive(Debug, Default)]
pub struct WindowsPlatform;

impl WindowsPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for WindowsPlatform {
    fn architecture(&self) -> Architecture {
        architecture_from_env(env_var)
    }

    fn dotnet_root(&self) -> PathBuf {
        dotnet_root_from_env(env_var)
    }

    fn downloads_dir(&self) -> Result<PathBuf> {
        default_downloads_dir()
    }

    fn open_url(&self, url: &str) -> Result<()> {
        Command::new("rundll32.exe")
            .arg("url.dll,FileProtocolHandler")
            .arg(url)
            .spawn()
            .with_context(|| format!("failed to open {}", url))?;
        Ok(())
    }

    fn reveal_file(&self, path: &Path) -> Result<()> {
        Command::new("explorer.exe")
            .arg(format!("/select,{}", path.display()))
            .spawn()
            .with_context(|| format!("failed to show {} in Explorer", path.display()))?;
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

        let mut child = build_elevated_command(program, args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| launch_failed(format!("cannot start PowerShell: {}", e)))?;

        let status = wait_with_deadline(&mut child, timeout)
            .map_err(|e| launch_failed(e.to_string()))?;

        let Some(status) = status else {
            tracing::warn!("Installer still running after {:?}", timeout);
            return Ok(LaunchOutcome::TimedOut);
        };

        let code = exit_code(status);
        if code != 0 {
            let mut stderr = String::new();
            if let Some(mut pipe) = child.stderr.take() {
                pipe.read_to_string(&mut stderr).ok();
            }
            // Start-Process itself failed (UAC declined, missing file).
            if !stderr.trim().is_empty() {
                return Err(launch_failed(stderr.trim().to_string()));
            }
        }
        Ok(LaunchOutcome::Exited(code))
    }
}

/// Machine architecture from the processor environment variables.
///
/// `PROCESSOR_ARCHITEW6432` is set in WOW64 processes and names the native
/// architecture. x64 emulation on ARM64 still reports `AMD64`, so the
/// processor identifier is consulted as well.
pub fn architecture_from_env(lookup: impl Fn(&str) -> Option<String>) -> Architecture {
    let reported = lookup("PROCESSOR_ARCHITEW6432").or_else(|| lookup("PROCESSOR_ARCHITECTURE"));
    if reported.as_deref().and_then(Architecture::from_name) == Some(Architecture::Arm64) {
        return Architecture::Arm64;
    }

    let identifier = lookup("PROCESSOR_IDENTIFIER").unwrap_or_default();
    if identifier.trim_start().to_ascii_uppercase().starts_with("ARM") {
        return Architecture::Arm64;
    }

    if cfg!(target_arch = "aarch64") {
        Architecture::Arm64
    } else {
        Architecture::X64
    }
}

/// `<Program Files>\dotnet`, preferring the 64-bit Program Files.
///
/// `DOTNET_ROOT` is ignored; the runtime installers always write under
/// Program Files.
pub fn dotnet_root_from_env(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    let program_files = lookup("ProgramW6432")
        .or_else(|| lookup("ProgramFiles"))
        .unwrap_or_else(|| r"C:\Program Files".to_string());
    PathBuf::from(program_files).join("dotnet")
}

/// Quote a value as a PowerShell single-quoted string literal.
pub fn ps_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// PowerShell script that elevates `program` and exits with its exit code.
pub fn elevation_script(program: &Path, args: &[String]) -> String {
    let mut start = format!(
        "Start-Process -FilePath {}",
        ps_quote(&program.display().to_string())
    );
    if !args.is_empty() {
        let list: Vec<String> = args.iter().map(|a| ps_quote(a)).collect();
        start.push_str(&format!(" -ArgumentList {}", list.join(",")));
    }
    start.push_str(" -Verb RunAs -Wait -PassThru");

    format!(
        "try {{ $p = {}; exit $p.ExitCode }} catch {{ [Console]::Error.WriteLine($_.Exception.Message); exit 1 }}",
        start
    )
}

/// The full PowerShell command line for an elevated launch.
pub fn build_elevated_command(program: &Path, args: &[String]) -> Command {
    let mut cmd = Command::new("powershell.exe");
    cmd.args([
        "-NoProfile",
        "-NonInteractive",
        "-ExecutionPolicy",
        "Bypass",
        "-Command",
    ]);
    cmd.arg(elevation_script(program, args));
    cmd
}
