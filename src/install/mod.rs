//! Launching the downloaded installer.
//!
//! One elevated attempt per run, bounded by the configured timeout. Exit
//! codes 0, 1641 and 3010 count as success; the latter two mean Windows
//! wants a restart to finish.

use std::path::Path;
use std::time::Duration;

use crate::config::RuntimeRequirement;
use crate::error::{InstallerError, Result};
use crate::platform::{LaunchOutcome, Platform};
use crate::probe::version_from_file_name;

/// The installer initiated a restart.
pub const EXIT_RESTART_INITIATED: i32 = 1641;
/// The install succeeded but needs a restart.
pub const EXIT_RESTART_REQUIRED: i32 = 3010;

/// Exit codes that mean the runtime is installed.
pub const SUCCESS_EXIT_CODES: [i32; 3] = [0, EXIT_RESTART_INITIATED, EXIT_RESTART_REQUIRED];

/// Whether an installer exit code means success.
pub fn is_success_exit_code(code: i32) -> bool {
    SUCCESS_EXIT_CODES.contains(&code)
}

/// Whether an installer exit code asks for a restart.
pub fn requires_restart(code: i32) -> bool {
    matches!(code, EXIT_RESTART_INITIATED | EXIT_RESTART_REQUIRED)
}

/// Command-line arguments for the installer.
///
/// Silent runs get exactly one extra switch; interactive runs none.
pub fn installer_args(silent: bool, silent_switch: &str) -> Vec<String> {
    let switch = silent_switch.trim();
    if silent && !switch.is_empty() {
        vec![switch.to_string()]
    } else {
        Vec::new()
    }
}

/// Version shown while installing: from the file name, else the minimum.
pub fn version_label(file_name: &str, requirement: &RuntimeRequirement) -> String {
    version_from_file_name(file_name).unwrap_or_else(|| requirement.min_version.to_string())
}

/// Run the installer elevated and return its (successful) exit code.
///
/// # Errors
///
/// - `InstallLaunchFailed` if the file is missing or the launch fails
/// - `InstallTimedOut` if it is still running at the deadline
/// - `InstallerExited` for a failure exit code
pub fn run_installer(
    platform: &dyn Platform,
    installer: &Path,
    args: &[String],
    timeout: Duration,
) -> Result<i32> {
    if !installer.is_file() {
        return Err(InstallerError::InstallLaunchFailed {
            installer: installer.to_path_buf(),
            message: "installer file not found".to_string(),
        });
    }

    tracing::info!(
        "Launching {} {:?} (timeout {}s)",
        installer.display(),
        args,
        timeout.as_secs()
    );

    match platform.launch_elevated(installer, args, timeout)? {
        LaunchOutcome::Exited(code) if is_success_exit_code(code) => {
            tracing::info!("Installer exited with {}", code);
            Ok(code)
        }
        LaunchOutcome::Exited(code) => Err(InstallerError::InstallerExited {
            installer: installer.to_path_buf(),
            code,
        }),
        LaunchOutcome::TimedOut => Err(InstallerError::InstallTimedOut {
            installer: installer.to_path_buf(),
            timeout_secs: timeout.as_secs(),
        }),
    }
}
