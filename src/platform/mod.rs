//! Platform capabilities the pipeline depends on.
//!
//! Everything that differs between operating systems sits behind the
//! [`Platform`] trait: special folders, architecture detection, opening
//! URLs and files, and launching the installer with elevation. The
//! pipeline only ever talks to `&dyn Platform`, so tests run it against
//! [`MockPlatform`].

pub mod mock;
#[cfg(unix)]
pub mod unix;
pub mod windows;

pub use mock::{LaunchScript, MockPlatform, RecordedLaunch};
#[cfg(unix)]
pub use unix::UnixPlatform;
pub use windows::WindowsPlatform;

use crate::config::Architecture;
use crate::error::Result;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

/// How often a launched installer is polled for exit.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// How an elevated launch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The installer exited with this code.
    Exited(i32),
    /// The deadline passed; the installer may still be running.
    TimedOut,
}

/// OS-specific operations used by the pipeline.
pub trait Platform {
    /// CPU architecture of the machine (not of this process).
    fn architecture(&self) -> Architecture;

    /// Machine-wide directory containing the `shared/<framework>` install
    /// roots, where the runtime installers write.
    fn dotnet_root(&self) -> PathBuf;

    /// The user's downloads folder.
    fn downloads_dir(&self) -> Result<PathBuf>;

    /// Open a URL in the default browser.
    fn open_url(&self, url: &str) -> Result<()>;

    /// Show a file in the platform file browser.
    fn reveal_file(&self, path: &Path) -> Result<()>;

    /// Run `program` with elevated privileges and wait up to `timeout`.
    ///
    /// # Errors
    ///
    /// `InstallLaunchFailed` when the process cannot be started or
    /// elevation is refused.
    fn launch_elevated(
        &self,
        program: &Path,
        args: &[String],
        timeout: Duration,
    ) -> Result<LaunchOutcome>;
}

/// The platform implementation for the running OS.
pub fn current() -> Box<dyn Platform> {
    #[cfg(windows)]
    {
        Box::new(WindowsPlatform::new())
    }

    #[cfg(unix)]
    {
        Box::new(UnixPlatform::new())
    }
}

/// Poll `child` until it exits or `timeout` elapses.
///
/// Returns `None` on timeout. The child is not killed. A timeout too large
/// to represent as an instant waits without a deadline.
pub fn wait_with_deadline(child: &mut Child, timeout: Duration) -> io::Result<Option<ExitStatus>> {
    let deadline = Instant::now().checked_add(timeout);
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        let pause = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return Ok(None);
                }
                POLL_INTERVAL.min(deadline - now)
            }
            None => POLL_INTERVAL,
        };
        thread::sleep(pause);
    }
}

/// Map an exit status to a code; termination by signal maps to -1.
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// Read a non-empty environment variable.
pub(crate) fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Downloads folder from the known-folder lookup, else `<home>/Downloads`.
pub(crate) fn default_downloads_dir() -> Result<PathBuf> {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .ok_or_else(|| crate::error::InstallerError::PlatformUnavailable {
            message: "Could not determine the downloads folder".to_string(),
        })
}
