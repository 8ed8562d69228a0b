//! Mock platform for testing.
//!
//! Records every side effect instead of performing it, and launches
//! nothing: the installer's outcome is scripted with [`LaunchScript`].

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{LaunchOutcome, Platform};
use crate::config::Architecture;
use crate::error::{InstallerError, Result};

/// Scripted result of `launch_elevated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchScript {
    /// The installer exits with this code.
    Exit(i32),
    /// The installer outlives the timeout.
    TimeOut,
    /// The launch itself fails (elevation refused).
    Fail(String),
}

/// One call to `launch_elevated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedLaunch {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub timeout: Duration,
}

/// Platform double with recorded side effects.
#[derive(Debug)]
pub struct MockPlatform {
    architecture: Architecture,
    dotnet_root: PathBuf,
    downloads_dir: Option<PathBuf>,
    launch: LaunchScript,
    fail_open: bool,
    fail_reveal: bool,
    launches: RefCell<Vec<RecordedLaunch>>,
    opened_urls: RefCell<Vec<String>>,
    revealed_files: RefCell<Vec<PathBuf>>,
}

impl MockPlatform {
    /// A mock whose installer exits 0 and which uses `downloads_dir`.
    pub fn new(dotnet_root: impl Into<PathBuf>, downloads_dir: impl Into<PathBuf>) -> Self {
        Self {
            architecture: Architecture::X64,
            dotnet_root: dotnet_root.into(),
            downloads_dir: Some(downloads_dir.into()),
            launch: LaunchScript::Exit(0),
            fail_open: false,
            fail_reveal: false,
            launches: RefCell::new(Vec::new()),
            opened_urls: RefCell::new(Vec::new()),
            revealed_files: RefCell::new(Vec::new()),
        }
    }

    pub fn with_architecture(mut self, architecture: Architecture) -> Self {
        self.architecture = architecture;
        self
    }

    pub fn with_launch(mut self, launch: LaunchScript) -> Self {
        self.launch = launch;
        self
    }

    /// Make `downloads_dir` fail.
    pub fn without_downloads_dir(mut self) -> Self {
        self.downloads_dir = None;
        self
    }

    /// Make `open_url` fail.
    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    /// Make `reveal_file` fail.
    pub fn failing_reveal(mut self) -> Self {
        self.fail_reveal = true;
        self
    }

    pub fn launches(&self) -> Vec<RecordedLaunch> {
        self.launches.borrow().clone()
    }

    pub fn opened_urls(&self) -> Vec<String> {
        self.opened_urls.borrow().clone()
    }

    pub fn revealed_files(&self) -> Vec<PathBuf> {
        self.revealed_files.borrow().clone()
    }
}

impl Platform for MockPlatform {
    fn architecture(&self) -> Architecture {
        self.architecture
    }

    fn dotnet_root(&self) -> PathBuf {
        self.dotnet_root.clone()
    }

    fn downloads_dir(&self) -> Result<PathBuf> {
        self.downloads_dir
            .clone()
            .ok_or_else(|| InstallerError::PlatformUnavailable {
                message: "no downloads folder".to_string(),
            })
    }

    fn open_url(&self, url: &str) -> Result<()> {
        if self.fail_open {
            return Err(anyhow::anyhow!("no browser available").into());
        }
        self.opened_urls.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn reveal_file(&self, path: &Path) -> Result<()> {
        if self.fail_reveal {
            return Err(anyhow::anyhow!("no file browser available").into());
        }
        self.revealed_files.borrow_mut().push(path.to_path_buf());
        Ok(())
    }

    fn launch_elevated(
        &self,
        program: &Path,
        args: &[String],
        timeout: Duration,
    ) -> Result<LaunchOutcome> {
        self.launches.borrow_mut().push(RecordedLaunch {
            program: program.to_path_buf(),
            args: args.to_vec(),
            timeout,
        });
        match &self.launch {
            LaunchScript::Exit(code) => Ok(LaunchOutcome::Exited(*code)),
            LaunchScript::TimeOut => Ok(LaunchOutcome::TimedOut),
            LaunchScript::Fail(message) => Err(InstallerError::InstallLaunchFailed {
                installer: program.to_path_buf(),
                message: message.clone(),
            }),
        }
    }
}
