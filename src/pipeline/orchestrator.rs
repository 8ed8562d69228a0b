//! Drives a [`PipelineState`] from `Unchecked` to a terminal state.

use std::path::PathBuf;

use crate::config::RuntimeRequirement;
use crate::download::{
    file_name_from_url, format_bytes, verify_file, DigestCheck, DownloadArtifact,
    DownloadProgress, HttpDownloader,
};
use crate::error::InstallerError;
use crate::install::{installer_args, requires_restart, run_installer, version_label};
use crate::platform::Platform;
use crate::probe;
use crate::ui::UserInterface;

use super::confirm::{ask_initial_choice, ask_install_now, InitialChoice};
use super::{PipelineSettings, PipelineState};

/// Result of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRun {
    /// The terminal state reached.
    pub state: PipelineState,
    /// Names of every state passed through, in order.
    pub visited: Vec<&'static str>,
}

impl PipelineRun {
    pub fn exit_code(&self) -> u8 {
        self.state.exit_code()
    }

    pub fn succeeded(&self) -> bool {
        self.state.is_success()
    }
}

/// One pipeline run for one requirement.
pub struct Pipeline<'a> {
    requirement: &'a RuntimeRequirement,
    settings: &'a PipelineSettings,
    platform: &'a dyn Platform,
    downloader: &'a HttpDownloader,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        requirement: &'a RuntimeRequirement,
        settings: &'a PipelineSettings,
        platform: &'a dyn Platform,
        downloader: &'a HttpDownloader,
    ) -> Self {
        Self {
            requirement,
            settings,
            platform,
            downloader,
        }
    }

    /// Run every stage until a terminal state is reached.
    ///
    /// Stage failures end in a failure state; nothing here returns an error.
    pub fn run(&self, ui: &mut dyn UserInterface) -> PipelineRun {
        let mut state = PipelineState::Unchecked;
        let mut visited = vec![state.name()];

        while !state.is_terminal() {
            let from = state.name();
            state = self.step(state, ui);
            tracing::debug!("Pipeline {} -> {}", from, state.name());
            visited.push(state.name());
        }

        tracing::info!(
            "Pipeline finished in state {} (exit {})",
            state.name(),
            state.exit_code()
        );
        PipelineRun { state, visited }
    }

    fn step(&self, state: PipelineState, ui: &mut dyn UserInterface) -> PipelineState {
        match state {
            PipelineState::Unchecked => self.check(ui),
            PipelineState::NeedsInstall => self.confirm(ui),
            PipelineState::Downloading => self.download(ui),
            PipelineState::Downloaded(artifact) => self.verify(artifact, ui),
            PipelineState::Verified(artifact) => self.offer_install(artifact, ui),
            PipelineState::Installing(artifact) => self.install(artifact, ui),
            terminal => terminal,
        }
    }

    fn check(&self, ui: &mut dyn UserInterface) -> PipelineState {
        let req = self.requirement;
        match probe::find_satisfying(&self.settings.install_root, req) {
            Some(found) => {
                tracing::info!("Installed version {} satisfies {}", found, req.describe());
                ui.success(&format!("{} or later is already installed.", req.describe()));
                PipelineState::Satisfied
            }
            None => {
                ui.show_header(&format!(
                    "{} requires the {} or later.",
                    req.application_name,
                    req.describe()
                ));
                PipelineState::NeedsInstall
            }
        }
    }

    fn confirm(&self, ui: &mut dyn UserInterface) -> PipelineState {
        let choice = match ask_initial_choice(ui, self.settings.mode, self.requirement) {
            Ok(choice) => choice,
            Err(e) => {
                tracing::warn!("Prompt failed: {}", e);
                InitialChoice::Decline
            }
        };

        match choice {
            InitialChoice::Install => PipelineState::Downloading,
            InitialChoice::ManualDownload => {
                let page = &self.requirement.manual_download_page;
                match self.platform.open_url(page) {
                    Ok(()) => {
                        ui.message("Opened the download page in your browser:");
                    }
                    Err(e) => {
                        tracing::warn!("Could not open {}: {}", page, e);
                        ui.warning("Could not open a browser. Download the runtime from:");
                    }
                }
                ui.detail(page);
                PipelineState::ManualPageOpened
            }
            InitialChoice::Decline => {
                ui.error(&format!(
                    "Installation cancelled. {} needs the {} to run.",
                    self.requirement.application_name,
                    self.requirement.display_name()
                ));
                PipelineState::Declined
            }
        }
    }

    fn download_dir(&self) -> crate::error::Result<PathBuf> {
        match &self.settings.download_dir {
            Some(dir) => Ok(dir.clone()),
            None => self.platform.downloads_dir(),
        }
    }

    fn download(&self, ui: &mut dyn UserInterface) -> PipelineState {
        let req = self.requirement;
        let url = &req.download_url;

        ui.show_step(&format!("Downloading {} Installer", req.display_name()));

        let target_dir = match self.download_dir() {
            Ok(dir) => dir,
            Err(e) => {
                ui.error(&e.to_string());
                return PipelineState::DownloadFailed {
                    reason: e.to_string(),
                };
            }
        };

        let target = file_name_from_url(url)
            .map(|name| target_dir.join(name))
            .unwrap_or_else(|_| target_dir.clone());
        ui.detail(&format!("from: {}", url));
        ui.detail(&format!("to:   {}", target.display()));

        let mut spinner = ui.start_spinner("Please wait while we download...");
        let result = {
            let mut on_progress =
                |progress: DownloadProgress| spinner.set_message(&progress_message(progress));
            self.downloader.download(url, &target_dir, &mut on_progress)
        };

        match result {
            Ok(path) => {
                spinner.finish_success("Download complete.");
                PipelineState::Downloaded(DownloadArtifact::new(
                    url.clone(),
                    path,
                    req.expected_digest.clone(),
                ))
            }
            Err(e) => {
                spinner.finish_error("Download did not complete.");
                ui.error(&e.to_string());
                PipelineState::DownloadFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn verify(&self, mut artifact: DownloadArtifact, ui: &mut dyn UserInterface) -> PipelineState {
        let check = verify_file(&artifact.local_path, artifact.expected_digest.as_deref());

        let (expected, actual) = match check {
            Ok(DigestCheck::Skipped) => {
                ui.warning("No SHA512 hash is configured; skipping the file integrity check.");
                return PipelineState::Verified(artifact);
            }
            Ok(DigestCheck::Matched { actual }) => {
                artifact.actual_digest = Some(actual);
                ui.success("File integrity SHA512 hash matches.");
                return PipelineState::Verified(artifact);
            }
            Ok(DigestCheck::Mismatched { expected, actual }) => (expected, actual),
            Err(e) => (
                artifact.expected_digest.clone().unwrap_or_default(),
                format!("<unreadable: {}>", e),
            ),
        };

        tracing::warn!(
            "Integrity check failed for {}; leaving the file in place",
            artifact.local_path.display()
        );
        let err = InstallerError::IntegrityMismatch {
            expected: expected.clone(),
            actual: actual.clone(),
        };
        ui.error(&err.to_string());
        PipelineState::IntegrityFailed { expected, actual }
    }

    fn offer_install(&self, artifact: DownloadArtifact, ui: &mut dyn UserInterface) -> PipelineState {
        let install_now = ask_install_now(ui, self.settings.mode).unwrap_or_else(|e| {
            tracing::warn!("Prompt failed: {}", e);
            false
        });

        if install_now {
            return PipelineState::Installing(artifact);
        }

        let path = artifact.local_path;
        if let Err(e) = self.platform.reveal_file(&path) {
            tracing::warn!("Could not reveal {}: {}", path.display(), e);
            ui.warning("Could not open the file browser.");
        }
        ui.message("The installer was saved to:");
        ui.detail(&path.display().to_string());
        PipelineState::RevealedOnly(path)
    }

    fn install(&self, artifact: DownloadArtifact, ui: &mut dyn UserInterface) -> PipelineState {
        let req = self.requirement;
        let args = installer_args(self.settings.mode.is_silent(), &self.settings.silent_switch);

        ui.show_step(&format!(
            "Installing {} v{}...",
            req.display_name(),
            version_label(&artifact.file_name(), req)
        ));

        match run_installer(
            self.platform,
            &artifact.local_path,
            &args,
            self.settings.install_timeout,
        ) {
            Ok(code) => {
                if requires_restart(code) {
                    ui.warning("Restart your computer to finish the installation.");
                }
                ui.success("Installation complete.");
                PipelineState::Installed
            }
            Err(e) => {
                ui.error(&e.to_string());
                PipelineState::InstallFailed {
                    reason: e.to_string(),
                }
            }
        }
    }
}

fn progress_message(progress: DownloadProgress) -> String {
    match progress.total {
        Some(total) => format!(
            "Downloading... {} of {}",
            format_bytes(progress.received),
            format_bytes(total)
        ),
        None => format!("Downloading... {}", format_bytes(progress.received)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Architecture, FamilySettings};
    use crate::pipeline::confirm::{INSTALL_NOW_KEY, INSTALL_RUNTIME_KEY};
    use crate::pipeline::Mode;
    use crate::platform::MockPlatform;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn requirement(url: &str, digest: Option<&str>) -> RuntimeRequirement {
        let mut req = FamilySettings::desktop_defaults().requirement(Architecture::X64);
        req.download_url = url.to_string();
        req.expected_digest = digest.map(String::from);
        req
    }

    #[test]
    fn progress_message_formats() {
        let msg = progress_message(DownloadProgress {
            received: 2048,
            total: Some(4096),
        });
        assert_eq!(msg, "Downloading... 2 KB of 4 KB");
        let msg = progress_message(DownloadProgress {
            received: 1024,
            total: None,
        });
        assert_eq!(msg, "Downloading... 1 KB");
    }

    #[test]
    fn satisfied_runtime_skips_everything() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        fs::create_dir_all(root.join("10.0.2")).unwrap();

        let req = requirement("http://127.0.0.1:1/setup.exe", None);
        let settings = PipelineSettings::new(Mode::Interactive, &root);
        let platform = MockPlatform::new(temp.path(), temp.path());
        let downloader = HttpDownloader::new().unwrap();
        let mut ui = MockUI::new();

        let run = Pipeline::new(&req, &settings, &platform, &downloader).run(&mut ui);

        assert_eq!(run.state, PipelineState::Satisfied);
        assert_eq!(run.visited, vec!["unchecked", "satisfied"]);
        assert!(ui.has_success(".NET Desktop Runtime v10.0.0 or later is already installed."));
        assert!(ui.prompts_shown().is_empty());
        assert!(platform.launches().is_empty());
    }

    #[test]
    fn declining_ends_in_failure_without_side_effects() {
        let temp = TempDir::new().unwrap();
        let req = requirement("http://127.0.0.1:1/setup.exe", None);
        let settings = PipelineSettings::new(Mode::Interactive, temp.path().join("missing"));
        let platform = MockPlatform::new(temp.path(), temp.path());
        let downloader = HttpDownloader::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response(INSTALL_RUNTIME_KEY, "decline");

        let run = Pipeline::new(&req, &settings, &platform, &downloader).run(&mut ui);

        assert_eq!(run.state, PipelineState::Declined);
        assert_eq!(run.exit_code(), 1);
        assert!(ui.has_error("Installation cancelled"));
        assert!(ui.headers()[0].starts_with("Markdown Monster requires the .NET Desktop Runtime v10.0.0"));
    }

    #[test]
    fn manual_choice_opens_arch_specific_page() {
        let temp = TempDir::new().unwrap();
        let req = FamilySettings::desktop_defaults().requirement(Architecture::Arm64);
        let settings = PipelineSettings::new(Mode::Interactive, temp.path().join("missing"));
        let platform = MockPlatform::new(temp.path(), temp.path());
        let downloader = HttpDownloader::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response(INSTALL_RUNTIME_KEY, "manual");

        let run = Pipeline::new(&req, &settings, &platform, &downloader).run(&mut ui);

        assert_eq!(run.state, PipelineState::ManualPageOpened);
        assert_eq!(run.exit_code(), 0);
        let opened = platform.opened_urls();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].ends_with("arch=arm64"));
    }

    #[test]
    fn manual_choice_survives_missing_browser() {
        let temp = TempDir::new().unwrap();
        let req = FamilySettings::desktop_defaults().requirement(Architecture::X64);
        let settings = PipelineSettings::new(Mode::Interactive, temp.path().join("missing"));
        let platform = MockPlatform::new(temp.path(), temp.path()).failing_open();
        let downloader = HttpDownloader::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response(INSTALL_RUNTIME_KEY, "manual");

        let run = Pipeline::new(&req, &settings, &platform, &downloader).run(&mut ui);

        assert_eq!(run.state, PipelineState::ManualPageOpened);
        assert!(ui.has_warning("Could not open a browser"));
        assert!(ui.has_detail("arch=x64"));
    }

    #[test]
    fn missing_downloads_folder_is_download_failure() {
        let temp = TempDir::new().unwrap();
        let req = requirement("http://127.0.0.1:1/setup.exe", None);
        let settings = PipelineSettings::new(Mode::Silent, temp.path().join("missing"));
        let platform = MockPlatform::new(temp.path(), temp.path()).without_downloads_dir();
        let downloader = HttpDownloader::new().unwrap();
        let mut ui = MockUI::new();

        let run = Pipeline::new(&req, &settings, &platform, &downloader).run(&mut ui);

        assert!(matches!(run.state, PipelineState::DownloadFailed { .. }));
        assert_eq!(run.exit_code(), 1);
    }

    #[test]
    fn silent_install_prompt_is_skipped() {
        let mut ui = MockUI::new();
        ui.set_prompt_response(INSTALL_NOW_KEY, "no");
        assert!(ask_install_now(&mut ui, Mode::Silent).unwrap());
    }
}
