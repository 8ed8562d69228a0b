//! The check-and-install command.

use crate::cli::command::{Command, CommandResult};
use crate::config::{InstallerConfig, RuntimeFamily};
use crate::download::HttpDownloader;
use crate::error::Result;
use crate::pipeline::{Mode, Pipeline, PipelineSettings};
use crate::platform::Platform;
use crate::ui::UserInterface;

/// Checks for the selected runtime and installs it when missing.
pub struct InstallCommand {
    config: InstallerConfig,
    family: RuntimeFamily,
    mode: Mode,
    platform: Box<dyn Platform>,
}

impl InstallCommand {
    pub fn new(
        config: InstallerConfig,
        family: RuntimeFamily,
        mode: Mode,
        platform: Box<dyn Platform>,
    ) -> Self {
        Self {
            config,
            family,
            mode,
            platform,
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let platform = self.platform.as_ref();
        let arch = platform.architecture();
        let requirement = self.config.family(self.family).requirement(arch);
        let settings = PipelineSettings::for_family(&self.config, self.mode, self.family, platform);

        tracing::debug!(
            "Checking {} ({}) under {}",
            requirement.describe(),
            arch,
            settings.install_root.display()
        );

        let downloader = HttpDownloader::new()?;
        let run = Pipeline::new(&requirement, &settings, platform, &downloader).run(ui);

        Ok(if run.succeeded() {
            CommandResult::success()
        } else {
            CommandResult::failure(run.exit_code())
        })
    }
}
