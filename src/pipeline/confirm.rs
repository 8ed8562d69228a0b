//! The two decision points.
//!
//! Silent mode answers both affirmatively without touching the console.

use crate::config::RuntimeRequirement;
use crate::error::Result;
use crate::ui::{Prompt, PromptOption, PromptType, UserInterface};

use super::Mode;

/// Prompt key for the first decision.
pub const INSTALL_RUNTIME_KEY: &str = "install_runtime";
/// Prompt key for the install-after-download decision.
pub const INSTALL_NOW_KEY: &str = "install_now";

/// Answer to "download and install now?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialChoice {
    Install,
    ManualDownload,
    Decline,
}

impl InitialChoice {
    fn value(&self) -> &'static str {
        match self {
            InitialChoice::Install => "install",
            InitialChoice::ManualDownload => "manual",
            InitialChoice::Decline => "decline",
        }
    }

    /// Any unrecognized answer declines.
    fn from_value(value: &str) -> Self {
        match value {
            "install" => InitialChoice::Install,
            "manual" => InitialChoice::ManualDownload,
            _ => InitialChoice::Decline,
        }
    }
}

/// Ask whether to install, open the manual download page, or stop.
pub fn ask_initial_choice(
    ui: &mut dyn UserInterface,
    mode: Mode,
    requirement: &RuntimeRequirement,
) -> Result<InitialChoice> {
    if mode.is_silent() {
        return Ok(InitialChoice::Install);
    }

    let prompt = Prompt {
        key: INSTALL_RUNTIME_KEY.to_string(),
        question: format!(
            "Would you like to download and install the {} now?",
            requirement.display_name()
        ),
        prompt_type: PromptType::Choice {
            options: vec![
                PromptOption::new('y', "yes", InitialChoice::Install.value()),
                PromptOption::new('n', "no", InitialChoice::Decline.value()),
                PromptOption::new(
                    'm',
                    "manually download and install",
                    InitialChoice::ManualDownload.value(),
                ),
            ],
        },
        default: Some(InitialChoice::Install.value().to_string()),
    };

    let answer = ui.prompt(&prompt)?.as_string();
    Ok(InitialChoice::from_value(&answer))
}

/// Ask whether to run the downloaded installer now. "No" reveals the file.
pub fn ask_install_now(ui: &mut dyn UserInterface, mode: Mode) -> Result<bool> {
    if mode.is_silent() {
        return Ok(true);
    }

    let prompt = Prompt {
        key: INSTALL_NOW_KEY.to_string(),
        question: "Would you like to install the runtime now? (No shows the installer in your file browser)"
            .to_string(),
        prompt_type: PromptType::Confirm,
        default: Some("true".to_string()),
    };

    Ok(ui.prompt(&prompt)?.as_bool().unwrap_or(false))
}
