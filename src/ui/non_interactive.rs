//! Non-interactive UI for silent runs and redirected streams.

use std::collections::HashMap;

use crate::error::{InstallerError, Result};

use super::theme::InstallerTheme;
use super::{
    choice_hint, parse_confirm, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle,
    UserInterface,
};

/// Prefix of environment variables that answer prompts by key.
pub const PROMPT_ENV_PREFIX: &str = "RUNTIME_INSTALLER_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `RUNTIME_INSTALLER_PROMPT_<KEY>` when set,
/// otherwise from the prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
    theme: InstallerTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
            theme: InstallerTheme::plain(),
        }
    }

    fn answer_for(&self, prompt: &Prompt) -> Option<String> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        self.env_overrides
            .get(&env_key)
            .cloned()
            .or_else(|| prompt.default.clone())
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("    {}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let Some(answer) = self.answer_for(prompt) else {
            return Err(InstallerError::ConfigValidationError {
                message: format!(
                    "Cannot prompt for '{}' in non-interactive mode (no default value)",
                    prompt.key
                ),
            });
        };

        tracing::debug!("Answering prompt '{}' with '{}'", prompt.key, answer);
        match &prompt.prompt_type {
            PromptType::Confirm => {
                let value = parse_confirm(&answer);
                if self.mode.shows_status() {
                    println!("{} {}", prompt.question, if value { "yes" } else { "no" });
                }
                Ok(PromptResult::Bool(value))
            }
            PromptType::Choice { options } => {
                if self.mode.shows_status() {
                    println!(
                        "{} {} {}",
                        prompt.question,
                        choice_hint(options, prompt.default.as_deref()),
                        answer
                    );
                }
                Ok(PromptResult::String(answer))
            }
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {}", message);
        }
        Box::new(NoopSpinner {
            quiet: !self.mode.shows_status(),
        })
    }

    fn show_header(&mut self, title: &str) {
        println!("{}", self.theme.format_header(title));
    }

    fn show_step(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_step(title));
        }
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Spinner that only prints its final line.
struct NoopSpinner {
    quiet: bool,
}

impl SpinnerHandle for NoopSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if !self.quiet {
            println!("{}", InstallerTheme::plain().format_success(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", InstallerTheme::plain().format_error(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    fn choice_prompt(default: Option<&str>) -> Prompt {
        Prompt {
            key: "install_runtime".to_string(),
            question: "Install now?".to_string(),
            prompt_type: PromptType::Choice {
                options: vec![
                    PromptOption::new('y', "yes", "install"),
                    PromptOption::new('n', "no", "decline"),
                ],
            },
            default: default.map(String::from),
        }
    }

    #[test]
    fn non_interactive_is_not_interactive() {
        let ui = NonInteractiveUI::new(OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn prompt_uses_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        let result = ui.prompt(&choice_prompt(Some("install"))).unwrap();
        assert_eq!(result.as_string(), "install");
    }

    #[test]
    fn prompt_fails_without_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        assert!(ui.prompt(&choice_prompt(None)).is_err());
    }

    #[test]
    fn prompt_uses_env_override() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "RUNTIME_INSTALLER_PROMPT_INSTALL_RUNTIME".to_string(),
            "decline".to_string(),
        );

        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, overrides);
        let result = ui.prompt(&choice_prompt(Some("install"))).unwrap();
        assert_eq!(result.as_string(), "decline");
    }

    #[test]
    fn confirm_override_is_parsed() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "RUNTIME_INSTALLER_PROMPT_INSTALL_NOW".to_string(),
            "no".to_string(),
        );
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, overrides);
        let prompt = Prompt {
            key: "install_now".to_string(),
            question: "Run the installer now?".to_string(),
            prompt_type: PromptType::Confirm,
            default: Some("true".to_string()),
        };
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(false));
    }

    #[test]
    fn output_mode_preserved() {
        let ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn noop_spinner_methods() {
        let mut spinner = NoopSpinner { quiet: true };
        spinner.set_message("test");
        spinner.finish_success("done");
        spinner.finish_error("failed");
    }
}
