//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use runtime_installer::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("install_runtime", "manual");
//!
//! ui.show_step("Downloading");
//! ui.success("Download complete.");
//!
//! assert!(ui.steps().contains(&"Downloading".to_string()));
//! assert!(ui.has_success("Download complete"));
//! ```

use std::collections::HashMap;

use crate::error::Result;

use super::{parse_confirm, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
///
/// Prompts are answered from `set_prompt_response`, else their default.
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    details: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    steps: Vec<String>,
    spinners: Vec<String>,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a message containing `msg` was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_detail(&self, msg: &str) -> bool {
        self.details.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    fn scripted_response(&self, key: &str) -> Option<String> {
        self.prompt_responses.get(key).cloned()
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        OutputMode::Normal
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn detail(&mut self, msg: &str) {
        self.details.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        let response = self
            .scripted_response(&prompt.key)
            .or_else(|| prompt.default.clone());

        Ok(match (&prompt.prompt_type, response) {
            (PromptType::Confirm, Some(r)) => PromptResult::Bool(parse_confirm(&r)),
            (PromptType::Confirm, None) => PromptResult::Bool(false),
            (PromptType::Choice { .. }, r) => PromptResult::String(r.unwrap_or_default()),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_step(&mut self, title: &str) {
        self.steps.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Mock spinner that captures finish messages.
#[derive(Debug, Default)]
pub struct MockSpinner {
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Error,
}

impl MockSpinner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(SpinnerStatus::Success);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(SpinnerStatus::Error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    fn confirm(key: &str, default: Option<&str>) -> Prompt {
        Prompt {
            key: key.to_string(),
            question: "Continue?".to_string(),
            prompt_type: PromptType::Confirm,
            default: default.map(String::from),
        }
    }

    fn choice(key: &str) -> Prompt {
        Prompt {
            key: key.to_string(),
            question: "Install?".to_string(),
            prompt_type: PromptType::Choice {
                options: vec![PromptOption::new('y', "yes", "install")],
            },
            default: None,
        }
    }

    #[test]
    fn mock_ui_captures_output() {
        let mut ui = MockUI::new();
        ui.message("Hello");
        ui.detail("from: https://example.com");
        ui.success("Done");
        ui.warning("Careful");
        ui.error("Broken");
        ui.show_header("Banner");
        ui.show_step("Downloading");

        assert!(ui.has_message("Hello"));
        assert!(ui.has_detail("example.com"));
        assert!(ui.has_success("Done"));
        assert!(ui.has_warning("Careful"));
        assert!(ui.has_error("Broken"));
        assert_eq!(ui.headers(), &["Banner".to_string()]);
        assert_eq!(ui.steps(), &["Downloading".to_string()]);
    }

    #[test]
    fn scripted_confirm_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_now", "no");
        let result = ui.prompt(&confirm("install_now", Some("true"))).unwrap();
        assert_eq!(result, PromptResult::Bool(false));
        assert_eq!(ui.prompts_shown(), &["install_now".to_string()]);
    }

    #[test]
    fn confirm_falls_back_to_default() {
        let mut ui = MockUI::new();
        let result = ui.prompt(&confirm("install_now", Some("true"))).unwrap();
        assert_eq!(result, PromptResult::Bool(true));
    }

    #[test]
    fn scripted_choice_is_repeated() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("install_runtime", "manual");

        let p = choice("install_runtime");
        assert_eq!(ui.prompt(&p).unwrap().as_string(), "manual");
        assert_eq!(ui.prompt(&p).unwrap().as_string(), "manual");
        assert_eq!(ui.prompts_shown().len(), 2);
    }

    #[test]
    fn unscripted_choice_without_default_is_empty() {
        let mut ui = MockUI::new();
        assert_eq!(ui.prompt(&choice("x")).unwrap().as_string(), "");
    }

    #[test]
    fn mock_spinner_records_status() {
        let mut spinner = MockSpinner::new();
        spinner.set_message("Working...");
        spinner.finish_success("Done!");

        assert_eq!(spinner.finish_message(), Some("Done!"));
        assert_eq!(spinner.status(), Some(SpinnerStatus::Success));

        let mut failed = MockSpinner::new();
        failed.finish_error("Failed!");
        assert_eq!(failed.status(), Some(SpinnerStatus::Error));
    }

    #[test]
    fn start_spinner_is_recorded() {
        let mut ui = MockUI::new();
        let _ = ui.start_spinner("Downloading...");
        assert_eq!(ui.spinners(), &["Downloading...".to_string()]);
    }
}
