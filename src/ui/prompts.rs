//! Interactive prompts.

use console::{Key, Term};
use dialoguer::Confirm;

use crate::error::{InstallerError, Result};

use super::theme::InstallerTheme;
use super::{parse_confirm, Prompt, PromptOption, PromptResult, PromptType};

/// Convert dialoguer errors to InstallerError.
fn map_dialoguer_err(e: dialoguer::Error) -> InstallerError {
    InstallerError::Io(e.into())
}

/// Prompt the user for input, styled with the terminal's theme.
pub fn prompt_user(prompt: &Prompt, term: &Term, theme: &InstallerTheme) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Choice { options } => prompt_choice(prompt, options, term, theme),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt.default.as_deref().map(parse_confirm).unwrap_or(true);

    let result = Confirm::new()
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

/// Single key press: Enter picks the default, an option key picks that
/// option, anything else yields an empty value.
fn prompt_choice(
    prompt: &Prompt,
    options: &[PromptOption],
    term: &Term,
    theme: &InstallerTheme,
) -> Result<PromptResult> {
    term.write_line(&choice_line(prompt, options, theme))?;

    let key = term.read_key()?;
    term.write_line("")?;

    let value = match key {
        Key::Enter => prompt.default.clone().unwrap_or_default(),
        Key::Char(c) => option_for_key(options, c)
            .map(|o| o.value.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };
    Ok(PromptResult::String(value))
}

/// The question followed by its key legend.
pub fn choice_line(prompt: &Prompt, options: &[PromptOption], theme: &InstallerTheme) -> String {
    let hint = choice_hint(options, prompt.default.as_deref());
    format!(
        "{} {}",
        theme.info.apply_to(&prompt.question),
        theme.dim.apply_to(hint)
    )
}

/// Find the option bound to a key, ignoring case.
pub fn option_for_key(options: &[PromptOption], key: char) -> Option<&PromptOption> {
    options
        .iter()
        .find(|o| o.key.eq_ignore_ascii_case(&key))
}

/// Render the key legend, e.g. `[Y]es / [m]anual download / [n]o`.
///
/// The default option's key is shown upper-case.
pub fn choice_hint(options: &[PromptOption], default: Option<&str>) -> String {
    options
        .iter()
        .map(|o| {
            let key = if Some(o.value.as_str()) == default {
                o.key.to_ascii_uppercase()
            } else {
                o.key.to_ascii_lowercase()
            };
            let rest = o.label.get(1..).unwrap_or_default();
            format!("[{}]{}", key, rest)
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<PromptOption> {
        vec![
            PromptOption::new('y', "yes", "install"),
            PromptOption::new('m', "manual download", "manual"),
            PromptOption::new('n', "no", "decline"),
        ]
    }

    #[test]
    fn hint_capitalizes_default() {
        assert_eq!(
            choice_hint(&options(), Some("install")),
            "[Y]es / [m]anual download / [n]o"
        );
    }

    #[test]
    fn hint_without_default_is_lowercase() {
        assert_eq!(
            choice_hint(&options(), None),
            "[y]es / [m]anual download / [n]o"
        );
    }

    #[test]
    fn plain_theme_renders_unstyled_choice_line() {
        let prompt = Prompt {
            key: "install_runtime".to_string(),
            question: "Install it now?".to_string(),
            prompt_type: PromptType::Choice { options: options() },
            default: Some("install".to_string()),
        };
        assert_eq!(
            choice_line(&prompt, &options(), &InstallerTheme::plain()),
            "Install it now? [Y]es / [m]anual download / [n]o"
        );
    }

    #[test]
    fn option_lookup_ignores_case() {
        let opts = options();
        assert_eq!(option_for_key(&opts, 'M').map(|o| o.value.as_str()), Some("manual"));
        assert_eq!(option_for_key(&opts, 'n').map(|o| o.value.as_str()), Some("decline"));
        assert!(option_for_key(&opts, 'x').is_none());
    }
}
