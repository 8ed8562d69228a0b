//! CLI argument definitions.
//!
//! The installer is usually started by another installer or a launcher
//! script, which pass the legacy single-dash flags (`-silent`, `-desktop`,
//! `-web`) and sometimes switches meant for someone else.
//! [`NormalizedArgs`] rewrites the legacy flags into the long form clap
//! expects and sets unknown tokens aside, so they never fail the run.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::RuntimeFamily;

/// Flags that may be written as `-name`, `--name` or `/name`, in any case.
pub const LEGACY_FLAGS: [&str; 3] = ["silent", "desktop", "web"];

/// Flags passed through to clap unchanged.
const CLAP_FLAGS: [&str; 8] = [
    "--quiet",
    "-q",
    "--no-color",
    "--debug",
    "--help",
    "-h",
    "--version",
    "-V",
];

/// Options whose next token is a value.
const VALUE_OPTIONS: [&str; 2] = ["--config", "-c"];

/// Checks for a required .NET runtime and installs it when missing.
#[derive(Debug, Parser)]
#[command(name = "runtime-installer")]
#[command(author, version, about, long_about = None)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Install without prompts and pass the silent switch to the installer
    #[arg(long)]
    pub silent: bool,

    /// Check for the .NET Desktop Runtime (default)
    #[arg(long, overrides_with = "web")]
    pub desktop: bool,

    /// Check for the .NET Windows Hosting Bundle
    #[arg(long, overrides_with = "desktop")]
    pub web: bool,

    /// Path to an override file (default: runtime-installer.yml next to the executable)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only show errors and prompts
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse the process arguments, accepting the legacy flag spellings.
    ///
    /// Returns the parsed flags and the tokens that were ignored.
    pub fn try_parse_normalized() -> Result<(Self, Vec<OsString>), clap::Error> {
        let args = NormalizedArgs::from_args(std::env::args_os());
        let cli = Self::try_parse_from(args.recognized)?;
        Ok((cli, args.ignored))
    }

    /// The runtime family to check. The last of `-desktop`/`-web` wins.
    pub fn family(&self) -> RuntimeFamily {
        if self.web {
            RuntimeFamily::Web
        } else {
            RuntimeFamily::Desktop
        }
    }
}

/// Command line split into what clap parses and what is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedArgs {
    /// Program name followed by the flags clap understands.
    pub recognized: Vec<OsString>,
    /// Unknown switches and stray tokens.
    pub ignored: Vec<OsString>,
}

impl NormalizedArgs {
    /// Sort the raw arguments. The first one (the program name) is kept as is.
    ///
    /// Legacy flags become `--name`. The value after `--config`/`-c` is
    /// never rewritten.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args = args.into_iter();
        let mut normalized = Self {
            recognized: args.next().into_iter().collect(),
            ignored: Vec::new(),
        };

        let mut expects_value = false;
        for arg in args {
            if expects_value {
                expects_value = false;
                normalized.recognized.push(arg);
                continue;
            }

            let Some(text) = arg.to_str() else {
                normalized.ignored.push(arg);
                continue;
            };

            if let Some(flag) = legacy_flag(text) {
                normalized.recognized.push(flag);
            } else if VALUE_OPTIONS.contains(&text) {
                expects_value = true;
                normalized.recognized.push(arg);
            } else if CLAP_FLAGS.contains(&text) || text.starts_with("--config=") {
                normalized.recognized.push(arg);
            } else {
                normalized.ignored.push(arg);
            }
        }
        normalized
    }
}

/// Rewrite legacy flags to `--name` and drop everything clap would reject.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    NormalizedArgs::from_args(args).recognized
}

fn legacy_flag(text: &str) -> Option<OsString> {
    let name = text
        .strip_prefix("--")
        .or_else(|| text.strip_prefix('-'))
        .or_else(|| text.strip_prefix('/'))?
        .to_ascii_lowercase();

    LEGACY_FLAGS
        .contains(&name.as_str())
        .then(|| OsString::from(format!("--{}", name)))
}
