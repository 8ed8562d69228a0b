//! Command-line interface for the runtime installer.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions and legacy flag normalization
//! - [`command`] - The [`Command`] trait and [`CommandResult`]
//! - [`install`] - The check-and-install command

pub mod args;
pub mod command;
pub mod install;

pub use args::{normalize_args, Cli, NormalizedArgs, LEGACY_FLAGS};
pub use command::{Command, CommandResult};
pub use install::InstallCommand;
