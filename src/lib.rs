//! Runtime installer - makes sure a required .NET runtime is present.
//!
//! The installer checks the dotnet install root for a version folder that
//! satisfies a minimum version. When none does, it offers to download the
//! matching installer, verifies its SHA-512 digest, and runs it elevated.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Built-in runtime catalog and YAML overrides
//! - [`download`] - Streaming HTTP download and digest verification
//! - [`error`] - Error types and result aliases
//! - [`install`] - Installer arguments and exit code handling
//! - [`pipeline`] - The check/confirm/download/verify/install state machine
//! - [`platform`] - OS-specific folders, elevation and shell integration
//! - [`probe`] - Installed version discovery
//! - [`ui`] - Prompts, spinners and terminal output
//!
//! # Example
//!
//! ```
//! use runtime_installer::config::{Architecture, FamilySettings};
//! use runtime_installer::probe::{parse_installed_version, satisfies};
//!
//! let requirement = FamilySettings::desktop_defaults().requirement(Architecture::X64);
//! let installed = parse_installed_version("10.0.2", false).unwrap();
//! assert!(satisfies(&installed, &requirement));
//! ```

pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod install;
pub mod pipeline;
pub mod platform;
pub mod probe;
pub mod ui;

pub use error::{InstallerError, Result};
