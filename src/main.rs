//! Runtime installer CLI entry point.

use std::process::ExitCode;

use runtime_installer::cli::{Cli, Command, InstallCommand};
use runtime_installer::config::load_config;
use runtime_installer::pipeline::Mode;
use runtime_installer::platform;
use runtime_installer::ui::{create_ui, OutputMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Logs go to stderr so they never interleave with prompts. Level is
/// controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("runtime_installer=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("runtime_installer=warn"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let (cli, ignored) = match Cli::try_parse_normalized() {
        Ok(parsed) => parsed,
        Err(e) => {
            e.print().ok();
            // Help and version go to stdout and are not failures.
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    init_tracing(cli.debug);

    tracing::debug!("Runtime installer starting with args: {:?}", cli);
    if !ignored.is_empty() {
        tracing::debug!("Ignoring unrecognized arguments: {:?}", ignored);
    }

    let output_mode = if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let mode = Mode::from_silent(cli.silent);
    let mut ui = create_ui(!mode.is_silent(), output_mode);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            return ExitCode::from(1);
        }
    };

    let command = InstallCommand::new(config, cli.family(), mode, platform::current());

    match command.execute(ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(1)
        }
    }
}
