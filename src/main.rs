//! peppy-setup CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use peppy_setup::cli::{Cli, CommandDispatcher, Commands};
use peppy_setup::ui::create_ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("peppy_setup=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("peppy_setup=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("peppy-setup starting with args: {:?}", cli);

    let assume_yes = match &cli.command {
        Some(Commands::Install(args)) => args.yes,
        Some(Commands::Uninstall(args)) => args.yes,
        None => cli.install.yes,
    };

    let mut ui = create_ui(assume_yes);
    let dispatcher = CommandDispatcher::new();

    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {e}"));
            ExitCode::from(1)
        }
    }
}
