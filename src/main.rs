//! Buildpilot CLI - sequenced CMake build-test-install pipeline driver
//!
//! Entry point for the buildpilot command-line application.

use anyhow::Result;
use clap::Parser;

use buildpilot::cli::output::display_error;
use buildpilot::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Launch lines and stage progress are info level; -v raises the floor.
    let level = if cli.quiet {
        tracing::Level::ERROR
    } else {
        match cli.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    // Run the command and handle errors
    match cli.run() {
        Ok(()) => Ok(()),
        Err(e) => {
            display_error(&e);
            std::process::exit(1);
        }
    }
}
