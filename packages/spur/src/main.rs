//! Spur steers coding agents with context drawn from what the user asked for.

use std::io;

use color_eyre::{Result, Section};
use tracing::{instrument, level_filters::LevelFilter};

mod cmd;

use clap::{Parser, Subcommand};
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Spur steers coding agents with keyword-triggered context.
#[derive(Parser)]
#[command(author, version = env!("SPUR_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Integration with Claude Code.
    Claude(cmd::claude::Config),

    /// Classify a sample prompt and show the context it would inject.
    Test(cmd::test::Config),

    /// Validate settings files.
    Validate(cmd::validate::Config),
}

#[instrument]
fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Hooks speak JSON over stdout, so logs always go to stderr. Only errors
    // are logged by default; use `SPUR_LOG` directives when debugging.
    //
    // Examples:
    // - `SPUR_LOG=debug` to log each pipeline stage
    // - `SPUR_LOG=spur::diagnostics=trace` to trace linter runs
    tracing_subscriber::registry()
        .with(ErrorLayer::default())
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
                .pretty(),
        )
        .with(
            EnvFilter::builder()
                .with_env_var("SPUR_LOG")
                .with_default_directive(LevelFilter::ERROR.into())
                .from_env_lossy(),
        )
        .init();

    match cli.command {
        Commands::Claude(config) => cmd::claude::main(config),
        Commands::Test(config) => cmd::test::main(config),
        Commands::Validate(config) => cmd::validate::main(config),
    }
    .suggestion("Run `spur claude docs` for documentation on modes, triggers, and settings.")
}
