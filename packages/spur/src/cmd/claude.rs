//! Integration with Claude Code.

use clap::{Args, Subcommand};
use color_eyre::Result;

pub mod docs;
pub mod hook;
pub mod setup;

#[derive(Args, Clone, Debug)]
pub struct Config {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Debug)]
enum Commands {
    /// Respond to a Claude Code hook event read from stdin.
    Hook(hook::Config),

    /// Register Spur's hooks in Claude Code's settings.
    Setup(setup::Config),

    /// Print documentation for modes, triggers, and settings.
    Docs(docs::Config),
}

pub fn main(config: Config) -> Result<()> {
    match config.command {
        Commands::Hook(config) => hook::main(config),
        Commands::Setup(config) => setup::main(config),
        Commands::Docs(config) => docs::main(config),
    }
}
