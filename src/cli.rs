//! CLI interface for lintcommit.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod check;
pub mod config;
mod formatting;
pub mod message;

/// lintcommit: validates commit messages and branch names against a rule set.
#[derive(Parser)]
#[command(name = "lintcommit")]
#[command(about = "Validates commit messages against a declarative rule set", long_about = None)]
#[command(version)]
pub struct Cli {
    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Main commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Checks every commit in a range (pre-push hooks, CI gates).
    Check(check::CheckCommand),
    /// Checks a single message from a file or stdin (commit-msg hooks).
    Message(message::MessageCommand),
    /// Shows or validates the rule set.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Check(check_cmd) => check_cmd.execute().await,
            Commands::Message(message_cmd) => message_cmd.execute(),
            Commands::Config(config_cmd) => config_cmd.execute(),
        }
    }
}
