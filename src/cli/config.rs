//! Configuration-related CLI commands.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Prints the resolved rule set as YAML.
    Show(ShowCommand),
    /// Loads and compiles the rule set, reporting any setup error.
    Validate(ValidateCommand),
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {
    /// Path to the rule set (defaults to lintcommit.yaml lookup).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Validate command options.
#[derive(Parser)]
pub struct ValidateCommand {
    /// Path to the rule set (defaults to lintcommit.yaml lookup).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self) -> Result<()> {
        match self.command {
            ConfigSubcommands::Show(show_cmd) => show_cmd.execute(),
            ConfigSubcommands::Validate(validate_cmd) => validate_cmd.execute(),
        }
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self) -> Result<()> {
        let (path, rules) = crate::config::load_rules(self.config.as_deref())?;
        println!("# {}", path.display());
        print!("{}", crate::data::to_yaml(rules.config())?);
        println!();
        Ok(())
    }
}

impl ValidateCommand {
    /// Executes the validate command.
    pub fn execute(self) -> Result<()> {
        let (path, _) = crate::config::load_rules(self.config.as_deref())?;
        println!("✅ {} is valid", path.display());
        Ok(())
    }
}
