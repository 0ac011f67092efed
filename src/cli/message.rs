//! Message command — lints a single commit message for `commit-msg` hooks.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use crate::data::check::{OutputFormat, RangeSummary};
use crate::data::RawCommit;
use crate::git::GitRepository;

/// Message command options.
#[derive(Parser)]
pub struct MessageCommand {
    /// File holding the message (e.g. .git/COMMIT_EDITMSG). Reads stdin when omitted or "-".
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Path to the rule set (defaults to lintcommit.yaml lookup).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Branch name checked against task.branch_pattern (defaults to the current branch).
    #[arg(long)]
    pub branch: Option<String>,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl MessageCommand {
    /// Executes the message command, exiting non-zero on violations.
    pub fn execute(self) -> Result<()> {
        let output_format: OutputFormat = self.format.parse().unwrap_or(OutputFormat::Text);
        let (_, rules) = crate::config::load_rules(self.config.as_deref())?;

        let (label, raw) = self.read_message()?;
        let message = super::formatting::strip_git_comments(&raw);
        let branch = self.branch.clone().unwrap_or_else(current_branch_or_empty);

        let report = crate::lint::validate(&rules, &RawCommit::new(label, message, branch));
        let summary = RangeSummary::new(vec![report]);

        super::check::output_summary(&summary, output_format, true)?;

        let exit_code = summary.exit_code();
        if exit_code != 0 {
            std::process::exit(exit_code);
        }

        Ok(())
    }

    /// Returns a display label and the raw message text.
    fn read_message(&self) -> Result<(String, String)> {
        match self.file.as_deref() {
            Some(path) if path != Path::new("-") => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read message file: {}", path.display()))?;
                let label = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
                Ok((label, content))
            }
            _ => {
                let mut content = String::new();
                std::io::stdin()
                    .read_to_string(&mut content)
                    .context("Failed to read message from stdin")?;
                Ok(("stdin".to_string(), content))
            }
        }
    }
}

/// Current branch of the repository in the working directory, or empty.
fn current_branch_or_empty() -> String {
    GitRepository::open()
        .and_then(|repo| repo.current_branch())
        .unwrap_or_else(|e| {
            tracing::debug!("No branch available for message check: {e}");
            String::new()
        })
}
