//! Check command — lints every commit in a range.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;

use crate::config::Rules;
use crate::data::check::{OutputFormat, RangeSummary};
use crate::data::RawCommit;
use crate::git::GitRepository;

/// Check command options - lints commit messages in a range.
#[derive(Parser)]
pub struct CheckCommand {
    /// Commit range to check (e.g., HEAD~3..HEAD, abc123..def456).
    /// Defaults to commits since the merge-base with the default branch.
    #[arg(value_name = "COMMIT_RANGE")]
    pub commit_range: Option<String>,

    /// Path to the rule set (defaults to lintcommit.yaml lookup).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Base branch to compare against, overriding branch.default.
    #[arg(long)]
    pub base: Option<String>,

    /// Branch name checked against task.branch_pattern (defaults to the current branch).
    #[arg(long)]
    pub branch: Option<String>,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Includes passing commits in text output (hidden by default).
    #[arg(long)]
    pub show_passing: bool,

    /// Suppresses progress output.
    #[arg(long)]
    pub quiet: bool,

    /// Maximum number of commits validated concurrently.
    #[arg(long, default_value = "4")]
    pub concurrency: usize,
}

impl CheckCommand {
    /// Executes the check command, exiting non-zero when any commit fails.
    pub async fn execute(self) -> Result<()> {
        let output_format: OutputFormat = self.format.parse().unwrap_or(OutputFormat::Text);
        let chatty = !self.quiet && output_format == OutputFormat::Text;

        let (config_path, rules) = crate::config::load_rules(self.config.as_deref())?;

        let repo = GitRepository::open()
            .context("Failed to open git repository. Make sure you're in a git repository.")?;
        let branch = self.resolve_branch(&repo);
        let commits = self.collect_commits(&repo, &rules, &branch)?;

        if chatty {
            println!(
                "🔍 Checking {} commits against {}",
                commits.len(),
                config_path.display()
            );
        }

        let summary =
            crate::lint::lint_range_concurrent(Arc::new(rules), commits, self.concurrency).await?;

        output_summary(&summary, output_format, self.show_passing)?;

        let exit_code = summary.exit_code();
        if exit_code != 0 {
            std::process::exit(exit_code);
        }

        Ok(())
    }

    fn resolve_branch(&self, repo: &GitRepository) -> String {
        if let Some(branch) = &self.branch {
            return branch.clone();
        }
        repo.current_branch().unwrap_or_else(|e| {
            warn!("Cannot determine current branch, branch rules see an empty name: {e}");
            String::new()
        })
    }

    /// Resolves the commit list from an explicit range or the base branch.
    fn collect_commits(
        &self,
        repo: &GitRepository,
        rules: &Rules,
        branch: &str,
    ) -> Result<Vec<RawCommit>> {
        if let Some(range) = &self.commit_range {
            return repo.commits_in_range(range, branch);
        }

        let base_branch = match self.base.as_deref() {
            Some(base) => base.to_string(),
            None => default_base_branch(repo, &rules.config().branch.default)?,
        };

        let base = repo
            .base_commit_from_branch(&base_branch)
            .with_context(|| format!("Failed to find base commit from branch {base_branch}"))?;
        repo.commits_from(&base, branch)
    }
}

/// Picks the configured default branch, falling back to `main` then `master`.
fn default_base_branch(repo: &GitRepository, configured: &str) -> Result<String> {
    if !configured.is_empty() {
        return Ok(configured.to_string());
    }
    for candidate in ["main", "master"] {
        if repo.branch_exists(candidate)? {
            return Ok(candidate.to_string());
        }
    }
    anyhow::bail!("branch.default is not configured and neither main nor master exists; pass --base")
}

/// Prints a summary in the requested format.
pub(crate) fn output_summary(
    summary: &RangeSummary,
    format: OutputFormat,
    show_passing: bool,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!();
            println!("{}", super::formatting::format_text_report(summary, show_passing));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(summary)
                .context("Failed to serialize report to JSON")?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml =
                crate::data::to_yaml(summary).context("Failed to serialize report to YAML")?;
            println!("{yaml}");
        }
    }
    Ok(())
}
