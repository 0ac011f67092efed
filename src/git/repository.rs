//! Git repository operations

use anyhow::{Context, Result};
use git2::{Oid, Repository};
use tracing::debug;

use crate::data::RawCommit;

/// Git repository wrapper
pub struct GitRepository {
    repo: Repository,
}

impl GitRepository {
    /// Open repository at current directory
    pub fn open() -> Result<Self> {
        let repo = Repository::open(".").context("Not in a git repository")?;

        Ok(Self { repo })
    }

    /// Open repository at specified path
    pub fn open_at<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let repo = Repository::open(path).context("Failed to open git repository")?;

        Ok(Self { repo })
    }

    /// Get current branch name
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head().context("Failed to get HEAD reference")?;

        if let Some(name) = head.shorthand() {
            if name != "HEAD" {
                return Ok(name.to_string());
            }
        }

        anyhow::bail!("Repository is in detached HEAD state")
    }

    /// Check if a branch exists
    pub fn branch_exists(&self, branch_name: &str) -> Result<bool> {
        if self
            .repo
            .find_branch(branch_name, git2::BranchType::Local)
            .is_ok()
        {
            return Ok(true);
        }

        if self
            .repo
            .find_branch(branch_name, git2::BranchType::Remote)
            .is_ok()
        {
            return Ok(true);
        }

        Ok(self.repo.revparse_single(branch_name).is_ok())
    }

    /// Merge-base of `branch` and HEAD, as a full hash
    pub fn base_commit_from_branch(&self, branch: &str) -> Result<String> {
        if branch.is_empty() {
            anyhow::bail!("Branch name cannot be empty");
        }

        let branch_oid = self.resolve_commit(branch)?;
        let head_oid = self.resolve_commit("HEAD")?;
        let base = self
            .repo
            .merge_base(branch_oid, head_oid)
            .with_context(|| format!("No common ancestor between {branch} and HEAD"))?;

        debug!("Merge base of {branch} and HEAD is {base}");
        Ok(base.to_string())
    }

    /// Commits reachable from HEAD but not from `base`, oldest first
    pub fn commits_from(&self, base: &str, branch: &str) -> Result<Vec<RawCommit>> {
        self.commits_in_range(&format!("{base}..HEAD"), branch)
    }

    /// Parse commit range and get commits, oldest first
    ///
    /// Accepts `A..B`, `HEAD` or any single revision. Merge commits inside a
    /// range are skipped.
    pub fn commits_in_range(&self, range: &str, branch: &str) -> Result<Vec<RawCommit>> {
        let Some((start_spec, end_spec)) = range.split_once("..") else {
            let oid = self.resolve_commit(range)?;
            return Ok(vec![self.raw_commit(oid, branch)?]);
        };

        if end_spec.contains("..") {
            anyhow::bail!("Invalid range format: {}", range);
        }
        let end_spec = if end_spec.is_empty() { "HEAD" } else { end_spec };

        let start = self.resolve_commit(start_spec)?;
        let end = self.resolve_commit(end_spec)?;

        let mut walker = self.repo.revwalk().context("Failed to create revwalk")?;
        walker.push(end).context("Failed to push end commit")?;
        walker.hide(start).context("Failed to hide start commit")?;

        let mut commits = Vec::new();
        for oid in walker {
            let oid = oid.context("Failed to get commit OID from walker")?;
            let commit = self
                .repo
                .find_commit(oid)
                .context("Failed to find commit")?;

            if commit.parent_count() > 1 {
                debug!("Skipping merge commit {oid}");
                continue;
            }

            commits.push(self.raw_commit(oid, branch)?);
        }

        // Reverse to get chronological order (oldest first)
        commits.reverse();

        Ok(commits)
    }

    /// Raw message of a single commit
    pub fn commit_message(&self, rev: &str) -> Result<String> {
        let oid = self.resolve_commit(rev)?;
        let commit = self.repo.find_commit(oid).context("Failed to find commit")?;
        Ok(String::from_utf8_lossy(commit.message_bytes()).into_owned())
    }

    fn resolve_commit(&self, spec: &str) -> Result<Oid> {
        let obj = self
            .repo
            .revparse_single(spec)
            .with_context(|| format!("Failed to parse commit: {}", spec))?;
        let commit = obj
            .peel_to_commit()
            .with_context(|| format!("Failed to peel {} to commit", spec))?;
        Ok(commit.id())
    }

    fn raw_commit(&self, oid: Oid, branch: &str) -> Result<RawCommit> {
        let commit = self.repo.find_commit(oid).context("Failed to find commit")?;
        Ok(RawCommit::new(
            oid.to_string(),
            String::from_utf8_lossy(commit.message_bytes()),
            branch,
        ))
    }
}
