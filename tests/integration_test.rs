use anyhow::Result;
use git2::{Repository, Signature};
use lintcommit::config::{self, Config, Rules};
use lintcommit::data::check::RuleId;
use lintcommit::git::GitRepository;
use lintcommit::lint::{lint_range, lint_range_concurrent};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

const EXAMPLE_CONFIG: &str = include_str!("../lintcommit.example.yaml");

/// Test setup that creates a temporary git repository with test commits
struct TestRepo {
    _temp_dir: TempDir,
    repo_path: PathBuf,
    repo: Repository,
    commits: Vec<git2::Oid>,
}

impl TestRepo {
    fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let repo_path = temp_dir.path().to_path_buf();

        let repo = Repository::init(&repo_path)?;

        let mut config = repo.config()?;
        config.set_str("user.name", "Test User")?;
        config.set_str("user.email", "test@example.com")?;

        Ok(TestRepo {
            _temp_dir: temp_dir,
            repo_path,
            repo,
            commits: Vec::new(),
        })
    }

    fn path(&self) -> &Path {
        &self.repo_path
    }

    fn write_tree(&self, content: &str) -> Result<git2::Oid> {
        fs::write(self.repo_path.join("test.txt"), content)?;

        let mut index = self.repo.index()?;
        index.add_path(Path::new("test.txt"))?;
        index.write()?;
        Ok(index.write_tree()?)
    }

    fn add_commit(&mut self, message: &str, content: &str) -> Result<git2::Oid> {
        let parents: Vec<git2::Oid> = self.commits.last().copied().into_iter().collect();
        self.commit_with_parents(message, content, &parents)
    }

    fn commit_with_parents(
        &mut self,
        message: &str,
        content: &str,
        parent_ids: &[git2::Oid],
    ) -> Result<git2::Oid> {
        let tree = self.repo.find_tree(self.write_tree(content)?)?;
        let signature = Signature::now("Test User", "test@example.com")?;

        let parents = parent_ids
            .iter()
            .map(|id| self.repo.find_commit(*id))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

        let commit_id = self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parent_refs,
        )?;

        self.commits.push(commit_id);
        Ok(commit_id)
    }

    /// Writes a commit object with an arbitrary (possibly non-UTF-8) message
    /// and advances the current branch to it.
    fn add_raw_commit(&mut self, message: &[u8], content: &str) -> Result<git2::Oid> {
        let tree = self.write_tree(content)?;
        let mut buf = format!("tree {tree}\n").into_bytes();
        if let Some(parent) = self.commits.last() {
            buf.extend_from_slice(format!("parent {parent}\n").as_bytes());
        }
        buf.extend_from_slice(b"author Test User <test@example.com> 1700000000 +0000\n");
        buf.extend_from_slice(b"committer Test User <test@example.com> 1700000000 +0000\n\n");
        buf.extend_from_slice(message);

        let commit_id = self.repo.odb()?.write(git2::ObjectType::Commit, &buf)?;
        let head_ref = self
            .repo
            .head()?
            .name()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("HEAD has no name"))?;
        self.repo.reference(&head_ref, commit_id, true, "raw commit")?;

        self.commits.push(commit_id);
        Ok(commit_id)
    }

    fn checkout_new_branch(&self, name: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        self.repo.branch(name, &head, false)?;
        self.repo.set_head(&format!("refs/heads/{name}"))?;
        Ok(())
    }
}

fn example_rules() -> Rules {
    let config: Config = lintcommit::data::from_yaml(EXAMPLE_CONFIG).unwrap();
    Rules::compile(config).unwrap()
}

/// Repository with one commit on the default branch and two on a feature branch.
fn feature_branch_repo() -> Result<(TestRepo, String)> {
    let mut test_repo = TestRepo::new()?;
    test_repo.add_commit("chore: initial commit", "base")?;
    let default_branch = GitRepository::open_at(test_repo.path())?.current_branch()?;

    test_repo.checkout_new_branch("feature/TASK-7")?;
    test_repo.add_commit(
        "feat(api): add user endpoint\n\nAdds the endpoint with input validation.",
        "base\nendpoint",
    )?;
    test_repo.add_commit("wip", "base\nendpoint\nwip")?;

    Ok((test_repo, default_branch))
}

#[test]
fn test_current_branch_and_merge_base() -> Result<()> {
    let (test_repo, default_branch) = feature_branch_repo()?;
    let repo = GitRepository::open_at(test_repo.path())?;

    assert_eq!(repo.current_branch()?, "feature/TASK-7");
    assert!(repo.branch_exists(&default_branch)?);
    assert!(!repo.branch_exists("does-not-exist")?);

    let base = repo.base_commit_from_branch(&default_branch)?;
    assert_eq!(base, test_repo.commits[0].to_string());

    Ok(())
}

#[test]
fn test_base_commit_requires_branch_name() -> Result<()> {
    let (test_repo, _) = feature_branch_repo()?;
    let repo = GitRepository::open_at(test_repo.path())?;

    assert!(repo.base_commit_from_branch("").is_err());
    Ok(())
}

#[test]
fn test_commits_from_base_are_oldest_first() -> Result<()> {
    let (test_repo, default_branch) = feature_branch_repo()?;
    let repo = GitRepository::open_at(test_repo.path())?;

    let base = repo.base_commit_from_branch(&default_branch)?;
    let commits = repo.commits_from(&base, "feature/TASK-7")?;

    let hashes: Vec<_> = commits.iter().map(|c| c.hash.clone()).collect();
    assert_eq!(
        hashes,
        vec![
            test_repo.commits[1].to_string(),
            test_repo.commits[2].to_string()
        ]
    );
    assert!(commits.iter().all(|c| c.branch == "feature/TASK-7"));
    assert_eq!(commits[1].message, "wip");

    Ok(())
}

#[test]
fn test_commit_message_and_single_revision() -> Result<()> {
    let (test_repo, _) = feature_branch_repo()?;
    let repo = GitRepository::open_at(test_repo.path())?;

    assert_eq!(repo.commit_message("HEAD")?, "wip");

    let single = repo.commits_in_range("HEAD~1", "x")?;
    assert_eq!(single.len(), 1);
    assert!(single[0].message.starts_with("feat(api): add user endpoint"));

    Ok(())
}

#[test]
fn test_non_utf8_message_keeps_its_text() -> Result<()> {
    let (mut test_repo, _) = feature_branch_repo()?;
    test_repo.add_raw_commit(b"feat(api): add caf\xe9 endpoint\n", "latin1")?;

    let repo = GitRepository::open_at(test_repo.path())?;
    let message = repo.commit_message("HEAD")?;
    assert!(message.starts_with("feat(api): add caf"));
    assert!(message.contains('\u{FFFD}'));

    let commits = repo.commits_in_range("HEAD~1..HEAD", "feature/TASK-7")?;
    assert_eq!(commits.len(), 1);
    let report = lintcommit::lint::validate(&example_rules(), &commits[0]);
    assert!(!report.rule_ids().contains(&RuleId::TypeMissing));
    assert!(!report.rule_ids().contains(&RuleId::SubjectTooShort));
    Ok(())
}

#[test]
fn test_merge_commits_are_skipped() -> Result<()> {
    let (mut test_repo, _) = feature_branch_repo()?;
    let base = test_repo.commits[0];
    let head = *test_repo.commits.last().unwrap();
    test_repo.commit_with_parents("Merge branch 'main'", "merged", &[head, base])?;

    let repo = GitRepository::open_at(test_repo.path())?;
    let commits = repo.commits_in_range(&format!("{base}..HEAD"), "")?;

    assert_eq!(commits.len(), 2);
    assert!(commits.iter().all(|c| !c.message.starts_with("Merge")));
    Ok(())
}

#[test]
fn test_invalid_range_is_rejected() -> Result<()> {
    let (test_repo, _) = feature_branch_repo()?;
    let repo = GitRepository::open_at(test_repo.path())?;

    assert!(repo.commits_in_range("HEAD~1..HEAD..HEAD", "").is_err());
    assert!(repo.commits_in_range("no-such-ref..HEAD", "").is_err());
    Ok(())
}

#[test]
fn test_lint_feature_branch_with_example_rules() -> Result<()> {
    let (test_repo, default_branch) = feature_branch_repo()?;
    let repo = GitRepository::open_at(test_repo.path())?;

    let base = repo.base_commit_from_branch(&default_branch)?;
    let commits = repo.commits_from(&base, &repo.current_branch()?)?;

    let summary = lint_range(&example_rules(), &commits);

    assert!(!summary.passed);
    assert_eq!(summary.reports.len(), 2);
    assert!(
        summary.reports[0].passed,
        "unexpected violations: {:?}",
        summary.reports[0].violations
    );
    // The branch carries the task ID, so only the message rules fire.
    assert_eq!(
        summary.reports[1].rule_ids(),
        vec![
            RuleId::TypeMissing,
            RuleId::ScopeMissing,
            RuleId::SubjectTooShort,
            RuleId::ForbiddenWordFound,
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_concurrent_lint_matches_sequential() -> Result<()> {
    let (test_repo, default_branch) = feature_branch_repo()?;
    let repo = GitRepository::open_at(test_repo.path())?;
    let base = repo.base_commit_from_branch(&default_branch)?;
    let commits = repo.commits_from(&base, "main")?;

    let rules = example_rules();
    let sequential = lint_range(&rules, &commits);
    let concurrent = lint_range_concurrent(Arc::new(rules), commits, 2).await?;

    assert_eq!(sequential, concurrent);
    // Without the feature branch name the task rule fires on both commits.
    assert_eq!(concurrent.stats.by_rule[&RuleId::TaskNotFound], 2);
    Ok(())
}

#[test]
fn test_load_rules_from_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("lintcommit.yaml");
    fs::write(&path, EXAMPLE_CONFIG)?;

    let (resolved, rules) = config::load_rules(Some(&path))?;
    assert_eq!(resolved, path);
    assert_eq!(rules.config().branch.default, "master");
    assert_eq!(rules.forbidden().len(), 7);
    Ok(())
}

#[test]
fn test_load_rules_rejects_broken_rule_set() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("lintcommit.yaml");
    fs::write(
        &path,
        "task:\n  required: true\n  pattern: \"(TASK\"\n  location: [subject]\n",
    )?;

    let err = config::load_rules(Some(&path)).unwrap_err();
    assert!(format!("{err:#}").contains("task.pattern"));
    Ok(())
}
