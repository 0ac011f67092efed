//! Range linting: one report per commit, aggregated into a summary.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Rules;
use crate::data::check::RangeSummary;
use crate::data::commit::RawCommit;

use super::validator::validate;

/// Lints every commit in input order. Never short-circuits.
pub fn lint_range(rules: &Rules, commits: &[RawCommit]) -> RangeSummary {
    info!("Linting {} commits", commits.len());
    let summary = RangeSummary::new(commits.iter().map(|c| validate(rules, c)).collect());
    info!(
        passed = summary.passed,
        failing = summary.stats.failing_commits,
        "Range lint finished"
    );
    summary
}

/// Lints commits on blocking worker threads, at most `concurrency` at a time.
///
/// Reports come back in input order regardless of completion order, so the
/// result is identical to [`lint_range`].
pub async fn lint_range_concurrent(
    rules: Arc<Rules>,
    commits: Vec<RawCommit>,
    concurrency: usize,
) -> Result<RangeSummary> {
    info!(
        "Linting {} commits (concurrency: {concurrency})",
        commits.len()
    );

    let semaphore = Arc::new(tokio::sync::Semaphore::new(concurrency.max(1)));

    let futs: Vec<_> = commits
        .into_iter()
        .map(|commit| {
            let sem = semaphore.clone();
            let rules = rules.clone();

            async move {
                let _permit = sem
                    .acquire()
                    .await
                    .map_err(|e| anyhow::anyhow!("semaphore closed: {e}"))?;

                tokio::task::spawn_blocking(move || validate(&rules, &commit))
                    .await
                    .context("Validation worker failed")
            }
        })
        .collect();

    // join_all keeps input order
    let reports = futures::future::try_join_all(futs).await?;

    let summary = RangeSummary::new(reports);
    info!(
        passed = summary.passed,
        failing = summary.stats.failing_commits,
        "Range lint finished"
    );
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::data::check::RuleId;

    const EXAMPLE: &str = include_str!("../../lintcommit.example.yaml");

    fn example_rules() -> Rules {
        Rules::compile(crate::data::from_yaml::<Config>(EXAMPLE).unwrap()).unwrap()
    }

    fn commits() -> Vec<RawCommit> {
        vec![
            RawCommit::new(
                "1111111",
                "feat(api): PROJ-1 add user endpoint\n\nAdds the endpoint with validation.",
                "feature/PROJ-1",
            ),
            RawCommit::new("2222222", "wip", "feature/PROJ-1"),
            RawCommit::new(
                "3333333",
                "chore(deps): bump serde to latest",
                "feature/PROJ-1",
            ),
        ]
    }

    #[test]
    fn empty_range_passes() {
        let summary = lint_range(&example_rules(), &[]);
        assert!(summary.reports.is_empty());
        assert!(summary.passed);
    }

    #[test]
    fn reports_follow_input_order() {
        let summary = lint_range(&example_rules(), &commits());
        let hashes: Vec<_> = summary.reports.iter().map(|r| r.hash.as_str()).collect();
        assert_eq!(hashes, vec!["1111111", "2222222", "3333333"]);
    }

    #[test]
    fn one_failure_fails_the_range() {
        let summary = lint_range(&example_rules(), &commits());
        assert!(!summary.passed);
        assert!(summary.reports[0].passed);
        assert!(!summary.reports[1].passed);
        assert!(summary.reports[2].passed);
        assert_eq!(summary.stats.failing_commits, 1);
        assert_eq!(summary.stats.by_rule[&RuleId::TypeMissing], 1);
    }

    #[test]
    fn all_commits_evaluated_after_failure() {
        let mut input = commits();
        input.push(RawCommit::new("4444444", "temp", ""));
        let summary = lint_range(&example_rules(), &input);
        assert_eq!(summary.reports.len(), 4);
        assert!(!summary.reports[3].passed);
    }

    #[tokio::test]
    async fn concurrent_matches_sequential() {
        let rules = example_rules();
        let mut input = Vec::new();
        for i in 0..25 {
            input.extend(commits().into_iter().map(|mut c| {
                c.hash = format!("{}-{i}", c.hash);
                c
            }));
        }

        let sequential = lint_range(&rules, &input);
        let concurrent = lint_range_concurrent(Arc::new(rules), input, 4)
            .await
            .unwrap();
        assert_eq!(sequential, concurrent);
    }

    #[tokio::test]
    async fn concurrent_empty_range() {
        let summary = lint_range_concurrent(Arc::new(example_rules()), vec![], 0)
            .await
            .unwrap();
        assert!(summary.passed);
        assert!(summary.reports.is_empty());
    }
}
