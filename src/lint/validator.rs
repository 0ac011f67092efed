//! Single-commit validation.

use tracing::debug;

use crate::config::Rules;
use crate::data::check::LintReport;
use crate::data::commit::RawCommit;

use super::message::ParsedMessage;
use super::rules::{MessageContext, EVALUATORS};

/// Parses the commit message once and runs every evaluator in order.
pub fn validate(rules: &Rules, commit: &RawCommit) -> LintReport {
    let parsed = ParsedMessage::parse(&commit.message);
    let ctx = MessageContext {
        raw: &commit.message,
        parsed: &parsed,
        branch: &commit.branch,
    };

    let violations: Vec<_> = EVALUATORS
        .iter()
        .flat_map(|evaluate| evaluate(rules, &ctx))
        .collect();

    debug!(
        hash = %commit.hash,
        violations = violations.len(),
        "validated commit"
    );

    LintReport::new(&commit.hash, commit.header(), violations)
}
