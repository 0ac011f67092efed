//! Lint result types for commit message validation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the rule that produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RuleId {
    /// A type is required but the header carries none.
    #[serde(rename = "type.missing")]
    TypeMissing,
    /// The type is not in the allow-list.
    #[serde(rename = "type.not_allowed")]
    TypeNotAllowed,
    /// A scope is required but the header carries none.
    #[serde(rename = "scope.missing")]
    ScopeMissing,
    /// The scope does not fully match the configured pattern.
    #[serde(rename = "scope.pattern_mismatch")]
    ScopePatternMismatch,
    /// The subject is shorter than the minimum (or empty).
    #[serde(rename = "subject.too_short")]
    SubjectTooShort,
    /// The subject is longer than the maximum.
    #[serde(rename = "subject.too_long")]
    SubjectTooLong,
    /// A body is required for this commit type.
    #[serde(rename = "body.required")]
    BodyRequired,
    /// A body is required because the commit is a breaking change.
    #[serde(rename = "body.required_for_breaking_change")]
    BodyRequiredForBreakingChange,
    /// The body is shorter than the minimum.
    #[serde(rename = "body.too_short")]
    BodyTooShort,
    /// The body is longer than the maximum.
    #[serde(rename = "body.too_long")]
    BodyTooLong,
    /// No blank line separates the header from what follows.
    #[serde(rename = "body.missing_blank_line")]
    BodyMissingBlankLine,
    /// No task reference was found in any checked location.
    #[serde(rename = "task.not_found")]
    TaskNotFound,
    /// A forbidden word or phrase appears in the message.
    #[serde(rename = "forbidden.word_found")]
    ForbiddenWordFound,
}

impl RuleId {
    /// Returns the dotted rule identifier, e.g. `subject.too_short`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RuleId::TypeMissing => "type.missing",
            RuleId::TypeNotAllowed => "type.not_allowed",
            RuleId::ScopeMissing => "scope.missing",
            RuleId::ScopePatternMismatch => "scope.pattern_mismatch",
            RuleId::SubjectTooShort => "subject.too_short",
            RuleId::SubjectTooLong => "subject.too_long",
            RuleId::BodyRequired => "body.required",
            RuleId::BodyRequiredForBreakingChange => "body.required_for_breaking_change",
            RuleId::BodyTooShort => "body.too_short",
            RuleId::BodyTooLong => "body.too_long",
            RuleId::BodyMissingBlankLine => "body.missing_blank_line",
            RuleId::TaskNotFound => "task.not_found",
            RuleId::ForbiddenWordFound => "forbidden.word_found",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Part of the commit a violation concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Conventional-commit type token.
    Type,
    /// Scope token.
    Scope,
    /// Header subject text.
    Subject,
    /// Message body.
    Body,
    /// Task reference locations (subject, body, branch).
    Task,
    /// The message as a whole.
    Message,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Type => "type",
            Field::Scope => "scope",
            Field::Subject => "subject",
            Field::Body => "body",
            Field::Task => "task",
            Field::Message => "message",
        };
        f.write_str(name)
    }
}

/// A single rule mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule that was violated.
    pub rule: RuleId,
    /// Field or location the violation concerns.
    pub field: Field,
    /// Human-readable explanation, naming the offending value where useful.
    pub detail: String,
}

impl Violation {
    /// Creates a violation.
    pub fn new(rule: RuleId, field: Field, detail: impl Into<String>) -> Self {
        Self {
            rule,
            field,
            detail: detail.into(),
        }
    }
}

/// Result of linting a single commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    /// Commit hash the report belongs to.
    pub hash: String,
    /// First line of the commit message, for display.
    pub header: String,
    /// Violations in evaluation order.
    pub violations: Vec<Violation>,
    /// Whether the commit passes all rules.
    pub passed: bool,
}

impl LintReport {
    /// Creates a report, deriving `passed` from the violation list.
    pub fn new(hash: impl Into<String>, header: impl Into<String>, violations: Vec<Violation>) -> Self {
        let passed = violations.is_empty();
        Self {
            hash: hash.into(),
            header: header.into(),
            violations,
            passed,
        }
    }

    /// Returns the rule identifiers of all violations, in report order.
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.violations.iter().map(|v| v.rule).collect()
    }
}

/// Aggregate counts over a linted range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeStats {
    /// Total number of commits linted.
    pub total_commits: usize,
    /// Number of commits without violations.
    pub passing_commits: usize,
    /// Number of commits with at least one violation.
    pub failing_commits: usize,
    /// Total number of violations across all commits.
    pub violation_count: usize,
    /// Violation count per rule.
    pub by_rule: BTreeMap<RuleId, usize>,
}

impl RangeStats {
    /// Computes statistics from a list of reports.
    pub fn from_reports(reports: &[LintReport]) -> Self {
        let total_commits = reports.len();
        let passing_commits = reports.iter().filter(|r| r.passed).count();

        let mut by_rule = BTreeMap::new();
        let mut violation_count = 0;
        for violation in reports.iter().flat_map(|r| &r.violations) {
            *by_rule.entry(violation.rule).or_insert(0) += 1;
            violation_count += 1;
        }

        Self {
            total_commits,
            passing_commits,
            failing_commits: total_commits - passing_commits,
            violation_count,
            by_rule,
        }
    }
}

/// Result of linting an ordered range of commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeSummary {
    /// One report per commit, in input order.
    pub reports: Vec<LintReport>,
    /// Aggregate statistics.
    pub stats: RangeStats,
    /// True iff every report passed.
    pub passed: bool,
}

impl RangeSummary {
    /// Creates a summary from reports, preserving their order.
    pub fn new(reports: Vec<LintReport>) -> Self {
        let stats = RangeStats::from_reports(&reports);
        let passed = reports.iter().all(|r| r.passed);
        Self {
            reports,
            stats,
            passed,
        }
    }

    /// Process exit code for this summary: 0 when everything passed, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        if self.passed {
            0
        } else {
            1
        }
    }
}

/// Output format for lint results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            _ => Err(()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}
