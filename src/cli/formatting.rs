//! Shared display formatting for lint reports.
//!
//! Pure functions so the text output can be tested without a terminal.

use crate::data::check::{LintReport, RangeStats, RangeSummary, Violation};

/// Truncates a commit hash to [`SHORT_HASH_LEN`](crate::git::SHORT_HASH_LEN) characters.
pub(crate) fn truncate_hash(hash: &str) -> &str {
    let len = crate::git::SHORT_HASH_LEN;
    match hash.char_indices().nth(len) {
        Some((idx, _)) => &hash[..idx],
        None => hash,
    }
}

/// Returns an emoji icon for a commit's pass status.
pub(crate) fn commit_icon(passed: bool) -> &'static str {
    if passed {
        "\u{2705}"
    } else {
        "\u{274c}"
    }
}

/// Formats a single commit line for text output.
pub(crate) fn format_commit_line(icon: &str, short_hash: &str, header: &str) -> String {
    format!("{icon} {short_hash} - \"{header}\"")
}

/// Formats one violation as an indented line.
pub(crate) fn format_violation_line(violation: &Violation) -> String {
    format!(
        "   {} [{}] {}",
        violation.rule, violation.field, violation.detail
    )
}

/// Formats the summary section of a range report.
pub(crate) fn format_summary_text(stats: &RangeStats) -> String {
    let mut output = format!(
        "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\
         Summary: {} commits checked\n\
         \x20 {} passed, {} with violations\n\
         \x20 {} violations",
        stats.total_commits, stats.passing_commits, stats.failing_commits, stats.violation_count,
    );
    for (rule, count) in &stats.by_rule {
        output.push_str(&format!("\n    {rule}: {count}"));
    }
    output
}

/// Renders one commit block: the commit line followed by its violations.
pub(crate) fn format_report_block(report: &LintReport) -> String {
    let mut lines = vec![format_commit_line(
        commit_icon(report.passed),
        truncate_hash(&report.hash),
        &report.header,
    )];
    lines.extend(report.violations.iter().map(format_violation_line));
    lines.join("\n")
}

/// Renders the full text report. Passing commits are listed only on request.
pub(crate) fn format_text_report(summary: &RangeSummary, show_passing: bool) -> String {
    let mut blocks: Vec<String> = summary
        .reports
        .iter()
        .filter(|r| !r.passed || show_passing)
        .map(format_report_block)
        .collect();
    blocks.push(format_summary_text(&summary.stats));
    blocks.join("\n\n")
}

/// Drops git comment lines and everything below the scissors line.
///
/// Mirrors git's default `strip` cleanup for messages read from a
/// `commit-msg` hook file, which still contain the editor template.
pub(crate) fn strip_git_comments(message: &str) -> String {
    message
        .lines()
        .take_while(|line| !is_scissors_line(line))
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

const SCISSORS_LINE: &str = "# ------------------------ >8 ------------------------";

fn is_scissors_line(line: &str) -> bool {
    line.trim_end() == SCISSORS_LINE
}
