//! Rule evaluators, one per rule family.
//!
//! Each evaluator is a pure function of the rule set and one message. The
//! validator runs them in the order of [`EVALUATORS`], which fixes the order
//! of violations in every report.

use crate::config::Rules;
use crate::data::check::{Field, RuleId, Violation};

use super::message::ParsedMessage;
use super::task::find_task;

/// Everything an evaluator may look at for one commit.
#[derive(Debug, Clone, Copy)]
pub struct MessageContext<'a> {
    /// Raw message text, header to last footer.
    pub raw: &'a str,
    /// Parsed message.
    pub parsed: &'a ParsedMessage,
    /// Branch name; empty when not applicable.
    pub branch: &'a str,
}

/// Signature shared by all rule evaluators.
pub type Evaluator = fn(&Rules, &MessageContext<'_>) -> Vec<Violation>;

/// All evaluators in reporting order.
pub const EVALUATORS: [Evaluator; 6] = [
    check_type,
    check_scope,
    check_subject,
    check_body,
    check_task,
    check_forbidden,
];

/// Type presence and allow-list.
pub fn check_type(rules: &Rules, ctx: &MessageContext<'_>) -> Vec<Violation> {
    let cfg = &rules.config().commit_type;
    let commit_type = ctx.parsed.commit_type.as_str();
    let mut violations = Vec::new();

    if commit_type.is_empty() {
        if cfg.required {
            violations.push(Violation::new(
                RuleId::TypeMissing,
                Field::Type,
                "commit type is required (expected `type(scope): subject`)",
            ));
        }
    } else if !cfg.list.is_empty() && !cfg.list.iter().any(|t| t == commit_type) {
        violations.push(Violation::new(
            RuleId::TypeNotAllowed,
            Field::Type,
            format!(
                "type '{commit_type}' is not allowed (allowed: {})",
                cfg.list.join(", ")
            ),
        ));
    }

    violations
}

/// Scope presence and pattern.
pub fn check_scope(rules: &Rules, ctx: &MessageContext<'_>) -> Vec<Violation> {
    let cfg = &rules.config().scope;
    let scope = ctx.parsed.scope.as_str();
    let mut violations = Vec::new();

    if scope.is_empty() {
        if cfg.required {
            violations.push(Violation::new(
                RuleId::ScopeMissing,
                Field::Scope,
                "scope is required",
            ));
        }
    } else if let Some(pattern) = rules.scope_pattern() {
        if !pattern.is_match(scope) {
            violations.push(Violation::new(
                RuleId::ScopePatternMismatch,
                Field::Scope,
                format!("scope '{scope}' does not match pattern '{}'", cfg.pattern),
            ));
        }
    }

    violations
}

/// Subject length. An empty subject is always too short.
pub fn check_subject(rules: &Rules, ctx: &MessageContext<'_>) -> Vec<Violation> {
    let cfg = &rules.config().subject;
    let len = ctx.parsed.subject.trim().chars().count();
    let mut violations = Vec::new();

    if len == 0 {
        violations.push(Violation::new(
            RuleId::SubjectTooShort,
            Field::Subject,
            "subject is empty",
        ));
    } else if len < cfg.min_length {
        violations.push(Violation::new(
            RuleId::SubjectTooShort,
            Field::Subject,
            format!(
                "subject is {len} characters, minimum is {}",
                cfg.min_length
            ),
        ));
    }

    if cfg.max_length > 0 && len > cfg.max_length {
        violations.push(Violation::new(
            RuleId::SubjectTooLong,
            Field::Subject,
            format!(
                "subject is {len} characters, maximum is {}",
                cfg.max_length
            ),
        ));
    }

    violations
}

/// Body presence, length and separation from the header.
pub fn check_body(rules: &Rules, ctx: &MessageContext<'_>) -> Vec<Violation> {
    let cfg = &rules.config().body;
    let parsed = ctx.parsed;
    let body_len = parsed.body.trim().chars().count();
    let mut violations = Vec::new();

    if body_len == 0 {
        if !parsed.commit_type.is_empty()
            && cfg.required_for_types.iter().any(|t| *t == parsed.commit_type)
        {
            violations.push(Violation::new(
                RuleId::BodyRequired,
                Field::Body,
                format!("body is required for type '{}'", parsed.commit_type),
            ));
        }
        if cfg.required_for_breaking_change && parsed.breaking {
            violations.push(Violation::new(
                RuleId::BodyRequiredForBreakingChange,
                Field::Body,
                "body is required for breaking changes",
            ));
        }
    } else {
        if body_len < cfg.min_length {
            violations.push(Violation::new(
                RuleId::BodyTooShort,
                Field::Body,
                format!(
                    "body is {body_len} characters, minimum is {}",
                    cfg.min_length
                ),
            ));
        }
        if cfg.max_length > 0 && body_len > cfg.max_length {
            violations.push(Violation::new(
                RuleId::BodyTooLong,
                Field::Body,
                format!(
                    "body is {body_len} characters, maximum is {}",
                    cfg.max_length
                ),
            ));
        }
    }

    if cfg.require_blank_line && parsed.missing_blank_line {
        violations.push(Violation::new(
            RuleId::BodyMissingBlankLine,
            Field::Body,
            "header must be followed by a blank line",
        ));
    }

    violations
}

/// Required task reference.
pub fn check_task(rules: &Rules, ctx: &MessageContext<'_>) -> Vec<Violation> {
    if !rules.config().task.required {
        return Vec::new();
    }

    let task = find_task(rules, ctx.parsed, ctx.branch);
    if task.found() {
        return Vec::new();
    }

    let checked = task
        .checked
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    vec![Violation::new(
        RuleId::TaskNotFound,
        Field::Task,
        format!("no task reference found (checked: {checked})"),
    )]
}

/// Forbidden words and phrases, one violation per distinct phrase.
pub fn check_forbidden(rules: &Rules, ctx: &MessageContext<'_>) -> Vec<Violation> {
    rules
        .forbidden()
        .iter()
        .filter(|phrase| phrase.is_found_in(ctx.raw))
        .map(|phrase| {
            Violation::new(
                RuleId::ForbiddenWordFound,
                Field::Message,
                format!("forbidden phrase '{}' found", phrase.phrase()),
            )
        })
        .collect()
}
