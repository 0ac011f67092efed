//! Conventional-commit message parsing.
//!
//! Parsing is total: any input yields a [`ParsedMessage`]. A header that does
//! not follow `type(scope)!: subject` leaves type and scope empty and keeps the
//! whole first line as the subject, so the rules can report what is missing.

use std::sync::LazyLock;

use regex::Regex;

/// Footer line: `Token: value` or `Token #value`.
#[allow(clippy::unwrap_used)] // Compile-time constant regex pattern
static FOOTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<token>BREAKING[ -]CHANGE|[A-Z][A-Za-z0-9-]*)(?:: | #)(?P<value>.*)$").unwrap()
});

/// A trailing `Token: value` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    /// Footer token, e.g. `Refs` or `BREAKING CHANGE`.
    pub token: String,
    /// Footer value; continuation lines are joined with newlines.
    pub value: String,
}

impl Footer {
    /// Whether this footer announces a breaking change.
    pub fn is_breaking_change(&self) -> bool {
        self.token == "BREAKING CHANGE" || self.token == "BREAKING-CHANGE"
    }
}

/// Structured view of a commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMessage {
    /// Type token; empty when the header is not conventional.
    pub commit_type: String,
    /// Scope without parentheses; empty when absent.
    pub scope: String,
    /// Set by a `!` in the header or a `BREAKING CHANGE` footer.
    pub breaking: bool,
    /// Header text after `type(scope)!: `, or the whole header line.
    pub subject: String,
    /// Text between the header and the first footer, without surrounding blank lines.
    pub body: String,
    /// Footers in message order.
    pub footers: Vec<Footer>,
    /// The line right after the header exists and is not blank.
    pub missing_blank_line: bool,
}

#[derive(Debug, Default)]
struct Header<'a> {
    commit_type: &'a str,
    scope: &'a str,
    breaking: bool,
    subject: &'a str,
}

impl ParsedMessage {
    /// Parses a raw commit message.
    pub fn parse(raw: &str) -> Self {
        let mut lines = raw.lines();
        let header_line = lines.next().unwrap_or("");
        let header = parse_header(header_line).unwrap_or(Header {
            subject: header_line,
            ..Header::default()
        });

        let rest: Vec<&str> = lines.collect();
        let missing_blank_line = rest.first().is_some_and(|l| !is_blank(l));
        let rest = if missing_blank_line {
            &rest[..]
        } else {
            rest.get(1..).unwrap_or(&[])
        };

        let footer_start = rest
            .iter()
            .position(|l| FOOTER_PATTERN.is_match(l))
            .unwrap_or(rest.len());
        let body = trim_blank_lines(&rest[..footer_start]).join("\n");
        let footers = parse_footers(&rest[footer_start..]);

        let breaking = header.breaking || footers.iter().any(Footer::is_breaking_change);

        Self {
            commit_type: header.commit_type.to_string(),
            scope: header.scope.to_string(),
            breaking,
            subject: header.subject.to_string(),
            body,
            footers,
            missing_blank_line,
        }
    }

    /// Whether the header followed the conventional grammar.
    pub fn is_conventional(&self) -> bool {
        !self.commit_type.is_empty()
    }
}

/// Parses `type(scope)!: subject`, returning `None` when the grammar is not met.
fn parse_header(line: &str) -> Option<Header<'_>> {
    let type_end = line
        .find(|c: char| !(c.is_alphanumeric() || c == '-'))
        .unwrap_or(line.len());
    if type_end == 0 {
        return None;
    }
    let (commit_type, mut rest) = line.split_at(type_end);

    let mut scope = "";
    if let Some(inner) = rest.strip_prefix('(') {
        let close = inner.find(')')?;
        scope = inner[..close].trim();
        rest = &inner[close + 1..];
    }

    let breaking = match rest.strip_prefix('!') {
        Some(after) => {
            rest = after;
            true
        }
        None => false,
    };

    let rest = rest.strip_prefix(':')?;
    let subject = if rest.is_empty() {
        rest
    } else {
        rest.strip_prefix(' ')?
    };

    Some(Header {
        commit_type,
        scope,
        breaking,
        subject,
    })
}

fn parse_footers(lines: &[&str]) -> Vec<Footer> {
    let mut footers: Vec<Footer> = Vec::new();

    for line in lines {
        if let Some(caps) = FOOTER_PATTERN.captures(line) {
            footers.push(Footer {
                token: caps["token"].to_string(),
                value: caps["value"].to_string(),
            });
        } else if let Some(last) = footers.last_mut() {
            last.value.push('\n');
            last.value.push_str(line);
        }
    }

    for footer in &mut footers {
        footer.value = footer.value.trim().to_string();
    }

    footers
}

fn trim_blank_lines<'a, 'b>(lines: &'b [&'a str]) -> &'b [&'a str] {
    let start = lines.iter().position(|l| !is_blank(l)).unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !is_blank(l))
        .map_or(start, |i| i + 1);
    &lines[start..end]
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
