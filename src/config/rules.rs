//! Compiled, immutable rule set.

use regex::Regex;

use super::{Config, ConfigError, TaskLocation};

/// A rule set whose patterns have been compiled and whose bounds are known to
/// be consistent. Built once per run and shared read-only across commits.
#[derive(Debug, Clone)]
pub struct Rules {
    config: Config,
    scope_pattern: Option<Regex>,
    task_pattern: Option<Regex>,
    branch_pattern: Option<Regex>,
    forbidden: Vec<ForbiddenPhrase>,
}

impl Rules {
    /// Validates and compiles a configuration.
    pub fn compile(config: Config) -> Result<Self, ConfigError> {
        // Full match for scopes; the user's own anchors stay harmless inside the group.
        let scope_pattern = compile_optional("scope.pattern", &config.scope.pattern, |p| {
            format!("^(?:{p})$")
        })?;
        let task_pattern = compile_optional("task.pattern", &config.task.pattern, str::to_string)?;
        let branch_pattern = compile_optional(
            "task.branch_pattern",
            &config.task.branch_pattern,
            str::to_string,
        )?;

        check_bounds("subject", config.subject.min_length, config.subject.max_length)?;
        check_bounds("body", config.body.min_length, config.body.max_length)?;

        let mut forbidden: Vec<ForbiddenPhrase> = Vec::new();
        for word in &config.forbidden.words {
            let phrase = ForbiddenPhrase::compile(word)?;
            if !forbidden.iter().any(|p| p.key == phrase.key) {
                forbidden.push(phrase);
            }
        }

        let rules = Self {
            config,
            scope_pattern,
            task_pattern,
            branch_pattern,
            forbidden,
        };

        if rules.config.task.required && rules.checkable_locations().next().is_none() {
            return Err(ConfigError::TaskUncheckable);
        }

        Ok(rules)
    }

    /// The configuration these rules were compiled from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Anchored scope pattern, if one is configured.
    pub fn scope_pattern(&self) -> Option<&Regex> {
        self.scope_pattern.as_ref()
    }

    /// Pattern tested against a task location, if one is configured for it.
    pub fn task_pattern_for(&self, location: TaskLocation) -> Option<&Regex> {
        match location {
            TaskLocation::Subject | TaskLocation::Body => self.task_pattern.as_ref(),
            TaskLocation::Branch => self.branch_pattern.as_ref(),
        }
    }

    /// Configured task locations that have a pattern, deduplicated, in configuration order.
    pub fn checkable_locations(&self) -> impl Iterator<Item = TaskLocation> + '_ {
        self.config
            .task
            .location
            .iter()
            .enumerate()
            .filter(|&(i, loc)| !self.config.task.location[..i].contains(loc))
            .map(|(_, loc)| *loc)
            .filter(|loc| self.task_pattern_for(*loc).is_some())
    }

    /// Forbidden phrases, deduplicated case-insensitively, in configuration order.
    pub fn forbidden(&self) -> &[ForbiddenPhrase] {
        &self.forbidden
    }
}

fn compile_optional(
    field: &'static str,
    pattern: &str,
    wrap: impl FnOnce(&str) -> String,
) -> Result<Option<Regex>, ConfigError> {
    if pattern.is_empty() {
        return Ok(None);
    }
    Regex::new(&wrap(pattern))
        .map(Some)
        .map_err(|source| ConfigError::InvalidPattern { field, source })
}

fn check_bounds(section: &'static str, min: usize, max: usize) -> Result<(), ConfigError> {
    if max != 0 && min > max {
        return Err(ConfigError::InvalidLengthBounds { section, min, max });
    }
    Ok(())
}

/// A forbidden word or phrase, matched case-insensitively on word boundaries.
#[derive(Debug, Clone)]
pub struct ForbiddenPhrase {
    phrase: String,
    key: String,
    regex: Regex,
}

impl ForbiddenPhrase {
    /// Compiles a phrase. Whitespace inside the phrase matches any whitespace run.
    pub fn compile(phrase: &str) -> Result<Self, ConfigError> {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if words.is_empty() {
            return Err(ConfigError::BlankForbiddenWord);
        }

        let body = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join(r"\s+");
        let regex = Regex::new(&format!("(?i){body}")).map_err(|source| {
            ConfigError::InvalidPattern {
                field: "forbidden.words",
                source,
            }
        })?;

        Ok(Self {
            phrase: phrase.trim().to_string(),
            key: words.join(" ").to_lowercase(),
            regex,
        })
    }

    /// The phrase as configured.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Whether the phrase occurs in `text` as a whole word or phrase.
    ///
    /// Candidates rejected at a word boundary may overlap a valid occurrence,
    /// so the search resumes one character past the rejected start.
    pub fn is_found_in(&self, text: &str) -> bool {
        let mut start = 0;
        while let Some(m) = self.regex.find_at(text, start) {
            let before = text[..m.start()].chars().next_back();
            let after = text[m.end()..].chars().next();
            if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
                return true;
            }
            match text[m.start()..].chars().next() {
                Some(c) => start = m.start() + c.len_utf8(),
                None => return false,
            }
        }
        false
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
