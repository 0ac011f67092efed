//! Rule set configuration: schema, file resolution and loading.
//!
//! The YAML document is deserialized into [`Config`] and then compiled into
//! immutable [`Rules`], which is the only form the lint engine accepts. All
//! setup problems (unreadable file, malformed YAML, bad regex, contradictory
//! bounds) surface here, before any commit is linted.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod rules;

pub use rules::{ForbiddenPhrase, Rules};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "lintcommit.yaml";

/// Environment variable that overrides the configuration path.
pub const CONFIG_ENV_VAR: &str = "LINTCOMMIT_CONFIG";

/// Setup errors. Any of these aborts the run before linting starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file exists at any searched location.
    #[error("No configuration file found (searched: {searched})")]
    NotFound {
        /// Comma-separated list of searched paths.
        searched: String,
    },

    /// A regex field failed to compile.
    #[error("Invalid regex in {field}: {source}")]
    InvalidPattern {
        /// Dotted name of the offending field.
        field: &'static str,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A minimum length exceeds a non-zero maximum length.
    #[error("{section}.min_length ({min}) is greater than {section}.max_length ({max})")]
    InvalidLengthBounds {
        /// Section name (`subject` or `body`).
        section: &'static str,
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Task references are required but no location can be checked.
    #[error(
        "task.required is set but no configured location has a pattern \
         (subject/body need task.pattern, branch needs task.branch_pattern)"
    )]
    TaskUncheckable,

    /// A forbidden word entry is empty or whitespace.
    #[error("forbidden.words contains a blank entry")]
    BlankForbiddenWord,
}

/// Complete rule set as written in the configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Rules for git branches.
    pub branch: BranchRules,
    /// Rules for commit types.
    #[serde(rename = "type")]
    pub commit_type: TypeRules,
    /// Rules for commit scopes.
    pub scope: ScopeRules,
    /// Rules for commit subjects.
    pub subject: SubjectRules,
    /// Rules for commit bodies.
    pub body: BodyRules,
    /// Rules for task references.
    pub task: TaskRules,
    /// Words and phrases that must not appear.
    pub forbidden: ForbiddenRules,
}

/// Rules for git branches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BranchRules {
    /// Name of the default branch commits are compared against.
    pub default: String,
}

/// Rules for commit types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypeRules {
    /// Allowed types. Empty allows any type.
    pub list: Vec<String>,
    /// Whether a type is required.
    pub required: bool,
}

/// Rules for commit scopes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScopeRules {
    /// Regex the whole scope must match. Empty means no constraint.
    pub pattern: String,
    /// Whether a scope is required.
    pub required: bool,
}

/// Rules for commit subjects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubjectRules {
    /// Minimum subject length in characters.
    pub min_length: usize,
    /// Maximum subject length in characters; 0 is unbounded.
    pub max_length: usize,
}

/// Rules for commit bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BodyRules {
    /// Commit types that must carry a body.
    pub required_for_types: Vec<String>,
    /// Minimum length of a non-empty body in characters.
    pub min_length: usize,
    /// Maximum body length in characters; 0 is unbounded.
    pub max_length: usize,
    /// Whether breaking changes must carry a body.
    pub required_for_breaking_change: bool,
    /// Whether a blank line must separate the header from the rest.
    pub require_blank_line: bool,
}

/// Rules for task references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskRules {
    /// Locations searched for a task reference.
    pub location: Vec<TaskLocation>,
    /// Regex for task IDs in the subject and body.
    pub pattern: String,
    /// Regex for task IDs in the branch name.
    pub branch_pattern: String,
    /// Whether a task reference is required.
    pub required: bool,
}

/// Words and phrases that must not appear in a commit message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForbiddenRules {
    /// Forbidden words or phrases, matched case-insensitively.
    pub words: Vec<String>,
}

/// Where a task reference may be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskLocation {
    /// Header subject text.
    Subject,
    /// Message body.
    Body,
    /// Branch name.
    Branch,
}

impl fmt::Display for TaskLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskLocation::Subject => write!(f, "subject"),
            TaskLocation::Body => write!(f, "body"),
            TaskLocation::Branch => write!(f, "branch"),
        }
    }
}

impl Config {
    /// Loads a configuration from a YAML file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());
        crate::data::read_yaml_file(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display()))
    }
}

/// Returns the ordered list of locations searched when no `--config` is given.
///
/// Priority:
/// 1. `$LINTCOMMIT_CONFIG`
/// 2. `./lintcommit.yaml`
/// 3. `$XDG_CONFIG_HOME/lintcommit/lintcommit.yaml`
/// 4. `$HOME/.lintcommit/lintcommit.yaml`
fn search_paths(
    env_path: Option<String>,
    xdg_dir: Option<PathBuf>,
    home_dir: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(env_path) = env_path.filter(|p| !p.is_empty()) {
        paths.push(PathBuf::from(env_path));
    }

    paths.push(PathBuf::from(DEFAULT_CONFIG_FILE));

    if let Some(xdg) = xdg_dir {
        paths.push(xdg.join("lintcommit").join(DEFAULT_CONFIG_FILE));
    }

    if let Some(home) = home_dir {
        paths.push(home.join(".lintcommit").join(DEFAULT_CONFIG_FILE));
    }

    paths
}

/// Returns `$XDG_CONFIG_HOME`, falling back to `$HOME/.config`.
fn xdg_config_home() -> Option<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => dirs::home_dir().map(|home| home.join(".config")),
    }
}

/// Resolves the configuration file to use.
///
/// An explicit path is returned as-is when it exists and is an error
/// otherwise; no fallback is attempted for an explicit choice.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let candidates = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => search_paths(
            std::env::var(CONFIG_ENV_VAR).ok(),
            xdg_config_home(),
            dirs::home_dir(),
        ),
    };

    if let Some(found) = candidates.iter().find(|p| p.is_file()) {
        return Ok(found.clone());
    }

    Err(ConfigError::NotFound {
        searched: candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Resolves, loads and compiles the rule set in one step.
///
/// Returns the path the configuration was read from alongside the rules.
pub fn load_rules(explicit: Option<&Path>) -> Result<(PathBuf, Rules)> {
    let path = resolve_config_path(explicit)?;
    let config = Config::load_from(&path)?;
    let rules = Rules::compile(config)
        .with_context(|| format!("Invalid rule set in {}", path.display()))?;
    Ok((path, rules))
}
