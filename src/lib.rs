//! # lintcommit
//!
//! Validates git commit messages and branch names against a declarative rule
//! set: conventional-commit type, scope pattern, subject and body length,
//! mandatory task references, forbidden words and breaking-change bodies.
//!
//! ## Quick Start
//!
//! ```rust
//! use lintcommit::config::{Config, Rules};
//! use lintcommit::data::RawCommit;
//!
//! let config: Config = lintcommit::data::from_yaml("type:\n  required: true\n").unwrap();
//! let rules = Rules::compile(config).unwrap();
//!
//! let report = lintcommit::lint::validate(&rules, &RawCommit::new("abc123", "wip", ""));
//! assert!(!report.passed);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod data;
pub mod git;
pub mod lint;

pub use crate::cli::Cli;

/// The current version of lintcommit.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
