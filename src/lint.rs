//! Commit message validation engine.
//!
//! [`message`] turns raw text into a [`ParsedMessage`], [`task`] looks for
//! task references, [`rules`] holds one evaluator per rule family,
//! [`validator`] runs them for a single commit and [`range`] aggregates
//! reports over a list of commits. Nothing here performs I/O.

pub mod message;
pub mod range;
pub mod rules;
pub mod task;
pub mod validator;

pub use message::{Footer, ParsedMessage};
pub use range::{lint_range, lint_range_concurrent};
pub use task::{find_task, TaskMatch};
pub use validator::validate;
