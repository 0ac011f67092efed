//! Task reference extraction.

use std::collections::BTreeSet;

use crate::config::{Rules, TaskLocation};

use super::message::ParsedMessage;

/// Outcome of searching the configured locations for a task reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskMatch {
    /// Locations that were actually tested, in configuration order.
    pub checked: Vec<TaskLocation>,
    /// Locations whose pattern matched.
    pub matched: BTreeSet<TaskLocation>,
}

impl TaskMatch {
    /// Whether at least one checked location matched.
    pub fn found(&self) -> bool {
        !self.matched.is_empty()
    }
}

/// Tests every configured location against its pattern.
///
/// Subject and body use `task.pattern`; the branch uses `task.branch_pattern`.
/// A location whose pattern is empty is not checked at all.
pub fn find_task(rules: &Rules, parsed: &ParsedMessage, branch: &str) -> TaskMatch {
    let mut result = TaskMatch::default();

    for location in rules.checkable_locations() {
        let Some(pattern) = rules.task_pattern_for(location) else {
            continue;
        };
        let text = match location {
            TaskLocation::Subject => parsed.subject.as_str(),
            TaskLocation::Body => parsed.body.as_str(),
            TaskLocation::Branch => branch,
        };

        result.checked.push(location);
        if pattern.is_match(text) {
            result.matched.insert(location);
        }
    }

    result
}
