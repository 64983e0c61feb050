//! Final document handed to the emitter.

use crate::models::rule::Rule;
use serde::Serialize;

/// Title plus the ordered rule list.
///
/// Order is significant: the engine applies the first rule whose trigger and
/// guards match, so guarded rules must come before unconditional ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Human-readable title shown by the engine
    pub title: String,
    /// Rules in evaluation order
    pub manipulators: Vec<Rule>,
}

impl Document {
    /// Wraps an ordered rule list with a title.
    pub fn new(title: impl Into<String>, manipulators: Vec<Rule>) -> Self {
        Self {
            title: title.into(),
            manipulators,
        }
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.manipulators.len()
    }

    /// True when there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.manipulators.is_empty()
    }
}
