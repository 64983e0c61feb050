//! Construction-time contract violations.

use thiserror::Error;

/// Reason a rule could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    /// Key identifier outside the vocabulary
    #[error("unknown key code '{key}' in {builder} rule")]
    UnknownKey {
        /// Builder that rejected the key
        builder: &'static str,
        /// Offending identifier
        key: String,
    },

    /// Rule would carry no action in any phase
    #[error("{builder} rule for '{trigger}' has no action in any phase")]
    EmptyRule {
        /// Builder that produced the rule
        builder: &'static str,
        /// Trigger description
        trigger: String,
    },

    /// Simultaneous trigger with fewer than two keys
    #[error("chord needs at least two keys, got {count}")]
    ChordTooShort {
        /// Number of keys given
        count: usize,
    },

    /// Chord listing the same key twice
    #[error("chord lists key '{key}' more than once")]
    DuplicateChordKey {
        /// Repeated key
        key: String,
    },

    /// `any` used where a concrete modifier is required
    #[error("modifier 'any' is only valid as an optional trigger modifier ({context})")]
    WildcardModifier {
        /// Where the wildcard appeared
        context: &'static str,
    },

    /// Activation policy that needs an entry output was given none
    #[error("{policy} entry '{key}' of layer '{layer}' has no output key")]
    MissingEntryOutput {
        /// Layer flag name
        layer: &'static str,
        /// Policy description
        policy: &'static str,
        /// Entry key
        key: &'static str,
    },
}

/// Result alias for rule construction.
pub type RuleResult<T> = Result<T, RuleError>;
