//! Data models for rules, triggers, actions and the assembled document.
//!
//! Models are plain data with serde serialization matching the remapping
//! engine's format; they carry no generation logic.

pub mod document;
pub mod modifier;
pub mod rule;
pub mod variable;

// Re-export all model types
pub use document::Document;
pub use modifier::{Modifier, StickyOp};
pub use rule::{
    Action, Condition, ConditionKind, DelayedAction, FromModifiers, KeyEvent, KeyRef, Parameters,
    Phase, Rule, RuleKind, SimultaneousOptions, Trigger, TriggerEvent, VariableAssignment,
};
pub use variable::{FlagValue, Variable};
