//! Static checks over an assembled document.
//!
//! The engine does not report ordering mistakes or dangling flags; it simply
//! never fires the affected rules. These checks catch such rules before the
//! document is written. They never modify the document.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::keycode_db::KeycodeDb;
use crate::models::{Action, Condition, Document, FlagValue};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::BTreeSet;

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// Problems that make rules misbehave in the engine
    pub errors: Vec<ValidationError>,
    /// Non-critical warnings
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Formats the report as a user-friendly error message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("❌ {} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("\n⚠️  {} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning));
            }
        }

        message
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Index of the offending rule in the document
    pub rule: Option<usize>,
    /// Human-readable error message
    pub message: String,
    /// Optional suggestion for fixing the error
    pub suggestion: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            rule: None,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Sets the rule context.
    #[must_use]
    pub const fn with_rule(mut self, index: usize) -> Self {
        self.rule = Some(index);
        self
    }

    /// Sets a suggestion for fixing the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = self.rule {
            write!(f, "[Rule {}] {}: {}", rule, self.kind, self.message)?;
        } else {
            write!(f, "{}: {}", self.kind, self.message)?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n    → {suggestion}")?;
        }

        Ok(())
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Key code outside the vocabulary
    InvalidKeycode,
    /// Guarded rule placed after an unconditional rule with the same trigger
    ShadowedRule,
    /// Condition on a flag that no rule ever assigns
    UnknownVariable,
    /// Flag name that is not kebab-case
    InvalidVariableName,
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKeycode => write!(f, "Invalid Keycode"),
            Self::ShadowedRule => write!(f, "Shadowed Rule"),
            Self::UnknownVariable => write!(f, "Unknown Variable"),
            Self::InvalidVariableName => write!(f, "Invalid Variable Name"),
        }
    }
}

/// Validation warning (non-blocking).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// Warning kind
    pub kind: ValidationWarningKind,
    /// Warning message
    pub message: String,
}

/// Types of validation warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationWarningKind {
    /// Later rule with the same trigger and guards as an earlier one
    UnreachableRule,
    /// Flag set to 1 by some rule and cleared by none
    FlagNeverCleared,
}

impl ValidationWarning {
    /// Creates a new validation warning
    pub fn new(kind: ValidationWarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Document validator.
pub struct DocumentValidator<'a> {
    document: &'a Document,
    keycode_db: &'a KeycodeDb,
}

impl<'a> DocumentValidator<'a> {
    /// Creates a new document validator.
    #[must_use]
    pub const fn new(document: &'a Document, keycode_db: &'a KeycodeDb) -> Self {
        Self {
            document,
            keycode_db,
        }
    }

    /// Validates the document.
    ///
    /// Checks:
    /// - All key codes are in the vocabulary
    /// - No guarded rule sits behind an unconditional rule with the same trigger
    /// - Every flag read by a condition is assigned somewhere
    /// - Flag names are kebab-case
    ///
    /// Warns about unreachable duplicates and flags that are set but never cleared.
    pub fn validate(&self) -> Result<ValidationReport> {
        let mut report = ValidationReport::new();

        self.validate_keycodes(&mut report);
        self.validate_ordering(&mut report);
        self.validate_variables(&mut report)?;

        Ok(report)
    }

    fn validate_keycodes(&self, report: &mut ValidationReport) {
        for (idx, rule) in self.document.manipulators.iter().enumerate() {
            let emitted = rule.actions().filter_map(|action| match action {
                Action::Key(event) => Some(event.key_code.as_str()),
                _ => None,
            });

            for keycode in rule.from.key_codes().into_iter().chain(emitted) {
                if self.keycode_db.is_valid(keycode) {
                    continue;
                }

                let suggestions = self.keycode_db.search(keycode);
                let suggestion_text = if suggestions.is_empty() {
                    "Check the key code list (`keycodes`) for valid codes".to_string()
                } else {
                    let similar: Vec<&str> = suggestions
                        .iter()
                        .take(3)
                        .map(|k| k.code.as_str())
                        .collect();
                    format!("Did you mean one of: {}", similar.join(", "))
                };

                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::InvalidKeycode,
                        format!("Invalid key code '{keycode}'"),
                    )
                    .with_rule(idx)
                    .with_suggestion(suggestion_text),
                );
            }
        }
    }

    fn validate_ordering(&self, report: &mut ValidationReport) {
        let rules = &self.document.manipulators;

        for (later_idx, later) in rules.iter().enumerate() {
            for (earlier_idx, earlier) in rules[..later_idx].iter().enumerate() {
                if earlier.from != later.from {
                    continue;
                }

                if !earlier.is_guarded() && later.is_guarded() {
                    report.add_error(
                        ValidationError::new(
                            ValidationErrorKind::ShadowedRule,
                            format!(
                                "'{}' guarded by {} never fires: rule {} matches the same trigger unconditionally",
                                later.from.describe(),
                                describe_guards(&later.conditions),
                                earlier_idx
                            ),
                        )
                        .with_rule(later_idx)
                        .with_suggestion("Move guarded layers before the base layer"),
                    );
                    break;
                }

                if same_guards(&earlier.conditions, &later.conditions) {
                    report.add_warning(ValidationWarning::new(
                        ValidationWarningKind::UnreachableRule,
                        format!(
                            "Rule {} ('{}') is unreachable: rule {} has the same trigger and guards",
                            later_idx,
                            later.from.describe(),
                            earlier_idx
                        ),
                    ));
                    break;
                }
            }
        }
    }

    fn validate_variables(&self, report: &mut ValidationReport) -> Result<()> {
        let name_regex =
            Regex::new(r"^[a-z][a-z0-9]*(-[a-z0-9]+)*$").context("Invalid flag name pattern")?;

        let mut set_on = BTreeSet::new();
        let mut set_off = BTreeSet::new();
        for rule in &self.document.manipulators {
            for assignment in rule.actions().filter_map(Action::assignment) {
                match assignment.value {
                    FlagValue::On => set_on.insert(assignment.name.name()),
                    FlagValue::Off => set_off.insert(assignment.name.name()),
                };
            }
        }

        let mut reported = BTreeSet::new();
        for (idx, rule) in self.document.manipulators.iter().enumerate() {
            for condition in &rule.conditions {
                let name = condition.name.name();
                if set_on.contains(name) || set_off.contains(name) || !reported.insert(name) {
                    continue;
                }
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::UnknownVariable,
                        format!("Condition on '{name}', which no rule ever sets"),
                    )
                    .with_rule(idx)
                    .with_suggestion("Check the flag name for typos"),
                );
            }
        }

        let all_names = self
            .document
            .manipulators
            .iter()
            .flat_map(|rule| rule.conditions.iter().map(|c| c.name.name()))
            .chain(set_on.iter().copied())
            .chain(set_off.iter().copied())
            .collect::<BTreeSet<_>>();
        for name in all_names {
            if !name_regex.is_match(name) {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::InvalidVariableName,
                        format!("Flag name '{name}' is not kebab-case"),
                    )
                    .with_suggestion("Use lowercase words joined by '-', e.g. 'number-layer'"),
                );
            }
        }

        for name in set_on.difference(&set_off) {
            report.add_warning(ValidationWarning::new(
                ValidationWarningKind::FlagNeverCleared,
                format!("Flag '{name}' is set to 1 but never cleared"),
            ));
        }

        Ok(())
    }
}

fn same_guards(a: &[Condition], b: &[Condition]) -> bool {
    a.len() == b.len() && a.iter().all(|c| b.contains(c))
}

fn describe_guards(conditions: &[Condition]) -> String {
    conditions
        .iter()
        .map(|c| format!("{}=={}", c.name, c.value.as_int()))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FromModifiers, Rule, Trigger};

    fn rule(key: &str, out: &str) -> Rule {
        let mut rule = Rule::new(Trigger::key(key, FromModifiers::any()));
        rule.to.push(Action::key(out));
        rule
    }

    fn guarded(key: &str, out: &str, flag: &str) -> Rule {
        let mut rule = rule(key, out);
        rule.push_condition(Condition::variable_if(flag, FlagValue::On));
        rule
    }

    fn momentary(key: &str, flag: &str) -> Rule {
        let mut rule = Rule::new(Trigger::key(key, FromModifiers::any()));
        rule.to.push(Action::set_on(flag));
        rule.to_after_key_up.push(Action::set_off(flag));
        rule
    }

    fn validate(rules: Vec<Rule>) -> ValidationReport {
        let db = KeycodeDb::load().unwrap();
        let document = Document::new("test", rules);
        DocumentValidator::new(&document, &db).validate().unwrap()
    }

    #[test]
    fn test_valid_document() {
        let report = validate(vec![
            guarded("q", "quote", "symbol-layer"),
            momentary("tab", "symbol-layer"),
            rule("q", "q"),
        ]);
        assert!(report.is_valid(), "{}", report.format_message());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_shadowed_rule() {
        let report = validate(vec![
            momentary("tab", "symbol-layer"),
            rule("q", "q"),
            guarded("q", "quote", "symbol-layer"),
        ]);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].kind, ValidationErrorKind::ShadowedRule);
        assert_eq!(report.errors[0].rule, Some(2));
    }

    #[test]
    fn test_unknown_variable() {
        let report = validate(vec![guarded("q", "quote", "symbol-layer")]);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ValidationErrorKind::UnknownVariable);
    }

    #[test]
    fn test_invalid_variable_name() {
        let report = validate(vec![momentary("tab", "Symbol_Layer")]);
        assert!(report
            .errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidVariableName));
    }

    #[test]
    fn test_invalid_keycode_suggests_alternatives() {
        let report = validate(vec![rule("q", "esc_key")]);
        let error = &report.errors[0];
        assert_eq!(error.kind, ValidationErrorKind::InvalidKeycode);
        assert!(error.suggestion.is_some());
    }

    #[test]
    fn test_duplicate_is_a_warning() {
        let report = validate(vec![rule("q", "q"), rule("q", "w")]);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, ValidationWarningKind::UnreachableRule);
        assert!(report.warnings[0].message.contains("unreachable"));
    }

    #[test]
    fn test_flag_never_cleared() {
        let mut latch = Rule::new(Trigger::key("h", FromModifiers::any()));
        latch.to.push(Action::set_on("function-layer"));
        let report = validate(vec![latch]);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].kind, ValidationWarningKind::FlagNeverCleared);
        assert_eq!(
            report.warnings[0].message,
            "Flag 'function-layer' is set to 1 but never cleared"
        );
    }

    #[test]
    fn test_format_message_numbers_entries() {
        let report = validate(vec![
            momentary("tab", "symbol-layer"),
            rule("q", "q"),
            guarded("q", "quote", "symbol-layer"),
        ]);
        let message = report.format_message();
        assert!(message.contains("1 validation errors"));
        assert!(message.contains("[Rule 2] Shadowed Rule"));
    }
}
