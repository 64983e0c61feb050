//! Shared CLI types: errors, exit codes and JSON response shapes.

use crate::generator::{ValidationErrorKind, ValidationReport, ValidationWarningKind};
use serde::Serialize;
use std::fmt;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input or generated document failed validation
    ValidationFailed = 1,
    /// File system or configuration failure
    IoError = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code.code())
    }
}

/// Error returned by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code the process should end with
    pub exit_code: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// File system or database failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Configuration failure (exit code 2).
    pub fn config(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::IoError,
            message: message.into(),
        }
    }

    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            exit_code: ExitCode::ValidationFailed,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result alias for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Pass/fail status of each validation check group.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationChecks {
    /// Key codes in triggers and outputs
    pub keycodes: String,
    /// Rule order
    pub ordering: String,
    /// Flag names and usage
    pub variables: String,
}

impl ValidationChecks {
    /// Every check passed.
    #[must_use]
    pub fn all_passed() -> Self {
        Self {
            keycodes: "passed".to_string(),
            ordering: "passed".to_string(),
            variables: "passed".to_string(),
        }
    }
}

/// One validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationMessage {
    /// `error` or `warning`
    pub severity: String,
    /// Human-readable message
    pub message: String,
    /// Index of the rule in the document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<usize>,
    /// Optional fix suggestion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// JSON shape of `validate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// No errors were found
    pub valid: bool,
    /// Number of rules in the checked document
    pub rules: usize,
    /// Errors then warnings
    pub errors: Vec<ValidationMessage>,
    /// Per-group status
    pub checks: ValidationChecks,
}

impl ValidationResponse {
    /// Converts a validator report into the CLI response.
    #[must_use]
    pub fn from_report(report: &ValidationReport, rules: usize) -> Self {
        let mut checks = ValidationChecks::all_passed();
        let mut messages = Vec::new();

        for error in &report.errors {
            let check = match error.kind {
                ValidationErrorKind::InvalidKeycode => &mut checks.keycodes,
                ValidationErrorKind::ShadowedRule => &mut checks.ordering,
                ValidationErrorKind::UnknownVariable
                | ValidationErrorKind::InvalidVariableName => &mut checks.variables,
            };
            *check = "failed".to_string();

            messages.push(ValidationMessage {
                severity: "error".to_string(),
                message: format!("{}: {}", error.kind, error.message),
                rule: error.rule,
                suggestion: error.suggestion.clone(),
            });
        }

        for warning in &report.warnings {
            let check = match warning.kind {
                ValidationWarningKind::UnreachableRule => &mut checks.ordering,
                ValidationWarningKind::FlagNeverCleared => &mut checks.variables,
            };
            if *check == "passed" {
                *check = "warning".to_string();
            }

            messages.push(ValidationMessage {
                severity: "warning".to_string(),
                message: warning.message.clone(),
                rule: None,
                suggestion: None,
            });
        }

        Self {
            valid: report.is_valid(),
            rules,
            errors: messages,
            checks,
        }
    }

    /// True when any warning was reported.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        self.errors.iter().any(|m| m.severity == "warning")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{ValidationError, ValidationWarning};

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::io("x").exit_code.code(), 2);
        assert_eq!(CliError::config("x").exit_code.code(), 2);
        assert_eq!(CliError::validation("x").exit_code.code(), 1);
        assert_eq!(ExitCode::Success.code(), 0);
    }

    #[test]
    fn test_response_from_report() {
        let mut report = ValidationReport::new();
        report.add_error(
            ValidationError::new(ValidationErrorKind::ShadowedRule, "hidden").with_rule(4),
        );
        report.add_warning(ValidationWarning::new(
            ValidationWarningKind::FlagNeverCleared,
            "Flag 'x' is set to 1 but never cleared",
        ));

        let response = ValidationResponse::from_report(&report, 10);
        assert!(!response.valid);
        assert_eq!(response.rules, 10);
        assert_eq!(response.checks.ordering, "failed");
        assert_eq!(response.checks.variables, "warning");
        assert_eq!(response.checks.keycodes, "passed");
        assert_eq!(response.errors[0].rule, Some(4));
        assert!(response.has_warnings());
    }

    #[test]
    fn test_warning_check_group_follows_kind() {
        let mut report = ValidationReport::new();
        report.add_warning(ValidationWarning::new(
            ValidationWarningKind::UnreachableRule,
            "Rule 7 duplicates rule 3",
        ));

        let response = ValidationResponse::from_report(&report, 8);
        assert!(response.valid);
        assert_eq!(response.checks.ordering, "warning");
        assert_eq!(response.checks.variables, "passed");
    }
}
