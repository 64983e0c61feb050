//! Validation command for the generated document.

use crate::cli::common::{CliError, CliResult, ValidationResponse};
use crate::cli::generate::load_config;
use crate::generator::DocumentValidator;
use crate::keycode_db::KeycodeDb;
use crate::keymap::{build_keymap, KeymapOptions};
use clap::Args;
use std::path::PathBuf;

/// Build the keymap and check it for ordering and flag mistakes
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config(self.config.as_deref())?;

        let keycode_db = KeycodeDb::load()
            .map_err(|e| CliError::io(format!("Failed to load keycode database: {e}")))?;

        let document = build_keymap(&keycode_db, &KeymapOptions::from(&config))
            .map_err(|e| CliError::validation(format!("Failed to build keymap: {e:#}")))?;

        let report = DocumentValidator::new(&document, &keycode_db)
            .validate()
            .map_err(|e| CliError::io(format!("Validation failed: {e}")))?;

        let response = ValidationResponse::from_report(&report, document.len());

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            if response.valid {
                println!("✓ Validation passed ({} rules)", response.rules);
            } else {
                println!("✗ Validation failed ({} rules)", response.rules);
            }

            println!("\nChecks:");
            println!("  Keycodes:  {}", response.checks.keycodes);
            println!("  Ordering:  {}", response.checks.ordering);
            println!("  Variables: {}", response.checks.variables);

            if !response.errors.is_empty() {
                println!("\nIssues:");
                for msg in &response.errors {
                    let prefix = if msg.severity == "error" {
                        "  ✗"
                    } else {
                        "  ⚠"
                    };
                    match msg.rule {
                        Some(rule) => println!("{prefix} [Rule {rule}] {}", msg.message),
                        None => println!("{prefix} {}", msg.message),
                    }
                    if let Some(suggestion) = &msg.suggestion {
                        println!("      → {suggestion}");
                    }
                }
            }
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && response.has_warnings() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}
