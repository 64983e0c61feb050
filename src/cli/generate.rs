//! Generate command for the keymap document.

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::generator::{self, DocumentValidator};
use crate::keycode_db::KeycodeDb;
use crate::keymap::{build_keymap, KeymapOptions};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Generate the complex-modification JSON document
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Output file (defaults to the configured path, else stdout)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Document title (overrides the configured title)
    #[arg(short, long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Validate the document before writing it; refuse to write on errors
    #[arg(long)]
    pub check: bool,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config(self.config.as_deref())?;

        let mut options = KeymapOptions::from(&config);
        if let Some(title) = &self.title {
            options.title.clone_from(title);
        }

        let keycode_db = KeycodeDb::load()
            .map_err(|e| CliError::io(format!("Failed to load keycode database: {e}")))?;

        let document = build_keymap(&keycode_db, &options)
            .map_err(|e| CliError::validation(format!("Failed to build keymap: {e:#}")))?;

        if self.check {
            let report = DocumentValidator::new(&document, &keycode_db)
                .validate()
                .map_err(|e| CliError::io(format!("Validation failed: {e}")))?;

            if !report.is_valid() {
                return Err(CliError::validation(format!(
                    "Document validation failed:\n{}",
                    report.format_message()
                )));
            }
            for warning in &report.warnings {
                warn!("{warning}");
            }
        }

        match self.out.as_ref().or(config.output.path.as_ref()) {
            Some(path) => {
                generator::write_file(&document, path)
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
                eprintln!("✓ Wrote {} rules to {}", document.len(), path.display());
            }
            None => {
                info!(rules = document.len(), "writing document to stdout");
                generator::write_to(&document, std::io::stdout().lock())
                    .map_err(|e| CliError::io(format!("{e:#}")))?;
            }
        }

        Ok(())
    }
}

/// Loads `path` when given, else the default config file.
pub(crate) fn load_config(path: Option<&Path>) -> CliResult<Config> {
    let result = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    result.map_err(|e| CliError::config(format!("Failed to load config: {e:#}")))
}
