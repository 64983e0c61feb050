//! Key code search command.

use crate::cli::common::{CliError, CliResult};
use crate::keycode_db::{KeycodeDb, KeycodeDefinition};
use clap::Args;
use serde::Serialize;

/// List or search the key code vocabulary
#[derive(Debug, Clone, Args)]
pub struct KeycodesArgs {
    /// Search term (matches code, name and aliases)
    #[arg(short, long, value_name = "QUERY")]
    pub query: Option<String>,

    /// Restrict to a category id (e.g. "navigation")
    #[arg(long, value_name = "ID")]
    pub category: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct KeycodesResponse<'a> {
    count: usize,
    keycodes: Vec<&'a KeycodeDefinition>,
}

impl KeycodesArgs {
    /// Execute the keycodes command
    pub fn execute(&self) -> CliResult<()> {
        let keycode_db = KeycodeDb::load()
            .map_err(|e| CliError::io(format!("Failed to load keycode database: {e}")))?;

        let query = self.query.as_deref().unwrap_or("");
        let keycodes = match &self.category {
            Some(category) => {
                if keycode_db.get_category(category).is_none() {
                    let known: Vec<&str> =
                        keycode_db.categories().iter().map(|c| c.id.as_str()).collect();
                    return Err(CliError::validation(format!(
                        "Unknown category '{category}'. Known categories: {}",
                        known.join(", ")
                    )));
                }
                keycode_db.search_in_category(query, category)
            }
            None => keycode_db.search(query),
        };

        if self.json {
            let response = KeycodesResponse {
                count: keycodes.len(),
                keycodes,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        if keycodes.is_empty() {
            println!("No key codes match '{query}'");
            return Ok(());
        }

        let width = keycodes.iter().map(|k| k.code.len()).max().unwrap_or(0);
        for keycode in &keycodes {
            match &keycode.description {
                Some(description) => println!(
                    "{:<width$}  {:<12}  {}",
                    keycode.code, keycode.category, description
                ),
                None => println!("{:<width$}  {:<12}  {}", keycode.code, keycode.category, keycode.name),
            }
        }
        println!("\n{} key codes", keycodes.len());

        Ok(())
    }
}
