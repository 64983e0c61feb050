//! Layer registry listing.

use crate::cli::common::{CliError, CliResult};
use crate::keycode_db::KeycodeDb;
use crate::keymap::{layer_rules, KeymapOptions};
use crate::layers::{LayerComposer, LayerEntry, LayerExit, LayerId, LayerRegistry};
use crate::models::Modifier;
use clap::Args;
use serde::Serialize;

/// List layers with their activation policy and guards
#[derive(Debug, Clone, Args)]
pub struct LayersArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct LayerInfo {
    id: LayerId,
    flag: &'static str,
    policy: &'static str,
    entries: &'static [LayerEntry],
    exits: &'static [LayerExit],
    guards: Vec<String>,
    clears: Vec<&'static str>,
    release_sticky: &'static [Modifier],
    rules: usize,
}

impl LayersArgs {
    /// Execute the layers command
    pub fn execute(&self) -> CliResult<()> {
        let keycode_db = KeycodeDb::load()
            .map_err(|e| CliError::io(format!("Failed to load keycode database: {e}")))?;
        let registry = LayerRegistry::builtin();
        let composer = LayerComposer::new(registry);
        let options = KeymapOptions::default();

        let mut layers = Vec::new();
        for spec in registry.specs() {
            let rules = layer_rules(&keycode_db, &options, spec.id)
                .map_err(|e| CliError::validation(format!("Failed to build layer '{}': {e}", spec.id)))?;

            layers.push(LayerInfo {
                id: spec.id,
                flag: spec.id.flag_name(),
                policy: spec.policy.describe(),
                entries: spec.entries,
                exits: spec.exits,
                guards: composer
                    .guards(spec.id)
                    .iter()
                    .map(|c| format!("{} == {}", c.name, c.value.as_int()))
                    .collect(),
                clears: spec.clears.iter().map(|id| id.flag_name()).collect(),
                release_sticky: spec.release_sticky,
                rules: rules.len(),
            });
        }

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&layers)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        println!("Layers (precedence order):\n");
        for layer in &layers {
            println!("{} ({} rules)", layer.flag, layer.rules);
            println!("  Policy:  {}", layer.policy);
            let entries: Vec<String> = layer
                .entries
                .iter()
                .map(|e| match e.output {
                    Some(output) => format!("{} ({output})", e.key),
                    None => e.key.to_string(),
                })
                .collect();
            println!("  Entry:   {}", entries.join(", "));
            println!("  Guards:  {}", layer.guards.join(", "));
            if !layer.exits.is_empty() {
                let exits: Vec<String> = layer
                    .exits
                    .iter()
                    .map(|e| format!("{} leaves {}", e.key, e.target))
                    .collect();
                println!("  Exits:   {}", exits.join(", "));
            }
            if !layer.clears.is_empty() {
                println!("  Clears:  {}", layer.clears.join(", "));
            }
            if !layer.release_sticky.is_empty() {
                let mods: Vec<&str> = layer.release_sticky.iter().map(|m| m.as_str()).collect();
                println!("  Release: {}", mods.join(", "));
            }
            println!();
        }

        Ok(())
    }
}
