//! The built-in keymap.
//!
//! Each submodule holds the tables for one group of layers. [`build_keymap`]
//! composes them with the registry guards and assembles the final document.

mod base;
mod navigation;
mod numbers;
mod symbols;
pub mod table;

use crate::config::Config;
use crate::constants::DEFAULT_TITLE;
use crate::generator::DocumentAssembler;
use crate::keycode_db::KeycodeDb;
use crate::layers::{ActivationTiming, LayerActivator, LayerComposer, LayerId, LayerRegistry};
use crate::models::{Document, Rule};
use crate::rules::{RuleFactory, RuleResult};
use anyhow::{Context, Result};
use tracing::info;

/// Inputs that vary between generation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeymapOptions {
    /// Document title
    pub title: String,
    /// Timing copied into activation rules
    pub timing: ActivationTiming,
}

impl Default for KeymapOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            timing: ActivationTiming::default(),
        }
    }
}

impl From<&Config> for KeymapOptions {
    fn from(config: &Config) -> Self {
        Self {
            title: config.output.title.clone(),
            timing: ActivationTiming {
                double_tap_ms: config.timing.double_tap_ms,
                tap_timeout_ms: config.timing.tap_timeout_ms,
            },
        }
    }
}

/// Builders shared by every table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tables<'a> {
    pub(crate) factory: RuleFactory<'a>,
    pub(crate) activator: LayerActivator<'a>,
}

/// Raw (unguarded) rules of one layer.
pub fn layer_rules(keycodes: &KeycodeDb, options: &KeymapOptions, id: LayerId) -> RuleResult<Vec<Rule>> {
    let tables = tables(keycodes, options);
    rules_for(&tables, id)
}

/// Builds the whole keymap document.
pub fn build_keymap(keycodes: &KeycodeDb, options: &KeymapOptions) -> Result<Document> {
    let registry = LayerRegistry::builtin();
    let composer = LayerComposer::new(registry);
    let tables = tables(keycodes, options);

    let mut assembler = DocumentAssembler::new();
    assembler.with_overrides(base::overrides(&tables).context("Failed to build shifted overrides")?);

    for id in LayerId::ALL {
        let rules = rules_for(&tables, id).with_context(|| format!("Failed to build layer '{id}'"))?;
        assembler.with_layer(composer.compose(id, rules));
    }

    assembler.with_base(base::base(&tables).context("Failed to build base layer")?);

    let document = assembler.assemble(&options.title);
    info!(title = %document.title, rules = document.len(), "keymap built");
    Ok(document)
}

fn tables<'a>(keycodes: &'a KeycodeDb, options: &KeymapOptions) -> Tables<'a> {
    let factory = RuleFactory::new(keycodes);
    Tables {
        factory,
        activator: LayerActivator::new(factory, LayerRegistry::builtin(), options.timing),
    }
}

fn rules_for(tables: &Tables<'_>, id: LayerId) -> RuleResult<Vec<Rule>> {
    match id {
        LayerId::SymbolLeft => symbols::left(tables),
        LayerId::SymbolRight => symbols::right(tables),
        LayerId::Navigation => navigation::navigation(tables),
        LayerId::VisualMode => navigation::visual_mode(tables),
        LayerId::Modifier => navigation::modifier(tables),
        LayerId::Number => numbers::number(tables),
        LayerId::Function => numbers::function(tables),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, Condition, FlagValue, KeyEvent, Modifier};

    fn keymap() -> Document {
        let db = KeycodeDb::load().unwrap();
        build_keymap(&db, &KeymapOptions::default()).unwrap()
    }

    fn find<'d>(doc: &'d Document, key: &str, guard: &str) -> &'d Rule {
        doc.manipulators
            .iter()
            .find(|r| {
                r.from.key_codes() == [key]
                    && r
                        .conditions
                        .iter()
                        .any(|c| c.name.name() == guard && c.value == FlagValue::On)
            })
            .unwrap_or_else(|| panic!("no rule for {key} guarded by {guard}"))
    }

    #[test]
    fn test_default_title() {
        assert_eq!(keymap().title, "Werner's keymap");
    }

    #[test]
    fn test_symbol_left_q_sends_quote() {
        let doc = keymap();
        let rule = find(&doc, "q", "symbol-layer-left");
        assert_eq!(
            rule.conditions,
            vec![Condition::variable_if("symbol-layer-left", FlagValue::On)]
        );
        assert_eq!(rule.to, vec![Action::key("quote")]);
    }

    #[test]
    fn test_visual_mode_shifts_arrows() {
        let doc = keymap();
        let rule = find(&doc, "h", "visual-mode-layer");
        assert_eq!(rule.conditions.len(), 2);
        assert_eq!(
            rule.to,
            vec![Action::Key(
                KeyEvent::new("left_arrow").with_modifiers(vec![Modifier::LeftShift])
            )]
        );
    }

    #[test]
    fn test_function_latch_is_guarded_by_number_layer() {
        let doc = keymap();
        let rule = find(&doc, "h", "number-layer");
        assert_eq!(rule.to, vec![Action::set_on("function-layer")]);
        assert_eq!(
            rule.conditions,
            vec![
                Condition::variable_if("number-layer", FlagValue::On),
                Condition::variable_if("function-layer", FlagValue::Off),
            ]
        );
    }

    #[test]
    fn test_layer_rules_are_unguarded() {
        let db = KeycodeDb::load().unwrap();
        let rules = layer_rules(&db, &KeymapOptions::default(), LayerId::Function).unwrap();
        assert!(rules.iter().all(|r| !r.is_guarded()));
    }

    #[test]
    fn test_options_from_config() {
        let mut config = Config::default();
        config.output.title = "Custom".to_string();
        config.timing.double_tap_ms = 300;
        config.timing.tap_timeout_ms = Some(200);

        let options = KeymapOptions::from(&config);
        assert_eq!(options.title, "Custom");
        assert_eq!(options.timing.double_tap_ms, 300);
        assert_eq!(options.timing.tap_timeout_ms, Some(200));
    }
}
