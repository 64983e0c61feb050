//! Whole-document properties of the built-in keymap.

mod fixtures;
use fixtures::*;

use lazykarabiner::generator::{to_json_pretty, DocumentValidator};
use lazykarabiner::keycode_db::KeycodeDb;
use lazykarabiner::keymap::{build_keymap, KeymapOptions};
use lazykarabiner::layers::{ActivationTiming, LayerId};
use lazykarabiner::models::{Action, FlagValue, KeyEvent, Modifier, Rule};

fn is_subset(smaller: &Rule, larger: &Rule) -> bool {
    smaller
        .conditions
        .iter()
        .all(|c| larger.conditions.contains(c))
}

#[test]
fn test_no_rule_is_shadowed_by_a_looser_earlier_rule() {
    let document = default_document();
    let rules = &document.manipulators;

    for (later_idx, later) in rules.iter().enumerate() {
        for (earlier_idx, earlier) in rules[..later_idx].iter().enumerate() {
            if earlier.from == later.from && is_subset(earlier, later) {
                panic!(
                    "rule {later_idx} ({}) can never fire: rule {earlier_idx} matches first",
                    later.from.describe()
                );
            }
        }
    }
}

#[test]
fn test_guarded_rules_precede_unconditional_rules_for_same_trigger() {
    let document = default_document();

    for (idx, rule) in document.manipulators.iter().enumerate() {
        if rule.is_guarded() {
            continue;
        }
        let later_guarded = document.manipulators[idx + 1..]
            .iter()
            .any(|other| other.is_guarded() && other.from == rule.from);
        assert!(
            !later_guarded,
            "unconditional rule for {} precedes a guarded one",
            rule.from.describe()
        );
    }
}

#[test]
fn test_generation_is_deterministic() {
    let first = to_json_pretty(&default_document()).unwrap();
    let second = to_json_pretty(&default_document()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_release_lists_clear_each_flag_once() {
    let document = default_document();

    for rule in &document.manipulators {
        let release = &rule.to_after_key_up;
        for (idx, action) in release.iter().enumerate() {
            assert!(
                !release[idx + 1..].contains(action),
                "duplicate release action in rule for {}",
                rule.from.describe()
            );
        }
    }
}

#[test]
fn test_every_trigger_allows_any_optional_modifier() {
    let document = default_document();
    assert!(document
        .manipulators
        .iter()
        .all(|r| r.from.modifiers.optional == [Modifier::Any]));
}

#[test]
fn test_base_letters_pass_through_unchanged() {
    let document = default_document();

    for key in ["q", "e", "a", "m"] {
        let idx = position_of(&document, key, &[]).unwrap_or_else(|| panic!("no base rule for {key}"));
        let rule = &document.manipulators[idx];
        assert!(!rule.is_guarded());
        assert_eq!(rule.to, vec![Action::key(key)]);
        assert!(rule.to_after_key_up.is_empty());
    }
}

#[test]
fn test_symbol_left_q_emits_quote_before_base_pass_through() {
    let document = default_document();

    let layer = position_of(&document, "q", &["symbol-layer-left"]).expect("symbol rule for q");
    let base = position_of(&document, "q", &[]).expect("base rule for q");
    assert!(layer < base);
    assert_eq!(document.manipulators[layer].to, vec![Action::key("quote")]);
}

#[test]
fn test_open_bracket_taps_backspace_and_holds_symbol_layer() {
    let document = default_document();
    let idx = position_of(&document, "open_bracket", &[]).expect("base rule for open_bracket");
    let rule = &document.manipulators[idx];

    assert_eq!(rule.to, vec![Action::set_on("symbol-layer-left")]);
    assert_eq!(rule.to_if_alone, vec![Action::key("delete_or_backspace")]);
    assert_eq!(rule.to_after_key_up, vec![Action::set_off("symbol-layer-left")]);
}

#[test]
fn test_shifted_open_bracket_is_overridden_first() {
    let document = default_document();
    let first = &document.manipulators[0];
    assert_eq!(first.from.key_codes(), ["open_bracket"]);
    assert_eq!(first.from.modifiers.mandatory, vec![Modifier::Shift]);
    assert_eq!(first.to, vec![Action::key("delete_forward")]);
}

#[test]
fn test_navigation_rules_require_visual_mode_off() {
    let document = default_document();
    let idx = position_of(&document, "h", &["navigation-layer"]).expect("navigation rule for h");
    let rule = &document.manipulators[idx];

    assert!(rule
        .conditions
        .iter()
        .any(|c| c.name.name() == "visual-mode-layer" && c.value == FlagValue::Off));
    assert_eq!(rule.to, vec![Action::key("left_arrow")]);
}

#[test]
fn test_visual_mode_and_navigation_never_match_together() {
    let document = default_document();
    let visual = position_of(&document, "h", &["navigation-layer", "visual-mode-layer"])
        .expect("visual rule for h");
    let navigation = position_of(&document, "h", &["navigation-layer"]).expect("navigation rule for h");

    // Precedence order puts navigation first; the visual-mode guard keeps them disjoint
    assert!(navigation < visual);
    let visual_off = |idx: usize| {
        document.manipulators[idx]
            .conditions
            .iter()
            .find(|c| c.name.name() == "visual-mode-layer")
            .map(|c| c.value)
    };
    assert_eq!(visual_off(navigation), Some(FlagValue::Off));
    assert_eq!(visual_off(visual), Some(FlagValue::On));
    assert_eq!(
        document.manipulators[visual].to,
        vec![Action::Key(
            KeyEvent::new("left_arrow").with_modifiers(vec![Modifier::LeftShift])
        )]
    );
}

#[test]
fn test_symbol_right_release_drops_sticky_modifiers() {
    let document = default_document();
    let idx = position_of(&document, "tab", &[]).expect("base rule for tab");
    let release = &document.manipulators[idx].to_after_key_up;

    assert_eq!(release[0], Action::set_off("symbol-layer-right"));
    assert_eq!(release.len(), 5);
}

#[test]
fn test_timing_reaches_the_phases_it_governs() {
    let keycodes = KeycodeDb::load().unwrap();
    let options = KeymapOptions {
        timing: ActivationTiming {
            double_tap_ms: 250,
            tap_timeout_ms: Some(180),
        },
        ..KeymapOptions::default()
    };
    let document = build_keymap(&keycodes, &options).unwrap();

    let arm = document
        .manipulators
        .iter()
        .find(|r| r.parameters.delayed_action_delay_ms.is_some())
        .expect("double-tap arm rule");
    assert_eq!(arm.parameters.delayed_action_delay_ms, Some(250));
    assert!(!arm.to_delayed_action.is_empty());

    let timed: Vec<&Rule> = document
        .manipulators
        .iter()
        .filter(|r| r.parameters.alone_timeout_ms.is_some())
        .collect();
    assert!(!timed.is_empty());
    for rule in &timed {
        assert_eq!(rule.parameters.alone_timeout_ms, Some(180));
        assert!(
            !rule.to_if_alone.is_empty(),
            "tap window set on {} without a tap action",
            rule.from.describe()
        );
    }
    let entry = position_of(&document, "caps_lock", &[]).expect("number layer entry");
    assert_eq!(document.manipulators[entry].parameters.alone_timeout_ms, Some(180));

    // Nothing fills to_if_held_down, so its threshold is never emitted
    assert!(document.manipulators.iter().all(|r| {
        r.parameters.held_down_threshold_ms.is_none() || !r.to_if_held_down.is_empty()
    }));
}

#[test]
fn test_built_keymap_passes_validation() {
    let keycodes = KeycodeDb::load().unwrap();
    let document = default_document();
    let report = DocumentValidator::new(&document, &keycodes).validate().unwrap();

    assert!(report.is_valid(), "{}", report.format_message());
    assert!(report.warnings.is_empty(), "{}", report.format_message());
}

#[test]
fn test_layer_precedence_matches_document_order() {
    let document = default_document();
    let first_guarded_by = |id: LayerId| {
        document
            .manipulators
            .iter()
            .position(|r| {
                r.conditions
                    .iter()
                    .any(|c| c.name.name() == id.flag_name() && c.value == FlagValue::On)
            })
            .unwrap_or(usize::MAX)
    };

    assert!(first_guarded_by(LayerId::SymbolLeft) < first_guarded_by(LayerId::SymbolRight));
    assert!(first_guarded_by(LayerId::Modifier) < first_guarded_by(LayerId::Number));
}
