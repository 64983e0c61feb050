//! Activation and exit rules derived from the layer registry.

use crate::layers::registry::{ActivationPolicy, LayerEntry, LayerId, LayerRegistry, LayerSpec};
use crate::models::{FlagValue, KeyEvent, Rule, Variable};
use crate::rules::{
    DoubleTapLatch, LatchOn, Momentary, RuleError, RuleFactory, RuleResult, SetFlags, TapHold,
    TapToggle,
};

/// Timing used by activation rules. Values are copied into each rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivationTiming {
    /// Window for the second tap of a double-tap latch
    pub double_tap_ms: u32,
    /// Tap window for dual-role keys, if any
    pub tap_timeout_ms: Option<u32>,
}

impl Default for ActivationTiming {
    fn default() -> Self {
        Self {
            double_tap_ms: crate::constants::DEFAULT_DOUBLE_TAP_MS,
            tap_timeout_ms: None,
        }
    }
}

/// Builds the rules that enter and leave layers.
#[derive(Debug, Clone, Copy)]
pub struct LayerActivator<'a> {
    factory: RuleFactory<'a>,
    registry: LayerRegistry,
    timing: ActivationTiming,
}

impl<'a> LayerActivator<'a> {
    /// Creates an activator.
    #[must_use]
    pub const fn new(
        factory: RuleFactory<'a>,
        registry: LayerRegistry,
        timing: ActivationTiming,
    ) -> Self {
        Self {
            factory,
            registry,
            timing,
        }
    }

    /// Rules for every entry key of `id`, following its activation policy.
    ///
    /// The caller places them in the layer that hosts the entry keys; guards
    /// come from that host layer's composition.
    pub fn enter(&self, id: LayerId) -> RuleResult<Vec<Rule>> {
        let spec = self.registry.get(id);
        let mut rules = Vec::new();

        for entry in spec.entries {
            match (spec.policy, entry.output) {
                (ActivationPolicy::HoldTap, Some(tap)) => {
                    rules.push(self.factory.tap_hold_duo(TapHold {
                        key: entry.key,
                        from_modifiers: Vec::new(),
                        tap,
                        tap_modifiers: Vec::new(),
                        activate: id.variable(),
                        also_deactivate: spec.companion_flags(),
                        on_release: spec.on_exit_actions(),
                        tap_timeout_ms: self.timing.tap_timeout_ms,
                    })?);
                }
                (ActivationPolicy::HoldTap, None) => {
                    rules.push(self.factory.layer_momentary(Momentary {
                        key: entry.key,
                        from_modifiers: Vec::new(),
                        activate: id.variable(),
                        also_deactivate: spec.companion_flags(),
                        on_release: spec.on_exit_actions(),
                    })?);
                }
                (ActivationPolicy::DoubleTapLatch, _) => {
                    rules.extend(self.factory.double_tap_latch(DoubleTapLatch {
                        key: entry.key,
                        activate: id.variable(),
                        also_deactivate: spec.companion_flags(),
                        on_release: spec.on_exit_actions(),
                        delay_ms: self.timing.double_tap_ms,
                    })?);
                }
                (ActivationPolicy::TapToggle, _) => {
                    rules.push(self.factory.toggle_on_tap(TapToggle {
                        key: entry.key,
                        held: KeyEvent::new(required_output(spec, entry)?),
                        set: id.variable(),
                    })?);
                }
                (ActivationPolicy::Latch, _) => {
                    rules.push(self.factory.layer_latch_on(LatchOn {
                        key: entry.key,
                        from_modifiers: Vec::new(),
                        activate: id.variable(),
                    })?);
                }
            }
        }

        Ok(rules)
    }

    /// Exit rules hosted inside `host`.
    pub fn exits(&self, host: LayerId) -> RuleResult<Vec<Rule>> {
        self.registry
            .get(host)
            .exits
            .iter()
            .map(|exit| {
                let target = self.registry.get(exit.target);
                self.factory.set_flags(SetFlags {
                    key: exit.key,
                    assignments: exit_assignments(target),
                    extra: target.on_exit_actions(),
                })
            })
            .collect()
    }
}

/// Output of an entry whose policy cannot work without one.
fn required_output(spec: &LayerSpec, entry: &LayerEntry) -> RuleResult<&'static str> {
    entry.output.ok_or(RuleError::MissingEntryOutput {
        layer: spec.id.flag_name(),
        policy: spec.policy.describe(),
        key: entry.key,
    })
}

/// The target's own flag, then its companions, all cleared.
fn exit_assignments(target: &LayerSpec) -> Vec<(Variable, FlagValue)> {
    std::iter::once(target.id.variable())
        .chain(target.companion_flags())
        .map(|flag| (flag, FlagValue::Off))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keycode_db::KeycodeDb;
    use crate::models::{Action, Modifier, StickyOp};

    fn with_activator<T>(f: impl FnOnce(LayerActivator<'_>) -> T) -> T {
        let db = KeycodeDb::load().unwrap();
        let activator = LayerActivator::new(
            RuleFactory::new(&db),
            LayerRegistry::builtin(),
            ActivationTiming::default(),
        );
        f(activator)
    }

    #[test]
    fn test_symbol_left_has_two_dual_role_entries() {
        let rules = with_activator(|a| a.enter(LayerId::SymbolLeft).unwrap());
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].from.key_codes(), vec!["open_bracket"]);
        assert_eq!(rules[1].from.key_codes(), vec!["delete_or_backspace"]);
        for rule in &rules {
            assert_eq!(rule.to, vec![Action::set_on("symbol-layer-left")]);
            assert_eq!(rule.to_after_key_up, vec![Action::set_off("symbol-layer-left")]);
        }
    }

    #[test]
    fn test_number_entry_clears_function_layer() {
        let rules = with_activator(|a| a.enter(LayerId::Number).unwrap());
        assert_eq!(
            rules[0].to_after_key_up,
            vec![
                Action::set_off("number-layer"),
                Action::set_off("function-layer")
            ]
        );
    }

    #[test]
    fn test_symbol_right_exit_releases_sticky_modifiers() {
        let rules = with_activator(|a| a.enter(LayerId::SymbolRight).unwrap());
        let release = &rules[0].to_after_key_up;
        assert_eq!(release[0], Action::set_off("symbol-layer-right"));
        assert!(release.contains(&Action::sticky(Modifier::LeftControl, StickyOp::Off)));
        assert_eq!(release.len(), 5);
    }

    #[test]
    fn test_navigation_entry_is_double_tap_pair() {
        let rules = with_activator(|a| a.enter(LayerId::Navigation).unwrap());
        assert_eq!(rules.len(), 2);
        assert!(rules[0].is_guarded());
        assert_eq!(
            rules[1].parameters.delayed_action_delay_ms,
            Some(crate::constants::DEFAULT_DOUBLE_TAP_MS)
        );
    }

    #[test]
    fn test_tap_toggle_entry_without_output_is_rejected() {
        const ENTRY: LayerEntry = LayerEntry {
            key: "spacebar",
            output: None,
        };
        let spec = LayerSpec {
            entries: &[ENTRY],
            ..*LayerRegistry::builtin().get(LayerId::VisualMode)
        };

        assert_eq!(
            required_output(&spec, &ENTRY),
            Err(RuleError::MissingEntryOutput {
                layer: "visual-mode-layer",
                policy: spec.policy.describe(),
                key: "spacebar",
            })
        );
    }

    #[test]
    fn test_visual_mode_entry_holds_left_shift() {
        let rules = with_activator(|a| a.enter(LayerId::VisualMode).unwrap());
        assert_eq!(rules[0].to, vec![Action::key("left_shift")]);
        assert_eq!(rules[0].to_if_alone, vec![Action::set_on("visual-mode-layer")]);
    }

    #[test]
    fn test_visual_mode_exits() {
        let rules = with_activator(|a| a.exits(LayerId::VisualMode).unwrap());
        assert_eq!(rules.len(), 2);
        assert_eq!(
            rules[0].to,
            vec![
                Action::set_off("navigation-layer"),
                Action::set_off("visual-mode-layer")
            ]
        );
        assert_eq!(rules[1].to, vec![Action::set_off("visual-mode-layer")]);
    }
}
