//! Rule builders.
//!
//! Each builder takes a small argument struct and returns one fully expanded
//! [`Rule`], filling only the phases that rule shape needs. Key identifiers are
//! checked against the vocabulary and a rule without any action is refused, so a
//! degenerate rule never reaches the document.

use crate::keycode_db::KeycodeDb;
use crate::models::{
    Action, Condition, FlagValue, FromModifiers, KeyEvent, Modifier, Rule, StickyOp, Trigger,
    Variable,
};
use crate::rules::error::{RuleError, RuleResult};

/// Pass-through: the key sends itself, optionally with extra modifiers.
#[derive(Debug, Clone, Default)]
pub struct PassThrough<'k> {
    /// Physical key, also emitted
    pub key: &'k str,
    /// Modifiers attached to the emitted key
    pub to_modifiers: Vec<Modifier>,
}

/// Plain remap of one key (optionally modifier-qualified) to another.
#[derive(Debug, Clone, Default)]
pub struct Remap<'k> {
    /// Physical key
    pub from: &'k str,
    /// Modifiers that must be held on the physical key
    pub from_modifiers: Vec<Modifier>,
    /// Emitted key
    pub to: &'k str,
    /// Modifiers attached to the emitted key
    pub to_modifiers: Vec<Modifier>,
}

/// Layer active exactly while the key is held.
#[derive(Debug, Clone)]
pub struct Momentary<'k> {
    /// Physical key
    pub key: &'k str,
    /// Modifiers that must be held on the physical key
    pub from_modifiers: Vec<Modifier>,
    /// Flag set on key down, cleared on release
    pub activate: Variable,
    /// Companion flags also cleared on release
    pub also_deactivate: Vec<Variable>,
    /// Extra release actions (sticky cleanup)
    pub on_release: Vec<Action>,
}

/// Sets a flag on key down and never clears it.
#[derive(Debug, Clone)]
pub struct LatchOn<'k> {
    /// Physical key
    pub key: &'k str,
    /// Modifiers that must be held on the physical key
    pub from_modifiers: Vec<Modifier>,
    /// Flag to set
    pub activate: Variable,
}

/// Dual-role key: tap emits a key, hold activates a layer.
#[derive(Debug, Clone)]
pub struct TapHold<'k> {
    /// Physical key
    pub key: &'k str,
    /// Modifiers that must be held on the physical key
    pub from_modifiers: Vec<Modifier>,
    /// Key emitted on a lone tap
    pub tap: &'k str,
    /// Modifiers attached to the tap output
    pub tap_modifiers: Vec<Modifier>,
    /// Flag live while held
    pub activate: Variable,
    /// Companion flags cleared on release
    pub also_deactivate: Vec<Variable>,
    /// Extra release actions (sticky cleanup)
    pub on_release: Vec<Action>,
    /// Rule-local tap window; a longer press no longer sends `tap`
    pub tap_timeout_ms: Option<u32>,
}

/// Toggles a sticky modifier.
#[derive(Debug, Clone)]
pub struct StickyToggle<'k> {
    /// Physical key
    pub key: &'k str,
    /// Modifiers that must be held on the physical key
    pub from_modifiers: Vec<Modifier>,
    /// Modifier to toggle
    pub modifier: Modifier,
}

/// Suppresses a key entirely.
#[derive(Debug, Clone, Default)]
pub struct Block<'k> {
    /// Physical key
    pub key: &'k str,
    /// Modifiers that must be held on the physical key
    pub from_modifiers: Vec<Modifier>,
}

/// Strictly ordered simultaneous chord.
#[derive(Debug, Clone, Default)]
pub struct Chord<'k> {
    /// Chord members, in press order
    pub keys: Vec<&'k str>,
    /// Key events emitted on chord down
    pub outputs: Vec<KeyEvent>,
    /// Flag held for the chord's duration
    pub activate: Option<Variable>,
}

/// Momentary layer that latches when the key is tapped twice in quick succession.
#[derive(Debug, Clone)]
pub struct DoubleTapLatch<'k> {
    /// Physical key
    pub key: &'k str,
    /// Layer flag
    pub activate: Variable,
    /// Companion flags cleared on release
    pub also_deactivate: Vec<Variable>,
    /// Extra release actions (sticky cleanup)
    pub on_release: Vec<Action>,
    /// Window for the second tap
    pub delay_ms: u32,
}

/// Key that emits `held` while down and sets a flag when tapped alone.
#[derive(Debug, Clone)]
pub struct TapToggle<'k> {
    /// Physical key
    pub key: &'k str,
    /// Key event sent while the key is down
    pub held: KeyEvent,
    /// Flag set on a lone tap
    pub set: Variable,
}

/// Key that assigns several flags at once.
#[derive(Debug, Clone, Default)]
pub struct SetFlags<'k> {
    /// Physical key
    pub key: &'k str,
    /// Assignments in emission order
    pub assignments: Vec<(Variable, FlagValue)>,
    /// Actions emitted after the assignments
    pub extra: Vec<Action>,
}

/// Rule constructor bound to a key vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct RuleFactory<'a> {
    keycodes: &'a KeycodeDb,
}

impl<'a> RuleFactory<'a> {
    /// Creates a factory that validates keys against `keycodes`.
    #[must_use]
    pub const fn new(keycodes: &'a KeycodeDb) -> Self {
        Self { keycodes }
    }

    /// Key sends itself with optional output modifiers.
    pub fn simple_pass_through(&self, args: PassThrough<'_>) -> RuleResult<Rule> {
        self.remap(Remap {
            from: args.key,
            from_modifiers: Vec::new(),
            to: args.key,
            to_modifiers: args.to_modifiers,
        })
    }

    /// `from` (with mandatory modifiers if given) sends `to` + `to_modifiers`.
    pub fn remap(&self, args: Remap<'_>) -> RuleResult<Rule> {
        const BUILDER: &str = "remap";
        self.check_key(BUILDER, args.from)?;
        self.check_key(BUILDER, args.to)?;
        check_concrete(&args.to_modifiers, "output modifiers")?;

        let mut rule = Rule::new(self.trigger(BUILDER, args.from, args.from_modifiers)?);
        rule.to
            .push(Action::Key(KeyEvent::new(args.to).with_modifiers(args.to_modifiers)));
        finish(BUILDER, rule)
    }

    /// Layer flag on while held; release clears it and its companions.
    pub fn layer_momentary(&self, args: Momentary<'_>) -> RuleResult<Rule> {
        const BUILDER: &str = "momentary layer";
        let mut rule = Rule::new(self.trigger(BUILDER, args.key, args.from_modifiers)?);
        rule.to.push(Action::set_on(args.activate.clone()));
        rule.to_after_key_up = release_actions(&args.activate, &args.also_deactivate, args.on_release);
        finish(BUILDER, rule)
    }

    /// Layer flag on; clearing is left to another rule.
    pub fn layer_latch_on(&self, args: LatchOn<'_>) -> RuleResult<Rule> {
        const BUILDER: &str = "latch";
        let mut rule = Rule::new(self.trigger(BUILDER, args.key, args.from_modifiers)?);
        rule.to.push(Action::set_on(args.activate));
        finish(BUILDER, rule)
    }

    /// Tap emits `tap`; holding keeps `activate` live until release.
    ///
    /// The engine decides: a release with no other key event in between fires
    /// `to_if_alone` only; any intervening key makes the hold path win.
    pub fn tap_hold_duo(&self, args: TapHold<'_>) -> RuleResult<Rule> {
        const BUILDER: &str = "tap/hold";
        self.check_key(BUILDER, args.tap)?;
        check_concrete(&args.tap_modifiers, "tap modifiers")?;

        let mut rule = Rule::new(self.trigger(BUILDER, args.key, args.from_modifiers)?);
        rule.to_if_alone
            .push(Action::Key(KeyEvent::new(args.tap).with_modifiers(args.tap_modifiers)));
        rule.to.push(Action::set_on(args.activate.clone()));
        rule.to_after_key_up = release_actions(&args.activate, &args.also_deactivate, args.on_release);
        rule.parameters.alone_timeout_ms = args.tap_timeout_ms;
        finish(BUILDER, rule)
    }

    /// Toggles a sticky modifier.
    pub fn sticky_modifier_toggle(&self, args: StickyToggle<'_>) -> RuleResult<Rule> {
        const BUILDER: &str = "sticky modifier";
        check_concrete(&[args.modifier], "sticky modifier")?;

        let mut rule = Rule::new(self.trigger(BUILDER, args.key, args.from_modifiers)?);
        rule.to.push(Action::sticky(args.modifier, StickyOp::Toggle));
        finish(BUILDER, rule)
    }

    /// Suppresses the key by sending `vk_none`.
    pub fn block_key(&self, args: Block<'_>) -> RuleResult<Rule> {
        const BUILDER: &str = "block";
        let mut rule = Rule::new(self.trigger(BUILDER, args.key, args.from_modifiers)?);
        rule.to.push(Action::key("vk_none"));
        finish(BUILDER, rule)
    }

    /// All-or-nothing chord; the optional flag lives for the chord's duration.
    pub fn simultaneous_chord(&self, args: Chord<'_>) -> RuleResult<Rule> {
        const BUILDER: &str = "chord";
        if args.keys.len() < 2 {
            return Err(RuleError::ChordTooShort {
                count: args.keys.len(),
            });
        }
        for (idx, key) in args.keys.iter().enumerate() {
            self.check_key(BUILDER, key)?;
            if args.keys[..idx].contains(key) {
                return Err(RuleError::DuplicateChordKey {
                    key: (*key).to_string(),
                });
            }
        }
        for output in &args.outputs {
            self.check_key(BUILDER, &output.key_code)?;
            check_concrete(&output.modifiers, "output modifiers")?;
        }

        let mut rule = Rule::new(Trigger::chord(args.keys.iter().copied()));
        if let Some(flag) = &args.activate {
            rule.to.push(Action::set_on(flag.clone()));
            rule.to_after_key_up.push(Action::set_off(flag.clone()));
        }
        rule.to.extend(args.outputs.into_iter().map(Action::Key));
        finish(BUILDER, rule)
    }

    /// Two rules implementing "hold for momentary, double-tap to latch".
    ///
    /// The first rule only matches while the companion toggle flag is armed and
    /// latches the layer (no release handler). The second activates the layer
    /// momentarily and arms the toggle flag, which the delayed action disarms
    /// whether or not another key interrupts. Order matters: the latch rule must
    /// be evaluated first.
    pub fn double_tap_latch(&self, args: DoubleTapLatch<'_>) -> RuleResult<[Rule; 2]> {
        const BUILDER: &str = "double-tap latch";
        let toggle = args.activate.toggle_companion();

        let mut latch = Rule::new(self.trigger(BUILDER, args.key, Vec::new())?);
        latch.to.push(Action::set_on(args.activate.clone()));
        latch.push_condition(Condition::variable_if(toggle.clone(), FlagValue::On));

        let mut arm = Rule::new(self.trigger(BUILDER, args.key, Vec::new())?);
        arm.to.push(Action::set_on(args.activate.clone()));
        arm.to.push(Action::set_on(toggle.clone()));
        arm.to_delayed_action
            .to_if_invoked
            .push(Action::set_off(toggle.clone()));
        arm.to_delayed_action.to_if_canceled.push(Action::set_off(toggle));
        arm.to_after_key_up = release_actions(&args.activate, &args.also_deactivate, args.on_release);
        arm.parameters.delayed_action_delay_ms = Some(args.delay_ms);

        Ok([finish(BUILDER, latch)?, finish(BUILDER, arm)?])
    }

    /// Sends `held` on key down and sets a flag if tapped alone.
    pub fn toggle_on_tap(&self, args: TapToggle<'_>) -> RuleResult<Rule> {
        const BUILDER: &str = "tap toggle";
        self.check_key(BUILDER, &args.held.key_code)?;
        check_concrete(&args.held.modifiers, "output modifiers")?;

        let mut rule = Rule::new(self.trigger(BUILDER, args.key, Vec::new())?);
        rule.to.push(Action::Key(args.held));
        rule.to_if_alone.push(Action::set_on(args.set));
        finish(BUILDER, rule)
    }

    /// Assigns every listed flag on key down, then runs `extra`.
    pub fn set_flags(&self, args: SetFlags<'_>) -> RuleResult<Rule> {
        const BUILDER: &str = "set flags";
        let mut rule = Rule::new(self.trigger(BUILDER, args.key, Vec::new())?);
        rule.to = args
            .assignments
            .into_iter()
            .map(|(name, value)| Action::set(name, value))
            .chain(args.extra)
            .collect();
        finish(BUILDER, rule)
    }

    fn trigger(
        &self,
        builder: &'static str,
        key: &str,
        mandatory: Vec<Modifier>,
    ) -> RuleResult<Trigger> {
        self.check_key(builder, key)?;
        check_concrete(&mandatory, "mandatory trigger modifiers")?;

        let modifiers = if mandatory.is_empty() {
            FromModifiers::any()
        } else {
            FromModifiers::requiring(mandatory)
        };
        Ok(Trigger::key(key, modifiers))
    }

    fn check_key(&self, builder: &'static str, key: &str) -> RuleResult<()> {
        if self.keycodes.is_valid(key) {
            Ok(())
        } else {
            Err(RuleError::UnknownKey {
                builder,
                key: key.to_string(),
            })
        }
    }
}

/// Clears `activate` then each companion once, then runs the extra actions.
fn release_actions(activate: &Variable, companions: &[Variable], extra: Vec<Action>) -> Vec<Action> {
    let mut cleared: Vec<&Variable> = vec![activate];
    for flag in companions {
        if !cleared.contains(&flag) {
            cleared.push(flag);
        }
    }

    cleared
        .into_iter()
        .map(|flag| Action::set_off(flag.clone()))
        .chain(extra)
        .collect()
}

fn check_concrete(modifiers: &[Modifier], context: &'static str) -> RuleResult<()> {
    if modifiers.contains(&Modifier::Any) {
        return Err(RuleError::WildcardModifier { context });
    }
    Ok(())
}

fn finish(builder: &'static str, rule: Rule) -> RuleResult<Rule> {
    if rule.has_actions() {
        Ok(rule)
    } else {
        Err(RuleError::EmptyRule {
            builder,
            trigger: rule.from.describe(),
        })
    }
}
