//! Rule (manipulator) data structures.
//!
//! A [`Rule`] is the unit of output: one trigger, zero or more guards, and
//! actions partitioned by timing phase. Field names and enumerations follow the
//! remapping engine's document format, so these types serialize directly.

use crate::models::modifier::{Modifier, StickyOp};
use crate::models::variable::{FlagValue, Variable};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Modifier constraint attached to a trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FromModifiers {
    /// Modifiers that must be held for the trigger to match
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mandatory: Vec<Modifier>,
    /// Modifiers that may be held without preventing a match
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<Modifier>,
}

impl FromModifiers {
    /// Any modifiers allowed, none required.
    #[must_use]
    pub fn any() -> Self {
        Self {
            mandatory: Vec::new(),
            optional: vec![Modifier::Any],
        }
    }

    /// Requires `mandatory`, still allows anything else.
    #[must_use]
    pub fn requiring(mandatory: Vec<Modifier>) -> Self {
        Self {
            mandatory,
            optional: vec![Modifier::Any],
        }
    }

    /// True when no constraint is serialized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mandatory.is_empty() && self.optional.is_empty()
    }
}

/// Single key reference inside a simultaneous trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyRef {
    /// Physical key identifier
    pub key_code: String,
}

/// Ordering constraints for a simultaneous trigger.
///
/// Keys must go down strictly left to right, come up in strictly reverse order,
/// and the chord only ends when all keys are released.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SimultaneousOptions {
    /// Always `"strict"`
    pub key_down_order: &'static str,
    /// Always `"strict_inverse"`
    pub key_up_order: &'static str,
    /// Always `"all"`
    pub key_up_when: &'static str,
}

impl Default for SimultaneousOptions {
    fn default() -> Self {
        Self {
            key_down_order: "strict",
            key_up_order: "strict_inverse",
            key_up_when: "all",
        }
    }
}

/// Physical event matched by a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TriggerEvent {
    /// A single key press
    Key {
        /// Physical key identifier
        key_code: String,
    },
    /// Several keys pressed together as a chord
    Simultaneous {
        /// Chord members in required press order
        simultaneous: Vec<KeyRef>,
        /// Ordering constraints
        simultaneous_options: SimultaneousOptions,
    },
}

/// Trigger (`from`) of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trigger {
    /// Matched physical event
    #[serde(flatten)]
    pub event: TriggerEvent,
    /// Modifier constraint
    #[serde(skip_serializing_if = "FromModifiers::is_empty")]
    pub modifiers: FromModifiers,
}

impl Trigger {
    /// Single-key trigger with the given modifier constraint.
    pub fn key(key_code: impl Into<String>, modifiers: FromModifiers) -> Self {
        Self {
            event: TriggerEvent::Key {
                key_code: key_code.into(),
            },
            modifiers,
        }
    }

    /// Chord trigger; keys listed in required press order.
    pub fn chord<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            event: TriggerEvent::Simultaneous {
                simultaneous: keys
                    .into_iter()
                    .map(|k| KeyRef {
                        key_code: k.into(),
                    })
                    .collect(),
                simultaneous_options: SimultaneousOptions::default(),
            },
            modifiers: FromModifiers::any(),
        }
    }

    /// Key codes that make up this trigger.
    #[must_use]
    pub fn key_codes(&self) -> Vec<&str> {
        match &self.event {
            TriggerEvent::Key { key_code } => vec![key_code.as_str()],
            TriggerEvent::Simultaneous { simultaneous, .. } => {
                simultaneous.iter().map(|k| k.key_code.as_str()).collect()
            }
        }
    }

    /// Short human-readable form, e.g. `shift+slash` or `d&f`.
    #[must_use]
    pub fn describe(&self) -> String {
        let keys = self.key_codes().join("&");
        if self.modifiers.mandatory.is_empty() {
            keys
        } else {
            let mods: Vec<&str> = self.modifiers.mandatory.iter().map(|m| m.as_str()).collect();
            format!("{}+{}", mods.join("+"), keys)
        }
    }
}

/// Synthesized key event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyEvent {
    /// Key to send
    pub key_code: String,
    /// Modifiers sent together with the key
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    /// Whether the event auto-repeats while held
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<bool>,
    /// Whether a modifier event is only issued together with the next key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lazy: Option<bool>,
}

impl KeyEvent {
    /// Plain key event without modifiers.
    pub fn new(key_code: impl Into<String>) -> Self {
        Self {
            key_code: key_code.into(),
            modifiers: Vec::new(),
            repeat: None,
            lazy: None,
        }
    }

    /// Attaches output modifiers.
    pub fn with_modifiers(mut self, modifiers: Vec<Modifier>) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the repeat flag.
    pub const fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = Some(repeat);
        self
    }

    /// Sets the lazy flag.
    pub const fn with_lazy(mut self, lazy: bool) -> Self {
        self.lazy = Some(lazy);
        self
    }
}

/// Assignment of a value to a flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariableAssignment {
    /// Assigned flag
    pub name: Variable,
    /// New value
    pub value: FlagValue,
}

/// One action inside a phase list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Emit a key event
    Key(KeyEvent),
    /// Assign a flag
    SetVariable(VariableAssignment),
    /// Change the sticky state of a modifier
    StickyModifier {
        /// Affected modifier
        modifier: Modifier,
        /// Operation to apply
        op: StickyOp,
    },
}

impl Action {
    /// Emits a plain key.
    pub fn key(key_code: impl Into<String>) -> Self {
        Self::Key(KeyEvent::new(key_code))
    }

    /// Sets `name` to `value`.
    pub fn set(name: impl Into<Variable>, value: FlagValue) -> Self {
        Self::SetVariable(VariableAssignment {
            name: name.into(),
            value,
        })
    }

    /// Sets `name` to 1.
    pub fn set_on(name: impl Into<Variable>) -> Self {
        Self::set(name, FlagValue::On)
    }

    /// Sets `name` to 0.
    pub fn set_off(name: impl Into<Variable>) -> Self {
        Self::set(name, FlagValue::Off)
    }

    /// Sticky modifier operation.
    pub const fn sticky(modifier: Modifier, op: StickyOp) -> Self {
        Self::StickyModifier { modifier, op }
    }

    /// The flag assignment carried by this action, if any.
    #[must_use]
    pub const fn assignment(&self) -> Option<&VariableAssignment> {
        match self {
            Self::SetVariable(assignment) => Some(assignment),
            _ => None,
        }
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Key(event) => event.serialize(serializer),
            Self::SetVariable(assignment) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("set_variable", assignment)?;
                map.end()
            }
            Self::StickyModifier { modifier, op } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("sticky_modifier", &StickyEntry(*modifier, *op))?;
                map.end()
            }
        }
    }
}

/// `{ "<modifier>": "<op>" }`
struct StickyEntry(Modifier, StickyOp);

impl Serialize for StickyEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(self.0.as_str(), &self.1)?;
        map.end()
    }
}

/// Kind of guard condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionKind {
    /// Flag must equal the value
    VariableIf,
}

/// Guard over a persisted flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    /// Flag being tested
    pub name: Variable,
    /// Condition kind (always `variable_if`)
    #[serde(rename = "type")]
    pub kind: ConditionKind,
    /// Required value
    pub value: FlagValue,
}

impl Condition {
    /// `name == value`
    pub fn variable_if(name: impl Into<Variable>, value: FlagValue) -> Self {
        Self {
            name: name.into(),
            kind: ConditionKind::VariableIf,
            value,
        }
    }
}

/// Rule-local timing parameters in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Parameters {
    /// Hold time before `to_if_held_down` fires
    #[serde(
        rename = "basic.to_if_held_down_threshold_milliseconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub held_down_threshold_ms: Option<u32>,
    /// Window in which a release still counts as a tap for `to_if_alone`
    #[serde(
        rename = "basic.to_if_alone_timeout_milliseconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub alone_timeout_ms: Option<u32>,
    /// Delay before `to_delayed_action.to_if_invoked` fires
    #[serde(
        rename = "basic.to_delayed_action_delay_milliseconds",
        skip_serializing_if = "Option::is_none"
    )]
    pub delayed_action_delay_ms: Option<u32>,
}

impl Parameters {
    /// True when no parameter is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.held_down_threshold_ms.is_none()
            && self.alone_timeout_ms.is_none()
            && self.delayed_action_delay_ms.is_none()
    }
}

/// Delayed-action phase: fired after the delay, or canceled by another key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DelayedAction {
    /// Actions when the delay elapses undisturbed
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to_if_invoked: Vec<Action>,
    /// Actions when another key event preempts the delay
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to_if_canceled: Vec<Action>,
}

impl DelayedAction {
    /// True when neither branch has actions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_if_invoked.is_empty() && self.to_if_canceled.is_empty()
    }
}

/// Rule type; the generator only produces basic rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// `"basic"`
    Basic,
}

/// Timing phase of an action list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `to`: on key down
    Immediate,
    /// `to_if_alone`: on a quick tap
    Alone,
    /// `to_if_held_down`: after the hold threshold
    HeldDown,
    /// `to_delayed_action.to_if_invoked`
    DelayedInvoked,
    /// `to_delayed_action.to_if_canceled`
    DelayedCanceled,
    /// `to_after_key_up`: on release, always
    AfterKeyUp,
}

/// One fully expanded manipulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Guards; all must hold for the rule to be eligible
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,
    /// Always basic
    #[serde(rename = "type")]
    pub kind: RuleKind,
    /// Rule-local timing
    #[serde(skip_serializing_if = "Parameters::is_empty")]
    pub parameters: Parameters,
    /// Trigger
    pub from: Trigger,
    /// Key-down actions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<Action>,
    /// Tap-only actions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to_if_alone: Vec<Action>,
    /// Hold-only actions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to_if_held_down: Vec<Action>,
    /// Delayed actions
    #[serde(skip_serializing_if = "DelayedAction::is_empty")]
    pub to_delayed_action: DelayedAction,
    /// Release actions
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub to_after_key_up: Vec<Action>,
}

impl Rule {
    /// Creates an unguarded rule with no actions yet.
    #[must_use]
    pub fn new(from: Trigger) -> Self {
        Self {
            conditions: Vec::new(),
            kind: RuleKind::Basic,
            parameters: Parameters::default(),
            from,
            to: Vec::new(),
            to_if_alone: Vec::new(),
            to_if_held_down: Vec::new(),
            to_delayed_action: DelayedAction::default(),
            to_after_key_up: Vec::new(),
        }
    }

    /// Actions of the given phase.
    #[must_use]
    pub fn phase(&self, phase: Phase) -> &[Action] {
        match phase {
            Phase::Immediate => &self.to,
            Phase::Alone => &self.to_if_alone,
            Phase::HeldDown => &self.to_if_held_down,
            Phase::DelayedInvoked => &self.to_delayed_action.to_if_invoked,
            Phase::DelayedCanceled => &self.to_delayed_action.to_if_canceled,
            Phase::AfterKeyUp => &self.to_after_key_up,
        }
    }

    /// Iterates over every action of every phase.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.to
            .iter()
            .chain(&self.to_if_alone)
            .chain(&self.to_if_held_down)
            .chain(&self.to_delayed_action.to_if_invoked)
            .chain(&self.to_delayed_action.to_if_canceled)
            .chain(&self.to_after_key_up)
    }

    /// True if at least one phase carries an action.
    #[must_use]
    pub fn has_actions(&self) -> bool {
        self.actions().next().is_some()
    }

    /// True if the rule carries any guard.
    #[must_use]
    pub fn is_guarded(&self) -> bool {
        !self.conditions.is_empty()
    }

    /// Appends a guard after the existing ones.
    pub fn push_condition(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_phases_are_omitted() {
        let mut rule = Rule::new(Trigger::key("q", FromModifiers::any()));
        rule.to.push(Action::key("quote"));

        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "basic",
                "from": { "key_code": "q", "modifiers": { "optional": ["any"] } },
                "to": [{ "key_code": "quote" }]
            })
        );
    }

    #[test]
    fn test_action_variants_serialize_as_tagged_objects() {
        let set = serde_json::to_value(Action::set_on("number-layer")).unwrap();
        assert_eq!(
            set,
            json!({ "set_variable": { "name": "number-layer", "value": 1 } })
        );

        let sticky =
            serde_json::to_value(Action::sticky(Modifier::LeftControl, StickyOp::Toggle)).unwrap();
        assert_eq!(sticky, json!({ "sticky_modifier": { "left_control": "toggle" } }));

        let key = serde_json::to_value(Action::Key(
            KeyEvent::new("tab")
                .with_modifiers(vec![Modifier::LeftCommand])
                .with_repeat(false)
                .with_lazy(true),
        ))
        .unwrap();
        assert_eq!(
            key,
            json!({ "key_code": "tab", "modifiers": ["left_command"], "repeat": false, "lazy": true })
        );
    }

    #[test]
    fn test_chord_trigger_serialization() {
        let trigger = Trigger::chord(["d", "f"]);
        let value = serde_json::to_value(&trigger).unwrap();
        assert_eq!(
            value,
            json!({
                "simultaneous": [{ "key_code": "d" }, { "key_code": "f" }],
                "simultaneous_options": {
                    "key_down_order": "strict",
                    "key_up_order": "strict_inverse",
                    "key_up_when": "all"
                },
                "modifiers": { "optional": ["any"] }
            })
        );
    }

    #[test]
    fn test_parameters_and_conditions_serialization() {
        let mut rule = Rule::new(Trigger::key("a", FromModifiers::any()));
        rule.to.push(Action::set_on("navigation-layer"));
        rule.parameters.delayed_action_delay_ms = Some(500);
        rule.push_condition(Condition::variable_if("modifier-layer", FlagValue::On));

        let value = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            value["parameters"],
            json!({ "basic.to_delayed_action_delay_milliseconds": 500 })
        );
        assert_eq!(
            value["conditions"],
            json!([{ "name": "modifier-layer", "type": "variable_if", "value": 1 }])
        );
    }

    #[test]
    fn test_describe_trigger() {
        let trigger = Trigger::key("slash", FromModifiers::requiring(vec![Modifier::Shift]));
        assert_eq!(trigger.describe(), "shift+slash");
        assert_eq!(Trigger::chord(["d", "f"]).describe(), "d&f");
    }

    #[test]
    fn test_has_actions_checks_every_phase() {
        let mut rule = Rule::new(Trigger::key("a", FromModifiers::any()));
        assert!(!rule.has_actions());
        rule.to_delayed_action
            .to_if_canceled
            .push(Action::set_off("x"));
        assert!(rule.has_actions());
        assert_eq!(rule.phase(Phase::DelayedCanceled).len(), 1);
    }
}
