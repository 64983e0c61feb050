//! Compact per-key binding tables.

use crate::models::{Modifier, Rule};
use crate::rules::{Block, PassThrough, Remap, RuleFactory, RuleResult, StickyToggle};

/// What a physical key does inside one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// Suppress the key
    Block,
    /// Send the key itself
    Pass,
    /// Send another key with output modifiers
    Send(&'static str, &'static [Modifier]),
    /// Toggle a sticky modifier
    Sticky(Modifier),
}

/// `(physical key, binding)` pairs in output order.
pub type Bindings = [(&'static str, Binding)];

/// Shorthand for [`Binding::Send`] without modifiers.
#[must_use]
pub const fn to(key: &'static str) -> Binding {
    Binding::Send(key, &[])
}

/// Adds `left_shift` to every unmodified [`Binding::Send`].
#[must_use]
pub fn shifted(binding: Binding) -> Binding {
    match binding {
        Binding::Send(key, []) => Binding::Send(key, &[Modifier::LeftShift]),
        other => other,
    }
}

/// Accumulates one layer's rules.
#[derive(Debug)]
pub struct LayerTable<'a> {
    factory: RuleFactory<'a>,
    rules: Vec<Rule>,
}

impl<'a> LayerTable<'a> {
    /// Empty table.
    #[must_use]
    pub const fn new(factory: RuleFactory<'a>) -> Self {
        Self {
            factory,
            rules: Vec::new(),
        }
    }

    /// Binds each key without trigger modifiers.
    pub fn bind(&mut self, bindings: &Bindings) -> RuleResult<()> {
        self.bind_with(&[], bindings)
    }

    /// Binds each key, requiring `from_modifiers` on the trigger.
    pub fn bind_with(&mut self, from_modifiers: &[Modifier], bindings: &Bindings) -> RuleResult<()> {
        for (key, binding) in bindings {
            let rule = self.rule(key, *binding, from_modifiers)?;
            self.rules.push(rule);
        }
        Ok(())
    }

    /// Appends rules built elsewhere.
    pub fn extend(&mut self, rules: impl IntoIterator<Item = Rule>) {
        self.rules.extend(rules);
    }

    /// Rules in insertion order.
    #[must_use]
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }

    fn rule(&self, key: &str, binding: Binding, from_modifiers: &[Modifier]) -> RuleResult<Rule> {
        let from_modifiers = from_modifiers.to_vec();
        match binding {
            Binding::Block => self.factory.block_key(Block {
                key,
                from_modifiers,
            }),
            Binding::Pass if from_modifiers.is_empty() => {
                self.factory.simple_pass_through(PassThrough {
                    key,
                    to_modifiers: Vec::new(),
                })
            }
            Binding::Pass => self.factory.remap(Remap {
                from: key,
                from_modifiers,
                to: key,
                to_modifiers: Vec::new(),
            }),
            Binding::Send(to, to_modifiers) => self.factory.remap(Remap {
                from: key,
                from_modifiers,
                to,
                to_modifiers: to_modifiers.to_vec(),
            }),
            Binding::Sticky(modifier) => self.factory.sticky_modifier_toggle(StickyToggle {
                key,
                from_modifiers,
                modifier,
            }),
        }
    }
}
