//! Guard injection for layer rule lists.

use crate::layers::registry::{LayerId, LayerRegistry};
use crate::models::{Condition, FlagValue, Rule};
use tracing::debug;

/// Rules of one layer with that layer's guards applied.
///
/// Only the composer constructs this, so the assembler can rely on every rule
/// in it carrying the layer guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedLayer {
    id: LayerId,
    rules: Vec<Rule>,
}

impl ComposedLayer {
    /// Layer the rules belong to.
    #[must_use]
    pub const fn id(&self) -> LayerId {
        self.id
    }

    /// Guarded rules in builder order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Consumes the layer, returning its rules.
    #[must_use]
    pub fn into_rules(self) -> Vec<Rule> {
        self.rules
    }
}

/// Applies layer-activation guards from the registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerComposer {
    registry: LayerRegistry,
}

impl LayerComposer {
    /// Creates a composer over `registry`.
    #[must_use]
    pub const fn new(registry: LayerRegistry) -> Self {
        Self { registry }
    }

    /// Guards for `id`, in application order: required parents `== 1`, the
    /// layer itself `== 1`, then excluded layers `== 0`.
    #[must_use]
    pub fn guards(&self, id: LayerId) -> Vec<Condition> {
        let spec = self.registry.get(id);

        spec.requires
            .iter()
            .map(|parent| Condition::variable_if(parent.variable(), FlagValue::On))
            .chain(std::iter::once(Condition::variable_if(
                id.variable(),
                FlagValue::On,
            )))
            .chain(
                spec.excludes
                    .iter()
                    .map(|other| Condition::variable_if(other.variable(), FlagValue::Off)),
            )
            .collect()
    }

    /// Appends the guards of `id` to every rule.
    #[must_use]
    pub fn compose(&self, id: LayerId, rules: Vec<Rule>) -> ComposedLayer {
        let guards = self.guards(id);
        debug!(layer = %id, rules = rules.len(), guards = guards.len(), "composing layer");

        ComposedLayer {
            id,
            rules: append_guards(rules, &guards),
        }
    }
}

/// Appends `guards` after each rule's existing conditions.
#[must_use]
pub fn append_guards(rules: Vec<Rule>, guards: &[Condition]) -> Vec<Rule> {
    rules
        .into_iter()
        .map(|mut rule| {
            rule.conditions.extend_from_slice(guards);
            rule
        })
        .collect()
}
