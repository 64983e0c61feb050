//! Document assembly in precedence order.

use crate::layers::ComposedLayer;
use crate::models::{Document, Rule};
use tracing::debug;

/// Collects rule groups and concatenates them in a fixed order.
///
/// The engine applies the first matching rule, so the output order is:
/// modifier-qualified overrides, then guarded layers by [`crate::layers::LayerId`]
/// precedence, then the unconditional base layer. The order of calls does not
/// matter; the order of rules within one group is kept as given.
#[derive(Debug, Clone, Default)]
pub struct DocumentAssembler {
    overrides: Vec<Rule>,
    layers: Vec<ComposedLayer>,
    base: Vec<Rule>,
}

impl DocumentAssembler {
    /// Creates an empty assembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds rules that must win over everything else.
    pub fn with_overrides(&mut self, rules: Vec<Rule>) -> &mut Self {
        self.overrides.extend(rules);
        self
    }

    /// Adds a guarded layer.
    pub fn with_layer(&mut self, layer: ComposedLayer) -> &mut Self {
        self.layers.push(layer);
        self
    }

    /// Adds unconditional rules.
    pub fn with_base(&mut self, rules: Vec<Rule>) -> &mut Self {
        self.base.extend(rules);
        self
    }

    /// Concatenates every group and wraps it with `title`.
    #[must_use]
    pub fn assemble(&self, title: &str) -> Document {
        let mut layers: Vec<&ComposedLayer> = self.layers.iter().collect();
        // stable: two groups for the same layer keep their insertion order
        layers.sort_by_key(|layer| layer.id());

        let mut manipulators = self.overrides.clone();
        for layer in layers {
            debug!(layer = %layer.id(), rules = layer.rules().len(), "appending layer");
            manipulators.extend_from_slice(layer.rules());
        }
        manipulators.extend_from_slice(&self.base);

        debug!(
            overrides = self.overrides.len(),
            base = self.base.len(),
            total = manipulators.len(),
            "document assembled"
        );
        Document::new(title, manipulators)
    }
}
