//! Layers: identifiers, the registry, guard composition and activation rules.

pub mod activation;
pub mod composer;
pub mod registry;

pub use activation::{ActivationTiming, LayerActivator};
pub use composer::{append_guards, ComposedLayer, LayerComposer};
pub use registry::{ActivationPolicy, LayerEntry, LayerExit, LayerId, LayerRegistry, LayerSpec};
