//! Layer identifiers and the layer registry.
//!
//! Every layer is a boolean flag in the engine's variable store. The registry
//! records, per layer, how it is entered and left, which other layers it depends
//! on or excludes, and what must be cleaned up when it exits. Activation and exit
//! rules are derived from these entries instead of being written by hand.

use crate::models::{Action, Modifier, StickyOp, Variable};
use serde::Serialize;
use std::fmt;

/// Logical layer.
///
/// Declaration order is precedence order in the assembled document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerId {
    /// Symbols for the left hand, entered from the right pinky
    SymbolLeft,
    /// Symbols and window switching, entered from tab
    SymbolRight,
    /// Arrows and paging
    Navigation,
    /// Navigation with shift held, for selections
    VisualMode,
    /// Sticky modifiers
    Modifier,
    /// Number pad on the right hand
    Number,
    /// Function keys, latched from the number layer
    Function,
}

impl LayerId {
    /// All layers in precedence order.
    pub const ALL: [LayerId; 7] = [
        Self::SymbolLeft,
        Self::SymbolRight,
        Self::Navigation,
        Self::VisualMode,
        Self::Modifier,
        Self::Number,
        Self::Function,
    ];

    /// Flag name in the variable store.
    #[must_use]
    pub const fn flag_name(self) -> &'static str {
        match self {
            Self::SymbolLeft => "symbol-layer-left",
            Self::SymbolRight => "symbol-layer-right",
            Self::Navigation => "navigation-layer",
            Self::VisualMode => "visual-mode-layer",
            Self::Modifier => "modifier-layer",
            Self::Number => "number-layer",
            Self::Function => "function-layer",
        }
    }

    /// Flag as a variable reference.
    #[must_use]
    pub fn variable(self) -> Variable {
        Variable::new(self.flag_name())
    }

    /// Position in precedence order.
    #[must_use]
    pub fn precedence(self) -> usize {
        Self::ALL
            .iter()
            .position(|id| *id == self)
            .unwrap_or(Self::ALL.len())
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag_name())
    }
}

/// How a layer becomes active. Exactly one policy per layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivationPolicy {
    /// Active while the entry key is held; a lone tap sends the entry's output
    HoldTap,
    /// Active while held; a second press within the double-tap window latches it
    DoubleTapLatch,
    /// A lone tap turns it on; the entry key sends its output while down
    TapToggle,
    /// Pressing the entry key turns it on; cleared when a parent layer exits
    Latch,
}

impl ActivationPolicy {
    /// Short description for listings.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::HoldTap => "hold for layer, tap for key",
            Self::DoubleTapLatch => "hold for layer, double-tap to latch",
            Self::TapToggle => "tap to turn on",
            Self::Latch => "press to latch until parent exits",
        }
    }
}

/// Key that activates a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerEntry {
    /// Physical key
    pub key: &'static str,
    /// Tap output for [`ActivationPolicy::HoldTap`], held output for
    /// [`ActivationPolicy::TapToggle`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<&'static str>,
}

/// Key inside a layer that leaves `target` (and everything `target` clears).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerExit {
    /// Physical key
    pub key: &'static str,
    /// Layer to leave
    pub target: LayerId,
}

/// Registry entry for one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerSpec {
    /// Layer identifier
    pub id: LayerId,
    /// Activation policy
    pub policy: ActivationPolicy,
    /// Keys that activate the layer
    pub entries: &'static [LayerEntry],
    /// Keys, live inside this layer, that leave a layer
    pub exits: &'static [LayerExit],
    /// Layers that must also be active (guards `== 1`)
    pub requires: &'static [LayerId],
    /// Layers that must be inactive (guards `== 0`)
    pub excludes: &'static [LayerId],
    /// Companion layers cleared whenever this layer exits
    pub clears: &'static [LayerId],
    /// Sticky modifiers released whenever this layer exits
    pub release_sticky: &'static [Modifier],
}

impl LayerSpec {
    /// Flags cleared on exit besides the layer's own.
    #[must_use]
    pub fn companion_flags(&self) -> Vec<Variable> {
        self.clears.iter().map(|id| id.variable()).collect()
    }

    /// Cleanup actions run on exit after the flags are cleared.
    #[must_use]
    pub fn on_exit_actions(&self) -> Vec<Action> {
        self.release_sticky
            .iter()
            .map(|m| Action::sticky(*m, StickyOp::Off))
            .collect()
    }
}

const STICKY_MODIFIERS: &[Modifier] = &[
    Modifier::LeftControl,
    Modifier::LeftOption,
    Modifier::LeftCommand,
    Modifier::LeftShift,
];

const SPECS: [LayerSpec; 7] = [
    LayerSpec {
        id: LayerId::SymbolLeft,
        policy: ActivationPolicy::HoldTap,
        entries: &[
            LayerEntry {
                key: "open_bracket",
                output: Some("delete_or_backspace"),
            },
            LayerEntry {
                key: "delete_or_backspace",
                output: Some("delete_or_backspace"),
            },
        ],
        exits: &[],
        requires: &[],
        excludes: &[],
        clears: &[],
        release_sticky: &[],
    },
    LayerSpec {
        id: LayerId::SymbolRight,
        policy: ActivationPolicy::HoldTap,
        entries: &[LayerEntry {
            key: "tab",
            output: Some("tab"),
        }],
        exits: &[],
        requires: &[],
        excludes: &[],
        clears: &[],
        release_sticky: STICKY_MODIFIERS,
    },
    LayerSpec {
        id: LayerId::Navigation,
        policy: ActivationPolicy::DoubleTapLatch,
        entries: &[LayerEntry {
            key: "a",
            output: None,
        }],
        exits: &[LayerExit {
            key: "a",
            target: LayerId::Navigation,
        }],
        requires: &[],
        excludes: &[LayerId::VisualMode],
        clears: &[LayerId::VisualMode],
        release_sticky: &[],
    },
    LayerSpec {
        id: LayerId::VisualMode,
        policy: ActivationPolicy::TapToggle,
        entries: &[LayerEntry {
            key: "spacebar",
            output: Some("left_shift"),
        }],
        exits: &[
            LayerExit {
                key: "a",
                target: LayerId::Navigation,
            },
            LayerExit {
                key: "spacebar",
                target: LayerId::VisualMode,
            },
        ],
        requires: &[LayerId::Navigation],
        excludes: &[],
        clears: &[],
        release_sticky: &[],
    },
    LayerSpec {
        id: LayerId::Modifier,
        policy: ActivationPolicy::HoldTap,
        entries: &[LayerEntry {
            key: "semicolon",
            output: Some("return_or_enter"),
        }],
        exits: &[],
        requires: &[],
        excludes: &[],
        clears: &[],
        release_sticky: &[],
    },
    LayerSpec {
        id: LayerId::Number,
        policy: ActivationPolicy::HoldTap,
        entries: &[LayerEntry {
            key: "caps_lock",
            output: Some("escape"),
        }],
        exits: &[],
        requires: &[],
        excludes: &[LayerId::Function],
        clears: &[LayerId::Function],
        release_sticky: &[],
    },
    LayerSpec {
        id: LayerId::Function,
        policy: ActivationPolicy::Latch,
        entries: &[LayerEntry {
            key: "h",
            output: None,
        }],
        exits: &[],
        requires: &[LayerId::Number],
        excludes: &[],
        clears: &[],
        release_sticky: &[],
    },
];

/// Lookup table of every layer's spec.
#[derive(Debug, Clone, Copy)]
pub struct LayerRegistry {
    specs: &'static [LayerSpec],
}

impl LayerRegistry {
    /// The built-in registry.
    #[must_use]
    pub const fn builtin() -> Self {
        Self { specs: &SPECS }
    }

    /// Spec for `id`.
    #[must_use]
    pub fn get(&self, id: LayerId) -> &'static LayerSpec {
        // SPECS holds one entry per LayerId, in LayerId::ALL order
        &self.specs[id.precedence()]
    }

    /// All specs in precedence order.
    #[must_use]
    pub fn specs(&self) -> &'static [LayerSpec] {
        self.specs
    }
}

impl Default for LayerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
