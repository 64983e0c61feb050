//! Modifier vocabulary and sticky-modifier operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Modifier identifier understood by the remapping engine.
///
/// This is a closed set: every modifier that can appear in a trigger or in an
/// emitted key event is listed here. Side-less variants (`Shift`, `Control`, ...)
/// match either side when used in a trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Left shift
    LeftShift,
    /// Right shift
    RightShift,
    /// Either shift
    Shift,
    /// Left control
    LeftControl,
    /// Right control
    RightControl,
    /// Either control
    Control,
    /// Left option (alt)
    LeftOption,
    /// Right option (alt)
    RightOption,
    /// Either option
    Option,
    /// Left command
    LeftCommand,
    /// Right command
    RightCommand,
    /// Either command
    Command,
    /// Wildcard, only meaningful in the `optional` list of a trigger
    Any,
}

impl Modifier {
    /// Returns the identifier used in the generated document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftShift => "left_shift",
            Self::RightShift => "right_shift",
            Self::Shift => "shift",
            Self::LeftControl => "left_control",
            Self::RightControl => "right_control",
            Self::Control => "control",
            Self::LeftOption => "left_option",
            Self::RightOption => "right_option",
            Self::Option => "option",
            Self::LeftCommand => "left_command",
            Self::RightCommand => "right_command",
            Self::Command => "command",
            Self::Any => "any",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operation applied to a sticky modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StickyOp {
    /// Hold the modifier until turned off
    On,
    /// Release a held sticky modifier
    Off,
    /// Flip the current sticky state
    Toggle,
}

impl fmt::Display for StickyOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::On => write!(f, "on"),
            Self::Off => write!(f, "off"),
            Self::Toggle => write!(f, "toggle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_document_identifier() {
        for modifier in [Modifier::LeftShift, Modifier::Option, Modifier::Any] {
            let json = serde_json::to_string(&modifier).unwrap();
            assert_eq!(json, format!("\"{modifier}\""));
        }
    }

    #[test]
    fn test_serializes_as_snake_case() {
        let json = serde_json::to_string(&Modifier::LeftCommand).unwrap();
        assert_eq!(json, "\"left_command\"");
        let json = serde_json::to_string(&StickyOp::Toggle).unwrap();
        assert_eq!(json, "\"toggle\"");
    }
}
