//! Symbolic references into the engine's variable store.
//!
//! The remapping engine keeps a map of named integer flags that persists across
//! key events. This crate never reads or writes that store; it only emits
//! conditions that read a flag and actions that assign one.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Name of a boolean flag in the engine's variable store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variable(String);

impl Variable {
    /// Creates a variable reference with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the flag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Companion flag armed by a double-tap gesture on this variable.
    #[must_use]
    pub fn toggle_companion(&self) -> Self {
        Self(format!("{}-toggle", self.0))
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Boolean flag value. Serialized as `1` / `0`; absent flags read as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "u8")]
pub enum FlagValue {
    /// Flag cleared (`0`)
    Off,
    /// Flag set (`1`)
    On,
}

impl FlagValue {
    /// Numeric form written to the document.
    #[must_use]
    pub const fn as_int(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::On => 1,
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        if value {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl From<u8> for FlagValue {
    fn from(value: u8) -> Self {
        Self::from(value != 0)
    }
}

impl Serialize for FlagValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_int())
    }
}
