//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and generation defaults.

/// The display name of the application, also the config directory name.
pub const APP_NAME: &str = "LazyKarabiner";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "lazykarabiner";

/// Title of the generated document unless configured otherwise.
pub const DEFAULT_TITLE: &str = "Werner's keymap";

/// Default double-tap window for latching layers, in milliseconds.
pub const DEFAULT_DOUBLE_TAP_MS: u32 = 500;
