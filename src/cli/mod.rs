//! CLI command handlers for LazyKarabiner.
//!
//! Every command builds the keymap in memory; only `generate` writes anything.

pub mod common;
pub mod generate;
pub mod keycodes;
pub mod layers;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use generate::GenerateArgs;
pub use keycodes::KeycodesArgs;
pub use layers::LayersArgs;
pub use validate::ValidateArgs;
