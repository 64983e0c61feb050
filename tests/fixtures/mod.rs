//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use lazykarabiner::config::Config;
use lazykarabiner::keycode_db::KeycodeDb;
use lazykarabiner::keymap::{build_keymap, KeymapOptions};
use lazykarabiner::models::{Document, Rule};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Path to the lazykarabiner binary
pub fn lazykarabiner_bin() -> &'static str {
    env!("CARGO_BIN_EXE_lazykarabiner")
}

/// Builds the built-in keymap with default options.
pub fn default_document() -> Document {
    let keycodes = KeycodeDb::load().expect("keycode database should load");
    build_keymap(&keycodes, &KeymapOptions::default()).expect("keymap should build")
}

/// Writes `config` to a temp directory and returns its path.
///
/// The `TempDir` must be kept alive for the file to exist.
pub fn create_temp_config_file(config: &Config) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    config.save_to(&path).expect("Failed to write config");
    (path, temp_dir)
}

/// Writes raw TOML to a temp directory, bypassing config validation.
pub fn create_raw_config_file(contents: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, contents).expect("Failed to write config");
    (path, temp_dir)
}

/// Position of the first rule whose trigger is the single key `key` and whose
/// guards hold exactly the given flags at 1.
pub fn position_of(document: &Document, key: &str, active: &[&str]) -> Option<usize> {
    document.manipulators.iter().position(|rule| {
        rule.from.key_codes() == [key]
            && rule.from.modifiers.mandatory.is_empty()
            && on_flags(rule) == active
    })
}

/// Names of the flags a rule requires to be 1, in guard order.
pub fn on_flags(rule: &Rule) -> Vec<&str> {
    rule.conditions
        .iter()
        .filter(|c| c.value.as_int() == 1)
        .map(|c| c.name.name())
        .collect()
}
