//! LazyKarabiner Library
//!
//! Declarative builder for Karabiner-Elements complex modifications. Small rule
//! descriptions are expanded into engine rules, grouped into guarded layers,
//! assembled in precedence order and serialized as JSON.
//!
//! ```no_run
//! use lazykarabiner::keycode_db::KeycodeDb;
//! use lazykarabiner::keymap::{build_keymap, KeymapOptions};
//!
//! let keycodes = KeycodeDb::load()?;
//! let document = build_keymap(&keycodes, &KeymapOptions::default())?;
//! println!("{}", lazykarabiner::generator::to_json_pretty(&document)?);
//! # Ok::<(), anyhow::Error>(())
//! ```

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod generator;
pub mod keycode_db;
pub mod keymap;
pub mod layers;
pub mod models;
pub mod rules;
