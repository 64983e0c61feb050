//! Key code vocabulary and validation.
//!
//! This module provides access to the embedded key code database used to reject
//! unknown key identifiers at rule construction time, plus ranked search for the
//! `keycodes` command.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Category of key codes (letters, navigation, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeycodeCategory {
    /// Category ID (e.g., "letters", "navigation")
    pub id: String,
    /// Display name (e.g., "Letters", "Navigation")
    pub name: String,
    /// Description of what keys are in this category
    pub description: String,
}

/// Individual key code definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeycodeDefinition {
    /// Engine key code (e.g., "a", "open_bracket", "vk_none")
    pub code: String,
    /// Display name (e.g., "A", "Open Bracket")
    pub name: String,
    /// Category ID
    pub category: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Optional regex accepting a whole family of codes (e.g. "f13")
    #[serde(default)]
    pub pattern: Option<String>,
    /// Alternative names accepted by search, never emitted
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Database schema from keycodes.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct KeycodeDatabase {
    version: String,
    categories: Vec<KeycodeCategory>,
    keycodes: Vec<KeycodeDefinition>,
}

/// Key code database with fast lookup and search capabilities.
///
/// The database is embedded in the binary at compile time. Unlike firmware
/// keycodes, the engine only accepts canonical names, so aliases take part in
/// search but not in validation.
#[derive(Debug, Clone)]
pub struct KeycodeDb {
    keycodes: Vec<KeycodeDefinition>,
    categories: Vec<KeycodeCategory>,
    /// Canonical code -> index
    lookup: HashMap<String, usize>,
    /// Compiled patterns for code families (f13..f20)
    patterns: Vec<(String, Regex)>,
}

impl KeycodeDb {
    /// Loads the key code database from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("keycodes.json");
        let db: KeycodeDatabase =
            serde_json::from_str(json_data).context("Failed to parse embedded keycodes.json")?;

        let mut lookup = HashMap::new();
        let mut patterns = Vec::new();

        for (idx, keycode) in db.keycodes.iter().enumerate() {
            lookup.insert(keycode.code.clone(), idx);

            if let Some(pattern) = &keycode.pattern {
                let regex = Regex::new(pattern)
                    .with_context(|| format!("Invalid pattern for key code '{}'", keycode.code))?;
                patterns.push((keycode.category.clone(), regex));
            }
        }

        Ok(Self {
            keycodes: db.keycodes,
            categories: db.categories,
            lookup,
            patterns,
        })
    }

    /// Validates a key code against the database.
    ///
    /// # Examples
    ///
    /// ```
    /// use lazykarabiner::keycode_db::KeycodeDb;
    ///
    /// let db = KeycodeDb::load().unwrap();
    /// assert!(db.is_valid("open_bracket"));
    /// assert!(db.is_valid("f17"));
    /// assert!(!db.is_valid("KC_A"));
    /// ```
    #[must_use]
    pub fn is_valid(&self, keycode: &str) -> bool {
        if self.lookup.contains_key(keycode) {
            return true;
        }

        self.patterns.iter().any(|(_, regex)| regex.is_match(keycode))
    }

    /// Gets a key code definition by canonical code.
    #[must_use]
    pub fn get(&self, keycode: &str) -> Option<&KeycodeDefinition> {
        let idx = self.lookup.get(keycode)?;
        self.keycodes.get(*idx)
    }

    /// Searches by code, alias, name or description (case-insensitive).
    ///
    /// Results are sorted by relevance: exact match, prefix, substring, then
    /// description hits.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&KeycodeDefinition> {
        if query.is_empty() {
            return self.keycodes.iter().collect();
        }

        let query_lower = query.to_lowercase();
        let mut results: Vec<(&KeycodeDefinition, i32)> = self
            .keycodes
            .iter()
            .filter_map(|keycode| {
                let code_lower = keycode.code.to_lowercase();
                let name_lower = keycode.name.to_lowercase();
                let alias_hit = keycode.aliases.iter().any(|a| a == &query_lower);

                if code_lower == query_lower || name_lower == query_lower || alias_hit {
                    return Some((keycode, 100));
                }

                if code_lower.starts_with(&query_lower) || name_lower.starts_with(&query_lower) {
                    return Some((keycode, 50));
                }

                if code_lower.contains(&query_lower) || name_lower.contains(&query_lower) {
                    return Some((keycode, 10));
                }

                let desc_hit = keycode
                    .description
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(&query_lower));
                desc_hit.then_some((keycode, 5))
            })
            .collect();

        // Stable sort keeps database order within one relevance tier
        results.sort_by(|a, b| b.1.cmp(&a.1));

        results.into_iter().map(|(keycode, _)| keycode).collect()
    }

    /// Searches for key codes within a specific category.
    #[must_use]
    pub fn search_in_category(&self, query: &str, category_id: &str) -> Vec<&KeycodeDefinition> {
        self.search(query)
            .into_iter()
            .filter(|k| k.category == category_id)
            .collect()
    }

    /// Gets all categories.
    #[must_use]
    pub fn categories(&self) -> &[KeycodeCategory] {
        &self.categories
    }

    /// Gets a category by ID.
    #[must_use]
    pub fn get_category(&self, id: &str) -> Option<&KeycodeCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Gets the total number of key codes.
    #[must_use]
    pub const fn keycode_count(&self) -> usize {
        self.keycodes.len()
    }
}
