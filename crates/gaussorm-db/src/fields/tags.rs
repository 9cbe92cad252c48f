//! Tag settings attached to a field.
//!
//! Tags use the `key:value;flag;key:a:b` syntax. Keys are trimmed and
//! upper-cased. A bare flag maps to itself, so `not null` becomes
//! `NOT NULL = "NOT NULL"`, which lets dialects splice flag values directly
//! into column definitions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tag key holding an explicit SQL type override.
pub const TYPE: &str = "TYPE";
/// Tag key holding the declared column size.
pub const SIZE: &str = "SIZE";
/// Tag key marking a field as auto-incrementing.
pub const AUTO_INCREMENT: &str = "AUTO_INCREMENT";
/// Flag tag for a `NOT NULL` column.
pub const NOT_NULL: &str = "NOT NULL";
/// Flag tag for a `UNIQUE` column.
pub const UNIQUE: &str = "UNIQUE";
/// Tag key holding the column default expression.
pub const DEFAULT: &str = "DEFAULT";
/// Tag key holding the column comment.
pub const COMMENT: &str = "COMMENT";

/// An ordered, upper-cased key/value bag of field tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSettings {
    settings: BTreeMap<String, String>,
}

impl TagSettings {
    /// Creates an empty tag bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a tag string such as `"type:varchar(100);not null;default:'n/a'"`.
    ///
    /// Empty segments are skipped. Later keys overwrite earlier ones.
    pub fn parse(tag: &str) -> Self {
        let mut settings = Self::new();
        settings.merge_str(tag);
        settings
    }

    /// Parses `tag` and merges its entries into this bag.
    pub fn merge_str(&mut self, tag: &str) {
        for segment in tag.split(';') {
            let mut parts = segment.split(':');
            let key = parts.next().unwrap_or_default().trim().to_uppercase();
            if key.is_empty() {
                continue;
            }
            let rest: Vec<&str> = parts.collect();
            let value = if rest.is_empty() {
                key.clone()
            } else {
                rest.join(":")
            };
            self.settings.insert(key, value);
        }
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(&key.to_uppercase()).map(String::as_str)
    }

    /// Returns the value stored under `key`, or `""` when absent.
    pub fn get_or_empty(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.settings.contains_key(&key.to_uppercase())
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.insert(key.into().to_uppercase(), value.into());
    }

    /// Removes `key`, returning its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.settings.remove(&key.to_uppercase())
    }

    /// Returns the number of tags.
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// Returns `true` if no tags are set.
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.settings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
