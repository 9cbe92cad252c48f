//! The dialect contract and its shared defaults.
//!
//! A [`Dialect`] is a stateless policy object for one database variant. The
//! trait's default methods form the common base every dialect starts from;
//! a concrete dialect overrides what its database does differently.
//!
//! Column type resolution is split in two steps. [`parse_field_for_dialect`]
//! reads the descriptor's tags into a [`ParsedField`]; the dialect then maps
//! the field kind to a type and finishes it with [`with_additional_type`].

pub mod registry;

use std::fmt;

use gaussorm_core::OrmResult;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::tags;
use crate::fields::{FieldAmendment, FieldDescriptor};

/// Column size assumed when a field declares none.
pub const DEFAULT_SIZE: i64 = 255;

static KEY_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^a-zA-Z0-9]+").expect("valid regex"));

/// The outcome of resolving a field's column type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnType {
    /// The full column type, including any additional modifiers.
    pub sql_type: String,
    /// Changes the caller should apply to the field descriptor.
    pub amendments: Vec<FieldAmendment>,
}

impl ColumnType {
    /// Creates a column type with no amendments.
    pub fn new(sql_type: impl Into<String>) -> Self {
        Self {
            sql_type: sql_type.into(),
            amendments: Vec::new(),
        }
    }

    /// Adds an amendment.
    #[must_use]
    pub fn with_amendment(mut self, amendment: FieldAmendment) -> Self {
        self.amendments.push(amendment);
        self
    }

    /// Returns `true` if resolution marked the field as auto-incrementing.
    pub fn is_auto_increment(&self) -> bool {
        self.amendments.contains(&FieldAmendment::auto_increment())
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql_type)
    }
}

/// Tag-derived inputs to column type resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedField {
    /// The explicit type override, empty when none was given.
    pub sql_type: String,
    /// The declared size, [`DEFAULT_SIZE`] when undeclared, `0` when unparseable.
    pub size: i64,
    /// Whether a size tag was present.
    pub size_declared: bool,
    /// Constraint and default modifiers to append after the type.
    pub additional_type: String,
}

/// Reads the tag settings that affect column type resolution.
pub fn parse_field_for_dialect(field: &FieldDescriptor) -> ParsedField {
    let settings = &field.tag_settings;

    let sql_type = settings.get_or_empty(tags::TYPE).trim().to_string();

    let (size, size_declared) = settings.get(tags::SIZE).map_or((DEFAULT_SIZE, false), |num| {
        (num.trim().parse::<i64>().unwrap_or(0), true)
    });

    let mut parts: Vec<String> = [tags::NOT_NULL, tags::UNIQUE]
        .iter()
        .map(|key| settings.get_or_empty(key).trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    for (key, clause) in [(tags::DEFAULT, "DEFAULT"), (tags::COMMENT, "COMMENT")] {
        let value = settings.get_or_empty(key).trim();
        if !value.is_empty() {
            parts.push(format!("{clause} {value}"));
        }
    }

    ParsedField {
        sql_type,
        size,
        size_declared,
        additional_type: parts.join(" ").trim().to_string(),
    }
}

/// Decides whether a field should get a database-generated identity.
///
/// An explicit `AUTO_INCREMENT` tag wins unless its value is `false`;
/// otherwise only primary keys qualify.
pub fn field_can_auto_increment(field: &FieldDescriptor) -> bool {
    field
        .tag_settings
        .get(tags::AUTO_INCREMENT)
        .map_or(field.is_primary_key, |value| {
            !value.eq_ignore_ascii_case("false")
        })
}

/// Appends `additional_type` to `sql_type` unless it is blank.
pub fn with_additional_type(sql_type: &str, additional_type: &str) -> String {
    if additional_type.trim().is_empty() {
        sql_type.to_string()
    } else {
        format!("{sql_type} {additional_type}")
    }
}

/// Builds a constraint or index name such as `idx_users_name_email`.
///
/// Runs of characters outside `[a-zA-Z0-9]` collapse to a single `_`.
pub fn build_key_name(kind: &str, table_name: &str, fields: &[&str]) -> String {
    let key_name = format!("{kind}_{table_name}_{}", fields.join("_"));
    KEY_NAME_REGEX.replace_all(&key_name, "_").into_owned()
}

/// The capability contract a database variant implements.
///
/// Catalog methods never fail: a query error is indistinguishable from
/// "not found" at this layer.
#[async_trait::async_trait]
pub trait Dialect: Send + Sync + fmt::Debug {
    /// Returns the name this dialect is registered under.
    fn name(&self) -> &'static str;

    /// Returns the placeholder for the 1-based bind parameter `position`.
    fn bind_var(&self, position: usize) -> String;

    /// Quotes an identifier.
    fn quote(&self, key: &str) -> String {
        format!("\"{key}\"")
    }

    /// Resolves the column type for `field`.
    ///
    /// Returns [`OrmError::UnsupportedFieldType`](gaussorm_core::OrmError::UnsupportedFieldType)
    /// when the field's kind has no mapping and no override was given.
    fn data_type_of(&self, field: &FieldDescriptor) -> OrmResult<ColumnType>;

    /// Returns `true` if `index_name` exists on `table_name`.
    async fn has_index(&self, table_name: &str, index_name: &str) -> bool;

    /// Renders the statement removing `index_name`.
    fn remove_index_sql(&self, _table_name: &str, index_name: &str) -> String {
        format!("DROP INDEX {index_name}")
    }

    /// Returns `true` if the foreign key constraint exists on `table_name`.
    async fn has_foreign_key(&self, table_name: &str, foreign_key_name: &str) -> bool;

    /// Returns `true` if `table_name` exists.
    async fn has_table(&self, table_name: &str) -> bool;

    /// Returns `true` if `column_name` exists on `table_name`.
    async fn has_column(&self, table_name: &str, column_name: &str) -> bool;

    /// Renders the statement changing the type of a column.
    fn modify_column_sql(&self, table_name: &str, column_name: &str, typ: &str) -> String {
        format!("ALTER TABLE {table_name} ALTER COLUMN {column_name} TYPE {typ}")
    }

    /// Renders ` LIMIT n OFFSET m`, omitting absent or negative parts.
    fn limit_and_offset_sql(&self, limit: Option<i64>, offset: Option<i64>) -> String {
        let mut sql = String::new();
        if let Some(limit) = limit.filter(|l| *l >= 0) {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = offset.filter(|o| *o >= 0) {
            sql.push_str(&format!(" OFFSET {offset}"));
        }
        sql
    }

    /// Returns the `FROM` clause needed to select a constant, if any.
    fn select_from_dummy_table(&self) -> &'static str {
        ""
    }

    /// Returns the clause placed between `INSERT ... (columns)` and `VALUES`
    /// to capture the generated key.
    fn last_insert_id_output_interstitial(
        &self,
        _table_name: &str,
        _key: &str,
        _columns: &[&str],
    ) -> String {
        String::new()
    }

    /// Returns the suffix appended to an INSERT to read back the generated key.
    fn last_insert_id_returning_suffix(&self, _table_name: &str, _key: &str) -> String {
        String::new()
    }

    /// Returns `true` if the driver can report the last inserted ID directly.
    fn supports_last_insert_id(&self) -> bool {
        true
    }

    /// Returns the clause for inserting a row made only of defaults.
    fn default_value_str(&self) -> &'static str {
        "DEFAULT VALUES"
    }

    /// Builds a constraint or index name.
    fn build_key_name(&self, kind: &str, table_name: &str, fields: &[&str]) -> String {
        build_key_name(kind, table_name, fields)
    }

    /// Normalizes an index name and column name before use.
    fn normalize_index_and_column<'a>(
        &self,
        index_name: &'a str,
        column_name: &'a str,
    ) -> (&'a str, &'a str) {
        (index_name, column_name)
    }

    /// Returns the name of the connected database, or `""` if it cannot be read.
    async fn current_database(&self) -> String;
}
