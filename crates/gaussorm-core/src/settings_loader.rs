//! Settings loading from configuration files.
//!
//! This module provides functions to load [`Settings`] from TOML files, JSON
//! files, and to apply environment variable overrides.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! Database variables apply to the `default` alias.
//!
//! | Env Var | Setting |
//! |---|---|
//! | `GAUSSORM_DEBUG` | `debug` |
//! | `GAUSSORM_LOG_LEVEL` | `log_level` |
//! | `GAUSSORM_DB_ENGINE` | `databases.default.engine` |
//! | `GAUSSORM_DB_NAME` | `databases.default.name` |
//! | `GAUSSORM_DB_USER` | `databases.default.user` |
//! | `GAUSSORM_DB_PASSWORD` | `databases.default.password` |
//! | `GAUSSORM_DB_HOST` | `databases.default.host` |
//! | `GAUSSORM_DB_PORT` | `databases.default.port` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use gaussorm_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/gaussorm.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::OrmError;
use crate::settings::{Settings, DEFAULT_DB_ALIAS};

/// Loads settings from a TOML string.
///
/// Any fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, OrmError> {
    // TOML goes through serde_json so it can be deep-merged over the defaults.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| OrmError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, OrmError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        OrmError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<Settings, OrmError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, OrmError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| OrmError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, OrmError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        OrmError::ConfigurationError(format!(
            "Failed to read JSON file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_json_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `GAUSSORM_*` environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides_from(settings, |key| std::env::var(key).ok());
}

/// Applies overrides using `lookup` to resolve variable names.
///
/// Unparseable ports are ignored.
pub fn apply_overrides_from<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("GAUSSORM_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("GAUSSORM_LOG_LEVEL") {
        settings.log_level = val;
    }

    let db = settings.database_mut(DEFAULT_DB_ALIAS);

    if let Some(val) = lookup("GAUSSORM_DB_ENGINE") {
        db.engine = val;
    }

    if let Some(val) = lookup("GAUSSORM_DB_NAME") {
        db.name = val;
    }

    if let Some(val) = lookup("GAUSSORM_DB_USER") {
        db.user = val;
    }

    if let Some(val) = lookup("GAUSSORM_DB_PASSWORD") {
        db.password = val;
    }

    if let Some(val) = lookup("GAUSSORM_DB_HOST") {
        db.host = val;
    }

    if let Some(val) = lookup("GAUSSORM_DB_PORT") {
        if let Ok(port) = val.parse::<u16>() {
            db.port = port;
        }
    }
}

// ============================================================
// Helpers
// ============================================================

fn merge_over_defaults(value: serde_json::Value, format: &str) -> Result<Settings, OrmError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        OrmError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        OrmError::ConfigurationError(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            log_level = "warn"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "warn");
        // Defaults preserved
        assert_eq!(settings.database("default").unwrap().port, 5432);
    }

    #[test]
    fn test_from_toml_str_databases() {
        let toml = r#"
            [databases.default]
            name = "shop"
            user = "gaussdb"
            password = "secret"
            host = "db.internal"
            port = 15400
        "#;

        let settings = from_toml_str(toml).unwrap();
        let db = settings.database("default").unwrap();
        assert_eq!(db.engine, "opengauss");
        assert_eq!(db.name, "shop");
        assert_eq!(db.user, "gaussdb");
        assert_eq!(db.host, "db.internal");
        assert_eq!(db.port, 15400);
    }

    #[test]
    fn test_from_toml_str_extra_alias_uses_field_defaults() {
        let toml = r#"
            [databases.replica]
            host = "replica.internal"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.databases.len(), 2);
        let replica = settings.database("replica").unwrap();
        assert_eq!(replica.host, "replica.internal");
        assert_eq!(replica.port, 5432);
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("debug = [unclosed");
        assert!(matches!(result, Err(OrmError::ConfigurationError(_))));
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_databases() {
        let json = r#"{
            "log_level": "debug",
            "databases": {"default": {"name": "inventory", "port": 26000}}
        }"#;

        let settings = from_json_str(json).unwrap();
        assert_eq!(settings.log_level, "debug");
        let db = settings.database("default").unwrap();
        assert_eq!(db.name, "inventory");
        assert_eq!(db.port, 26000);
        assert_eq!(db.host, "localhost");
    }

    #[test]
    fn test_from_json_str_invalid() {
        let result = from_json_str("{not json");
        assert!(matches!(result, Err(OrmError::ConfigurationError(_))));
    }

    // ── Files ───────────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let dir = std::env::temp_dir().join("gaussorm_test_toml");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(&path, "log_level = \"error\"\n").unwrap();

        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.log_level, "error");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_from_json_file() {
        let dir = std::env::temp_dir().join("gaussorm_test_json");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, r#"{"debug": false}"#).unwrap();

        let settings = from_json_file(&path).unwrap();
        assert!(!settings.debug);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = from_toml_file("/nonexistent/gaussorm.toml");
        assert!(matches!(result, Err(OrmError::ConfigurationError(_))));
    }

    // ── Env overrides ───────────────────────────────────────────────

    #[test]
    fn test_overrides_debug_and_log_level() {
        let mut settings = Settings::default();
        apply_overrides_from(
            &mut settings,
            env_of(&[("GAUSSORM_DEBUG", "false"), ("GAUSSORM_LOG_LEVEL", "trace")]),
        );
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "trace");
    }

    #[test]
    fn test_overrides_debug_truthy_values() {
        for value in ["true", "1", "YES"] {
            let mut settings = Settings::default();
            settings.debug = false;
            apply_overrides_from(&mut settings, env_of(&[("GAUSSORM_DEBUG", value)]));
            assert!(settings.debug, "{value} should enable debug");
        }
    }

    #[test]
    fn test_overrides_database() {
        let mut settings = Settings::default();
        apply_overrides_from(
            &mut settings,
            env_of(&[
                ("GAUSSORM_DB_NAME", "orders"),
                ("GAUSSORM_DB_USER", "omm"),
                ("GAUSSORM_DB_PASSWORD", "Gauss@123"),
                ("GAUSSORM_DB_HOST", "10.0.0.5"),
                ("GAUSSORM_DB_PORT", "15432"),
            ]),
        );
        let db = settings.database("default").unwrap();
        assert_eq!(db.name, "orders");
        assert_eq!(db.user, "omm");
        assert_eq!(db.password, "Gauss@123");
        assert_eq!(db.host, "10.0.0.5");
        assert_eq!(db.port, 15432);
    }

    #[test]
    fn test_overrides_invalid_port_ignored() {
        let mut settings = Settings::default();
        apply_overrides_from(&mut settings, env_of(&[("GAUSSORM_DB_PORT", "not-a-port")]));
        assert_eq!(settings.database("default").unwrap().port, 5432);
    }

    #[test]
    fn test_overrides_none_set() {
        let mut settings = Settings::default();
        apply_overrides_from(&mut settings, env_of(&[]));
        assert!(settings.debug);
        assert_eq!(settings.database("default").unwrap().engine, "opengauss");
    }

    // ── Helpers ─────────────────────────────────────────────────────

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": {"x": 1, "y": 2}});
        let over = serde_json::json!({"a": {"y": 3}});
        let merged = merge_json(base, over);
        assert_eq!(merged, serde_json::json!({"a": {"x": 1, "y": 3}}));
    }

    #[test]
    fn test_toml_to_json() {
        let value: toml::Value = toml::from_str("n = 1\nflag = true\nlist = [\"a\"]").unwrap();
        let json = toml_to_json(value);
        assert_eq!(json, serde_json::json!({"n": 1, "flag": true, "list": ["a"]}));
    }
}
