//! Settings for gaussorm.
//!
//! [`Settings`] holds the logging configuration and the named database
//! connections. The database `engine` selects a dialect from the registry by
//! name, so switching databases is a configuration change, not a code change.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The alias used when no explicit database alias is requested.
pub const DEFAULT_DB_ALIAS: &str = "default";

/// Database connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// The dialect name registered for this database (e.g. `opengauss`).
    pub engine: String,
    /// The database name.
    pub name: String,
    /// The database user.
    pub user: String,
    /// The database password.
    pub password: String,
    /// The database host.
    pub host: String,
    /// The database port.
    pub port: u16,
    /// Additional engine-specific options.
    pub options: HashMap<String, String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            engine: "opengauss".to_string(),
            name: "postgres".to_string(),
            user: String::new(),
            password: String::new(),
            host: "localhost".to_string(),
            port: 5432,
            options: HashMap::new(),
        }
    }
}

/// The complete set of settings.
///
/// # Examples
///
/// ```
/// use gaussorm_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.database("default").unwrap().engine, "opengauss");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Whether debug mode is enabled. Controls the log format.
    pub debug: bool,

    /// The log filter directive (e.g. "info", "gaussorm_db=debug").
    pub log_level: String,

    /// Database configurations, keyed by alias (e.g. "default").
    pub databases: HashMap<String, DatabaseSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut databases = HashMap::new();
        databases.insert(DEFAULT_DB_ALIAS.to_string(), DatabaseSettings::default());

        Self {
            debug: true,
            log_level: "info".to_string(),
            databases,
        }
    }
}

impl Settings {
    /// Returns the database configuration for the given alias.
    pub fn database(&self, alias: &str) -> Option<&DatabaseSettings> {
        self.databases.get(alias)
    }

    /// Returns the configuration for `alias`, inserting defaults if it is missing.
    pub fn database_mut(&mut self, alias: &str) -> &mut DatabaseSettings {
        self.databases.entry(alias.to_string()).or_default()
    }
}
