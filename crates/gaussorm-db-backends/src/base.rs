//! Connection configuration shared by the backends.

use std::collections::HashMap;

use gaussorm_core::DatabaseSettings;

/// Configuration for connecting to a database.
///
/// This struct holds the connection parameters needed to reach the server
/// and the name of the dialect that should talk to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// The dialect name (e.g. `opengauss`).
    pub engine: String,
    /// The database name.
    pub name: String,
    /// The database host.
    pub host: Option<String>,
    /// The database port.
    pub port: Option<u16>,
    /// The database user.
    pub user: Option<String>,
    /// The database password.
    pub password: Option<String>,
    /// Additional connection options.
    pub options: HashMap<String, String>,
}

impl DatabaseConfig {
    /// Creates a configuration for an openGauss database.
    pub fn opengauss(
        name: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            engine: "opengauss".to_string(),
            name: name.into(),
            host: Some(host.into()),
            port: Some(port),
            user: Some(user.into()),
            password: Some(password.into()),
            options: HashMap::new(),
        }
    }

    /// Builds a configuration from loaded settings. Empty strings and a zero
    /// port become `None` so the driver falls back to its own defaults.
    pub fn from_settings(settings: &DatabaseSettings) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            engine: settings.engine.clone(),
            name: settings.name.clone(),
            host: non_empty(&settings.host),
            port: (settings.port != 0).then_some(settings.port),
            user: non_empty(&settings.user),
            password: non_empty(&settings.password),
            options: settings.options.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_config_opengauss() {
        let cfg = DatabaseConfig::opengauss("shop", "localhost", 5432, "omm", "pass");
        assert_eq!(cfg.engine, "opengauss");
        assert_eq!(cfg.name, "shop");
        assert_eq!(cfg.host.as_deref(), Some("localhost"));
        assert_eq!(cfg.port, Some(5432));
        assert_eq!(cfg.user.as_deref(), Some("omm"));
        assert_eq!(cfg.password.as_deref(), Some("pass"));
        assert!(cfg.options.is_empty());
    }

    #[test]
    fn test_from_settings() {
        let mut settings = DatabaseSettings {
            name: "inventory".into(),
            user: "gaussdb".into(),
            port: 15400,
            ..DatabaseSettings::default()
        };
        settings.options.insert("application_name".into(), "gaussorm".into());

        let cfg = DatabaseConfig::from_settings(&settings);
        assert_eq!(cfg.engine, "opengauss");
        assert_eq!(cfg.name, "inventory");
        assert_eq!(cfg.host.as_deref(), Some("localhost"));
        assert_eq!(cfg.port, Some(15400));
        assert_eq!(cfg.user.as_deref(), Some("gaussdb"));
        assert!(cfg.password.is_none());
        assert_eq!(cfg.options.get("application_name").unwrap(), "gaussorm");
    }

    #[test]
    fn test_from_settings_blank_values() {
        let settings = DatabaseSettings {
            host: String::new(),
            port: 0,
            ..DatabaseSettings::default()
        };
        let cfg = DatabaseConfig::from_settings(&settings);
        assert!(cfg.host.is_none());
        assert!(cfg.port.is_none());
    }
}
