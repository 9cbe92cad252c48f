//! # gaussorm-db-backends
//!
//! Concrete dialects and catalog access for gaussorm.
//!
//! - [`OpenGaussDialect`] maps field descriptors to openGauss column types and
//!   answers catalog questions.
//! - [`PostgresCatalog`] (feature `postgres`) runs those catalog queries over a
//!   `deadpool-postgres` pool.
//!
//! Dialects are registered explicitly at startup with [`register_dialects`],
//! then selected by the engine name from the settings.

pub mod base;
pub mod opengauss;
#[cfg(feature = "postgres")]
pub mod postgresql;

use std::sync::Arc;

use gaussorm_core::{OrmError, OrmResult};
use gaussorm_db::{Catalog, Dialect, DialectRegistry};

pub use base::DatabaseConfig;
pub use opengauss::OpenGaussDialect;
#[cfg(feature = "postgres")]
pub use postgresql::PostgresCatalog;

/// Registers every dialect this crate provides, each introspecting through `catalog`.
pub fn register_dialects(registry: &mut DialectRegistry, catalog: Arc<dyn Catalog>) {
    registry.register(Arc::new(OpenGaussDialect::new(catalog)));
}

/// Returns the dialect registered under `engine`.
///
/// # Errors
///
/// Returns [`OrmError::ImproperlyConfigured`] if no dialect has that name.
pub fn select_dialect(registry: &DialectRegistry, engine: &str) -> OrmResult<Arc<dyn Dialect>> {
    registry.get(engine).ok_or_else(|| {
        OrmError::ImproperlyConfigured(format!(
            "unknown dialect '{engine}' (registered: {})",
            registry.names().join(", ")
        ))
    })
}

/// Builds the dialect for the database `alias` described in `settings`.
///
/// Creates the connection pool, registers the dialects against it, and picks
/// the one named by the alias's `engine`. No connection is opened until the
/// first catalog query.
///
/// # Errors
///
/// Returns an error if the alias is not configured, the engine is unknown,
/// or the pool cannot be created.
#[cfg(feature = "postgres")]
pub fn open(settings: &gaussorm_core::Settings, alias: &str) -> OrmResult<Arc<dyn Dialect>> {
    let db = settings.database(alias).ok_or_else(|| {
        OrmError::ImproperlyConfigured(format!("database alias '{alias}' is not configured"))
    })?;
    let config = DatabaseConfig::from_settings(db);
    let _span = gaussorm_core::logging::database_span(alias, &config.engine).entered();

    let catalog: Arc<dyn Catalog> = Arc::new(PostgresCatalog::from_config(&config)?);
    let mut registry = DialectRegistry::new();
    register_dialects(&mut registry, catalog);

    let dialect = select_dialect(&registry, &config.engine)?;
    tracing::info!(database = %config.name, "dialect ready");
    Ok(dialect)
}
