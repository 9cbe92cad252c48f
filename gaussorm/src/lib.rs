//! # gaussorm
//!
//! openGauss support for Rust ORMs.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on it to get
//! everything, or on individual crates for finer-grained control.
//!
//! ```
//! use std::sync::Arc;
//! use gaussorm::prelude::*;
//!
//! struct NoCatalog;
//!
//! #[gaussorm::async_trait]
//! impl Catalog for NoCatalog {
//!     async fn query_count(&self, _sql: &str, _params: &[&str]) -> OrmResult<i64> {
//!         Ok(0)
//!     }
//!     async fn query_string(&self, _sql: &str, _params: &[&str]) -> OrmResult<String> {
//!         Ok(String::new())
//!     }
//! }
//!
//! let mut registry = DialectRegistry::new();
//! gaussorm::db_backends::register_dialects(&mut registry, Arc::new(NoCatalog));
//!
//! let dialect = registry.get("opengauss").unwrap();
//! let id = FieldDescriptor::new("id", FieldKind::Int64).primary_key();
//! assert_eq!(dialect.data_type_of(&id).unwrap().sql_type, "bigserial");
//! ```

/// Error types, settings, and logging.
pub use gaussorm_core as core;

/// Field descriptors, the dialect contract, and the registry.
pub use gaussorm_db as db;

/// The openGauss dialect and catalog access.
pub use gaussorm_db_backends as db_backends;

pub use async_trait::async_trait;
pub use tokio;
pub use tracing;

/// Builds the dialect for `alias`, installing logging from the same settings first.
///
/// # Errors
///
/// See [`gaussorm_db_backends::open`].
#[cfg(feature = "postgres")]
pub fn connect(
    settings: &gaussorm_core::Settings,
    alias: &str,
) -> gaussorm_core::OrmResult<std::sync::Arc<dyn gaussorm_db::Dialect>> {
    gaussorm_core::logging::setup_logging(settings);
    gaussorm_db_backends::open(settings, alias)
}

/// Commonly used types.
pub mod prelude {
    pub use gaussorm_core::{OrmError, OrmResult, Settings};
    pub use gaussorm_db::{
        Catalog, ColumnType, Dialect, DialectRegistry, FieldAmendment, FieldDescriptor,
        FieldKind, TagSettings,
    };
    pub use gaussorm_db_backends::{DatabaseConfig, OpenGaussDialect};
}
