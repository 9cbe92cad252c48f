//! Core error types for gaussorm.
//!
//! [`OrmError`] covers database, schema-mapping, configuration, and IO
//! failures. Catalog introspection in the dialect layer collapses
//! database errors into "not found"; everywhere else they propagate as
//! [`OrmResult`].

use thiserror::Error;

/// The primary error type for gaussorm.
#[derive(Error, Debug)]
pub enum OrmError {
    // ── Database ─────────────────────────────────────────────────────

    /// A query failed on the server.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// An operational database error (connection failure, pool exhaustion, etc.).
    #[error("Operational error: {0}")]
    OperationalError(String),

    // ── Schema mapping ───────────────────────────────────────────────

    /// A field's value kind has no column type in the selected dialect.
    ///
    /// This is a schema definition error and is not meant to be retried.
    #[error("invalid sql type {type_name} ({kind}) for {dialect}")]
    UnsupportedFieldType {
        /// The host type name of the offending field.
        type_name: String,
        /// The logical kind of the offending field.
        kind: String,
        /// The dialect that rejected it.
        dialect: String,
    },

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The framework is improperly configured.
    #[error("Improperly configured: {0}")]
    ImproperlyConfigured(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl OrmError {
    /// Returns `true` for errors that indicate a broken schema or configuration
    /// rather than a transient database condition.
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFieldType { .. }
                | Self::ConfigurationError(_)
                | Self::ImproperlyConfigured(_)
        )
    }
}

/// A convenience type alias for `Result<T, OrmError>`.
pub type OrmResult<T> = Result<T, OrmError>;
