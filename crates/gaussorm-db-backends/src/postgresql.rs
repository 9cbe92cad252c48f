//! Catalog access over `tokio-postgres` and `deadpool-postgres`.
//!
//! openGauss speaks the PostgreSQL wire protocol, so the stock driver is used
//! for the handful of scalar catalog queries the dialect needs.

use gaussorm_core::{OrmError, OrmResult};
use gaussorm_db::Catalog;
use tokio_postgres::types::ToSql;

use crate::base::DatabaseConfig;

/// A [`Catalog`] backed by a `deadpool-postgres` connection pool.
pub struct PostgresCatalog {
    pool: deadpool_postgres::Pool,
}

impl PostgresCatalog {
    /// Creates a new `PostgresCatalog` from a `deadpool-postgres` pool.
    pub const fn new(pool: deadpool_postgres::Pool) -> Self {
        Self { pool }
    }

    /// Creates a new catalog from a [`DatabaseConfig`].
    ///
    /// No connection is made until the first query.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be created.
    pub fn from_config(config: &DatabaseConfig) -> OrmResult<Self> {
        let mut pg_config = deadpool_postgres::Config::new();
        pg_config.dbname = Some(config.name.clone());
        pg_config.host = config.host.clone();
        pg_config.port = config.port;
        pg_config.user = config.user.clone();
        pg_config.password = config.password.clone();
        pg_config.application_name = config.options.get("application_name").cloned();
        pg_config.options = config.options.get("options").cloned();

        let pool = pg_config
            .create_pool(
                Some(deadpool_postgres::Runtime::Tokio1),
                tokio_postgres::NoTls,
            )
            .map_err(|e| OrmError::OperationalError(format!("Failed to create pool: {e}")))?;

        Ok(Self { pool })
    }

    /// Runs `sql` and returns its first row, if any.
    async fn first_row(
        &self,
        sql: &str,
        params: &[&str],
    ) -> OrmResult<Option<tokio_postgres::Row>> {
        let client = self
            .pool
            .get()
            .await
            .map_err(|e| OrmError::OperationalError(format!("Pool error: {e}")))?;

        let param_refs: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();

        let rows = client
            .query(sql, &param_refs)
            .await
            .map_err(|e| OrmError::DatabaseError(format!("{e}")))?;

        Ok(rows.into_iter().next())
    }
}

#[async_trait::async_trait]
impl Catalog for PostgresCatalog {
    async fn query_count(&self, sql: &str, params: &[&str]) -> OrmResult<i64> {
        match self.first_row(sql, params).await? {
            Some(row) => row
                .try_get::<_, i64>(0)
                .map_err(|e| OrmError::DatabaseError(format!("{e}"))),
            None => Ok(0),
        }
    }

    async fn query_string(&self, sql: &str, params: &[&str]) -> OrmResult<String> {
        match self.first_row(sql, params).await? {
            Some(row) => row
                .try_get::<_, Option<String>>(0)
                .map(Option::unwrap_or_default)
                .map_err(|e| OrmError::DatabaseError(format!("{e}"))),
            None => Ok(String::new()),
        }
    }
}

impl std::fmt::Debug for PostgresCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresCatalog")
            .field("max_size", &self.pool.status().max_size)
            .finish()
    }
}
