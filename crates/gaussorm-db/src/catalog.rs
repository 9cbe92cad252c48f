//! The catalog seam between dialects and a live database.
//!
//! Dialects answer introspection questions with a single scalar query. The
//! [`Catalog`] trait is the minimal async interface they need; concrete
//! implementations live in `gaussorm-db-backends`.

use gaussorm_core::OrmResult;

/// Runs single-row, single-column catalog queries.
///
/// Parameters are bound positionally as text. A query that returns no row
/// yields the zero value (`0` or `""`); errors are reported faithfully and
/// it is up to the dialect whether to surface them.
#[async_trait::async_trait]
pub trait Catalog: Send + Sync {
    /// Runs a `count(...)` style query and returns the first column of the first row.
    async fn query_count(&self, sql: &str, params: &[&str]) -> OrmResult<i64>;

    /// Runs a query whose first column of the first row is text.
    async fn query_string(&self, sql: &str, params: &[&str]) -> OrmResult<String>;
}
