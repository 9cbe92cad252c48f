//! The openGauss dialect.
//!
//! openGauss is PostgreSQL-derived: positional `$n` placeholders, serial
//! pseudo-types for identity columns, `RETURNING` instead of a last-insert-id
//! call, and a `pg_catalog` schema for introspection.

use std::sync::Arc;

use gaussorm_core::{OrmError, OrmResult};
use gaussorm_db::dialect::{
    field_can_auto_increment, parse_field_for_dialect, with_additional_type, ColumnType, Dialect,
    ParsedField,
};
use gaussorm_db::{Catalog, FieldAmendment, FieldDescriptor, FieldKind};

/// Strings shorter than this get `varchar(n)`; longer ones get `text`.
const MAX_VARCHAR_SIZE: i64 = 65532;

const HAS_INDEX_SQL: &str = "SELECT count(*) FROM pg_indexes WHERE tablename = $1 AND indexname = $2 AND schemaname = CURRENT_SCHEMA()";

const HAS_FOREIGN_KEY_SQL: &str = "SELECT count(pc.conname) FROM PG_CATALOG.PG_CONSTRAINT pc JOIN PG_CATALOG.PG_CLASS tc ON pc.CONRELID = tc.OID JOIN PG_CATALOG.PG_NAMESPACE ns ON tc.RELNAMESPACE = ns.OID WHERE ns.NSPNAME = CURRENT_SCHEMA() AND tc.RELNAME = $1 AND pc.CONNAME = $2 AND pc.CONTYPE = 'f'";

const HAS_TABLE_SQL: &str = "SELECT count(*) FROM pg_catalog.pg_class c JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace WHERE c.relname = $1 AND n.nspname = CURRENT_SCHEMA()";

// Not schema-scoped: matches any relation with this name in any schema.
const HAS_COLUMN_SQL: &str = "SELECT count(*) FROM PG_CATALOG.PG_CLASS c JOIN PG_CATALOG.PG_ATTRIBUTE a ON c.OID = a.attrelid WHERE c.relname = $1 AND a.attname = $2";

const CURRENT_DATABASE_SQL: &str = "SELECT CURRENT_DATABASE()";

/// The openGauss [`Dialect`].
pub struct OpenGaussDialect {
    catalog: Arc<dyn Catalog>,
}

impl OpenGaussDialect {
    /// The name this dialect registers under.
    pub const NAME: &'static str = "opengauss";

    /// Creates a dialect that introspects through `catalog`.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        Self { catalog }
    }

    /// Maps a field kind to a column type, or `None` if openGauss has no mapping.
    fn resolve_kind(field: &FieldDescriptor, parsed: &ParsedField) -> Option<ColumnType> {
        let sql_type = match &field.kind {
            FieldKind::Bool => "boolean".to_string(),
            FieldKind::Int8 | FieldKind::Int16 | FieldKind::Uint8 | FieldKind::Uint16 => {
                return Some(serial_or(field, "smallserial", "smallint"));
            }
            FieldKind::Int | FieldKind::Int32 | FieldKind::Uint | FieldKind::Uintptr => {
                return Some(serial_or(field, "serial", "integer"));
            }
            FieldKind::Int64 | FieldKind::Uint32 | FieldKind::Uint64 => {
                return Some(serial_or(field, "bigserial", "bigint"));
            }
            FieldKind::Float32 | FieldKind::Float64 => "numeric".to_string(),
            FieldKind::String => {
                // Unbounded text costs nothing extra here, so only an explicit size narrows it.
                let size = if parsed.size_declared { parsed.size } else { 0 };
                if size > 0 && size < MAX_VARCHAR_SIZE {
                    format!("varchar({size})")
                } else {
                    "text".to_string()
                }
            }
            FieldKind::Timestamp => "timestamp with time zone".to_string(),
            FieldKind::Map { type_name } if type_name == "Hstore" => "hstore".to_string(),
            kind @ FieldKind::Bytes { .. } => {
                if is_uuid(kind) {
                    "uuid".to_string()
                } else if is_json(kind) {
                    "jsonb".to_string()
                } else {
                    "bytea".to_string()
                }
            }
            _ => return None,
        };
        Some(ColumnType::new(sql_type))
    }

    async fn exists(&self, sql: &str, params: &[&str]) -> bool {
        match self.catalog.query_count(sql, params).await {
            Ok(count) => count > 0,
            Err(e) => {
                tracing::warn!(error = %e, sql, "catalog query failed; treating as absent");
                false
            }
        }
    }
}

impl std::fmt::Debug for OpenGaussDialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenGaussDialect").finish_non_exhaustive()
    }
}

fn serial_or(field: &FieldDescriptor, serial: &str, plain: &str) -> ColumnType {
    if field_can_auto_increment(field) {
        ColumnType::new(serial).with_amendment(FieldAmendment::auto_increment())
    } else {
        ColumnType::new(plain)
    }
}

/// A 16-byte array named `uuid` or `guid`.
fn is_uuid(kind: &FieldKind) -> bool {
    matches!(
        kind,
        FieldKind::Bytes {
            type_name: Some(name),
            fixed_len: Some(16),
        } if name.eq_ignore_ascii_case("uuid") || name.eq_ignore_ascii_case("guid")
    )
}

/// A byte sequence holding JSON text.
fn is_json(kind: &FieldKind) -> bool {
    matches!(
        kind,
        FieldKind::Bytes {
            type_name: Some(name),
            fixed_len: None,
        } if ["json", "jsonb", "rawvalue", "rawmessage"]
            .iter()
            .any(|candidate| name.eq_ignore_ascii_case(candidate))
    )
}

#[async_trait::async_trait]
impl Dialect for OpenGaussDialect {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn bind_var(&self, position: usize) -> String {
        format!("${position}")
    }

    fn data_type_of(&self, field: &FieldDescriptor) -> OrmResult<ColumnType> {
        let parsed = parse_field_for_dialect(field);

        let column_type = if parsed.sql_type.is_empty() {
            Self::resolve_kind(field, &parsed)
        } else {
            Some(ColumnType::new(parsed.sql_type.clone()))
        };

        let Some(mut column_type) = column_type else {
            tracing::error!(
                field = %field.name,
                type_name = field.kind.type_name(),
                kind = field.kind.kind_name(),
                "no openGauss column type for field"
            );
            return Err(OrmError::UnsupportedFieldType {
                type_name: field.kind.type_name().to_string(),
                kind: field.kind.kind_name().to_string(),
                dialect: Self::NAME.to_string(),
            });
        };

        column_type.sql_type = with_additional_type(&column_type.sql_type, &parsed.additional_type);
        tracing::debug!(field = %field.name, sql_type = %column_type.sql_type, "resolved column type");

        Ok(column_type)
    }

    async fn has_index(&self, table_name: &str, index_name: &str) -> bool {
        self.exists(HAS_INDEX_SQL, &[table_name, index_name]).await
    }

    async fn has_foreign_key(&self, table_name: &str, foreign_key_name: &str) -> bool {
        self.exists(HAS_FOREIGN_KEY_SQL, &[table_name, foreign_key_name])
            .await
    }

    async fn has_table(&self, table_name: &str) -> bool {
        self.exists(HAS_TABLE_SQL, &[table_name]).await
    }

    async fn has_column(&self, table_name: &str, column_name: &str) -> bool {
        self.exists(HAS_COLUMN_SQL, &[table_name, column_name]).await
    }

    async fn current_database(&self) -> String {
        match self.catalog.query_string(CURRENT_DATABASE_SQL, &[]).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(error = %e, "could not read current database name");
                String::new()
            }
        }
    }

    fn last_insert_id_output_interstitial(
        &self,
        _table_name: &str,
        _key: &str,
        _columns: &[&str],
    ) -> String {
        String::new()
    }

    fn last_insert_id_returning_suffix(&self, table_name: &str, key: &str) -> String {
        format!("RETURNING {table_name}.{key}")
    }

    fn supports_last_insert_id(&self) -> bool {
        false
    }
}
