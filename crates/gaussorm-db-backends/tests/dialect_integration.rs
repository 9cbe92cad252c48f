//! Integration tests for the openGauss dialect.
//!
//! These tests drive the dialect the way a schema-migration layer would:
//! settings select the dialect through the registry, fields are resolved and
//! amended, and catalog checks run against an in-memory catalog.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use gaussorm_core::{settings_loader, OrmError, OrmResult};
use gaussorm_db::{Catalog, Dialect, DialectRegistry, FieldDescriptor, FieldKind};
use gaussorm_db_backends::{register_dialects, select_dialect, OpenGaussDialect};

// ── In-memory catalog ─────────────────────────────────────────────────

/// Answers the dialect's catalog queries from a fixed set of schema objects.
#[derive(Default)]
struct SchemaCatalog {
    database: String,
    tables: HashSet<String>,
    columns: HashSet<(String, String)>,
    indexes: HashSet<(String, String)>,
    foreign_keys: HashSet<(String, String)>,
}

impl SchemaCatalog {
    fn shop() -> Self {
        let pair = |a: &str, b: &str| (a.to_string(), b.to_string());
        Self {
            database: "shop".into(),
            tables: ["users", "orders"].iter().map(ToString::to_string).collect(),
            columns: [pair("users", "id"), pair("users", "email"), pair("orders", "user_id")]
                .into_iter()
                .collect(),
            indexes: [pair("users", "idx_users_email")].into_iter().collect(),
            foreign_keys: [pair("orders", "fk_orders_user_id")].into_iter().collect(),
        }
    }
}

#[async_trait::async_trait]
impl Catalog for SchemaCatalog {
    async fn query_count(&self, sql: &str, params: &[&str]) -> OrmResult<i64> {
        let key = |i: usize| params.get(i).copied().unwrap_or_default().to_string();
        let found = if sql.contains("pg_indexes") {
            self.indexes.contains(&(key(0), key(1)))
        } else if sql.contains("PG_CONSTRAINT") {
            self.foreign_keys.contains(&(key(0), key(1)))
        } else if sql.contains("PG_ATTRIBUTE") {
            self.columns.contains(&(key(0), key(1)))
        } else if sql.contains("pg_class") {
            self.tables.contains(&key(0))
        } else {
            return Err(OrmError::DatabaseError(format!("unexpected query: {sql}")));
        };
        Ok(i64::from(found))
    }

    async fn query_string(&self, _sql: &str, _params: &[&str]) -> OrmResult<String> {
        Ok(self.database.clone())
    }
}

fn registry_with(catalog: SchemaCatalog) -> DialectRegistry {
    let mut registry = DialectRegistry::new();
    register_dialects(&mut registry, Arc::new(catalog));
    registry
}

// ── Selection by configuration ────────────────────────────────────────

#[test]
fn test_dialect_selected_from_settings() {
    let settings = settings_loader::from_toml_str(
        r#"
        [databases.default]
        engine = "opengauss"
        name = "shop"
        "#,
    )
    .unwrap();

    let registry = registry_with(SchemaCatalog::shop());
    let engine = &settings.database("default").unwrap().engine;
    let dialect = select_dialect(&registry, engine).unwrap();
    assert_eq!(dialect.name(), OpenGaussDialect::NAME);
}

// ── Schema rendering ──────────────────────────────────────────────────

#[test]
fn test_create_table_columns() {
    let registry = registry_with(SchemaCatalog::default());
    let dialect = registry.get("opengauss").unwrap();

    let mut fields = vec![
        FieldDescriptor::new("id", FieldKind::Uint64).primary_key(),
        FieldDescriptor::new("email", FieldKind::String).tags("size:254;not null;unique"),
        FieldDescriptor::new("bio", FieldKind::String),
        FieldDescriptor::new("age", FieldKind::Int16),
        FieldDescriptor::new("balance", FieldKind::Float64).tags("default:0"),
        FieldDescriptor::new("token", FieldKind::byte_array("Uuid", 16)),
        FieldDescriptor::new("prefs", FieldKind::named_bytes("RawValue")),
        FieldDescriptor::new(
            "attrs",
            FieldKind::Map {
                type_name: "Hstore".into(),
            },
        ),
        FieldDescriptor::new("created_at", FieldKind::Timestamp),
    ];

    let mut columns = Vec::new();
    for field in &mut fields {
        let column_type = dialect.data_type_of(field).unwrap();
        field.apply(&column_type.amendments);
        columns.push(format!("{} {column_type}", dialect.quote(&field.name)));
    }

    let sql = format!("CREATE TABLE users ({})", columns.join(", "));
    assert_eq!(
        sql,
        "CREATE TABLE users (\"id\" bigserial, \
         \"email\" varchar(254) NOT NULL UNIQUE, \
         \"bio\" text, \
         \"age\" smallint, \
         \"balance\" numeric DEFAULT 0, \
         \"token\" uuid, \
         \"prefs\" jsonb, \
         \"attrs\" hstore, \
         \"created_at\" timestamp with time zone)"
    );

    // Only the primary key picked up the auto-increment marker.
    let marked: Vec<&str> = fields
        .iter()
        .filter(|f| f.tag_settings.contains("AUTO_INCREMENT"))
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(marked, vec!["id"]);
}

#[test]
fn test_unsupported_field_aborts_schema() {
    let registry = registry_with(SchemaCatalog::default());
    let dialect = registry.get("opengauss").unwrap();

    let fields = [
        FieldDescriptor::new("id", FieldKind::Int64).primary_key(),
        FieldDescriptor::new("events", FieldKind::Channel),
    ];
    let result: OrmResult<Vec<_>> = fields.iter().map(|f| dialect.data_type_of(f)).collect();
    let err = result.unwrap_err();
    assert!(err.is_fatal());
    assert!(err.to_string().contains("chan"));
}

// ── Insert identity ───────────────────────────────────────────────────

#[test]
fn test_insert_returning_statement() {
    let registry = registry_with(SchemaCatalog::default());
    let dialect = registry.get("opengauss").unwrap();
    assert!(!dialect.supports_last_insert_id());

    let columns = ["name", "email"];
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| dialect.bind_var(i)).collect();
    let sql = format!(
        "INSERT INTO users ({}){} VALUES ({}) {}",
        columns.join(","),
        dialect.last_insert_id_output_interstitial("users", "id", &columns),
        placeholders.join(","),
        dialect.last_insert_id_returning_suffix("users", "id"),
    );
    assert_eq!(
        sql,
        "INSERT INTO users (name,email) VALUES ($1,$2) RETURNING users.id"
    );
}

#[test]
fn test_key_names_and_fragments() {
    let registry = registry_with(SchemaCatalog::default());
    let dialect = registry.get("opengauss").unwrap();

    let index = dialect.build_key_name("idx", "users", &["email"]);
    assert_eq!(index, "idx_users_email");
    assert_eq!(dialect.remove_index_sql("users", &index), "DROP INDEX idx_users_email");
    assert_eq!(
        dialect.limit_and_offset_sql(Some(20), Some(40)),
        " LIMIT 20 OFFSET 40"
    );
}

// ── Catalog introspection ─────────────────────────────────────────────

#[test]
fn test_introspection_against_schema() {
    let registry = registry_with(SchemaCatalog::shop());
    let dialect = registry.get("opengauss").unwrap();

    tokio_test::block_on(async {
        assert!(dialect.has_table("users").await);
        assert!(!dialect.has_table("invoices").await);

        assert!(dialect.has_column("users", "email").await);
        assert!(!dialect.has_column("users", "phone").await);

        assert!(dialect.has_index("users", "idx_users_email").await);
        assert!(!dialect.has_index("orders", "idx_users_email").await);

        assert!(dialect.has_foreign_key("orders", "fk_orders_user_id").await);
        assert!(!dialect.has_foreign_key("users", "fk_orders_user_id").await);

        assert_eq!(dialect.current_database().await, "shop");
    });
}

#[test]
fn test_migration_skips_existing_objects() {
    let registry = registry_with(SchemaCatalog::shop());
    let dialect = registry.get("opengauss").unwrap();

    let wanted: HashMap<&str, Vec<&str>> = HashMap::from([
        ("users", vec!["id", "email", "phone"]),
        ("invoices", vec!["id"]),
    ]);

    let mut statements = tokio_test::block_on(async {
        let mut statements = Vec::new();
        for (table, columns) in &wanted {
            if !dialect.has_table(table).await {
                statements.push(format!("CREATE TABLE {table}"));
                continue;
            }
            for column in columns {
                if !dialect.has_column(table, column).await {
                    statements.push(format!("ALTER TABLE {table} ADD {column}"));
                }
            }
        }
        statements
    });
    statements.sort();

    assert_eq!(
        statements,
        vec!["ALTER TABLE users ADD phone", "CREATE TABLE invoices"]
    );
}

#[test]
fn test_unexpected_catalog_failure_reads_as_absent() {
    struct BrokenCatalog;

    #[async_trait::async_trait]
    impl Catalog for BrokenCatalog {
        async fn query_count(&self, _sql: &str, _params: &[&str]) -> OrmResult<i64> {
            Err(OrmError::OperationalError("pool timed out".into()))
        }
        async fn query_string(&self, _sql: &str, _params: &[&str]) -> OrmResult<String> {
            Err(OrmError::OperationalError("pool timed out".into()))
        }
    }

    let dialect = OpenGaussDialect::new(Arc::new(BrokenCatalog));
    tokio_test::block_on(async {
        assert!(!dialect.has_table("users").await);
        assert!(!dialect.has_foreign_key("orders", "fk").await);
        assert_eq!(dialect.current_database().await, "");
    });
}
