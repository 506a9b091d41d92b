//! Schema convention checks run against the migrated database.
//!
//! These guard the conventions the repository layer depends on:
//! - Every primary key is a bigint so `DbId = i64` always fits
//! - Every timestamp column is timestamptz
//! - Unique constraints carry the `uq_` prefix that
//!   `classify_sqlx_error` in the API crate keys on for 409 responses
//! - Every foreign key column has an index

use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_all_pks_are_bigint(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, data_type) in &rows {
        assert_eq!(
            data_type, "bigint",
            "Table {table}.id should be bigint, got {data_type}"
        );
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_all_timestamp_columns_are_timestamptz(pool: PgPool) {
    let rows: Vec<(String, String, String)> = sqlx::query_as(
        "SELECT table_name, column_name, data_type
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND table_name != '_sqlx_migrations'
           AND (column_name LIKE '%_at' OR column_name LIKE '%_date')
           AND column_name != 'session_date'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, column, data_type) in &rows {
        assert_eq!(
            data_type, "timestamp with time zone",
            "Column {table}.{column} should be timestamptz, got {data_type}"
        );
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unique_constraints_use_uq_prefix(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, constraint_name
         FROM information_schema.table_constraints
         WHERE table_schema = 'public'
           AND constraint_type = 'UNIQUE'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!rows.is_empty());
    for (table, constraint) in &rows {
        assert!(
            constraint.starts_with("uq_"),
            "Constraint {constraint} on {table} should start with uq_"
        );
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_foreign_key_columns_are_indexed(pool: PgPool) {
    let fks: Vec<(String, String)> = sqlx::query_as(
        "SELECT tc.table_name, kcu.column_name
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
           ON tc.constraint_name = kcu.constraint_name
         WHERE tc.table_schema = 'public'
           AND tc.constraint_type = 'FOREIGN KEY'
         ORDER BY tc.table_name, kcu.column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(!fks.is_empty());
    for (table, column) in &fks {
        let indexed: Option<(String,)> = sqlx::query_as(
            "SELECT indexname
             FROM pg_indexes
             WHERE schemaname = 'public'
               AND tablename = $1
               AND indexdef LIKE '%' || $2 || '%'
             LIMIT 1",
        )
        .bind(table)
        .bind(column)
        .fetch_optional(&pool)
        .await
        .unwrap();

        assert!(
            indexed.is_some(),
            "Foreign key column {table}.{column} has no index"
        );
    }
}
