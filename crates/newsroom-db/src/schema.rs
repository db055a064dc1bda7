//! Schema bootstrap
//!
//! The schema is applied once when the process starts, never while serving
//! requests. Every statement is idempotent, so running it against an
//! already-initialized database is a no-op.

use sqlx::PgPool;
use tracing::{info, instrument};

/// DDL for the reaction tables
const INIT_SQL: &str = include_str!("../migrations/0001_init.sql");

/// Advisory lock key serializing concurrent bootstraps (e.g. parallel test binaries)
const SCHEMA_LOCK_KEY: i64 = 0x6e65_7773_726f_6f6d;

/// Create the reaction tables if they do not exist
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(SCHEMA_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    sqlx::raw_sql(INIT_SQL).execute(&mut *tx).await?;

    tx.commit().await?;

    info!("Database schema ready");
    Ok(())
}
