//! Schema migrations for the key-value store.
//!
//! A `_migrations` table records every applied version; each migration is a
//! SQL batch applied once, in ascending order.

use tokio_rusqlite::{Connection, params};

use super::Error;

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] =
    &[Migration { version: 1, name: "kv_store", sql: include_str!("../../migrations/001_kv_store.sql") }];

/// Apply pending migrations, returning how many ran.
///
/// # Errors
///
/// Returns an error if the bookkeeping table or a migration batch fails.
pub async fn run(conn: &Connection) -> Result<usize, Error> {
    let applied = conn
        .call(|conn| -> Result<usize, Error> {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS _migrations (
                    version INTEGER PRIMARY KEY,
                    name TEXT NOT NULL,
                    applied_at TEXT NOT NULL
                )",
            )?;

            let current: i64 = conn.query_row("SELECT COALESCE(MAX(version), 0) FROM _migrations", [], |row| row.get(0))?;

            let mut applied = 0;
            for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
                conn.execute_batch(migration.sql)
                    .map_err(|e| Error::MigrationFailed(format!("{} ({}): {e}", migration.version, migration.name)))?;
                conn.execute(
                    "INSERT INTO _migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
                    params![migration.version, migration.name, chrono::Utc::now().to_rfc3339()],
                )?;
                applied += 1;
            }

            Ok(applied)
        })
        .await
        .map_err(Error::from)?;

    if applied > 0 {
        tracing::debug!(applied, "applied key-value store migrations");
    }

    Ok(applied)
}
