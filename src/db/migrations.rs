//! Schema setup and connection pragmas for the result database.

use sqlx::sqlite::{SqliteConnection, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

const SCHEMA: &str = include_str!("schema.sql");

/// Applied to every pooled connection. Stats and ranking rows reference
/// fighters, so foreign keys must be on. WAL lets ranking reads run beside
/// the single writer, and `busy_timeout` makes write-first statements wait
/// for that writer instead of failing.
const PRAGMAS: &[&str] = &[
    "PRAGMA foreign_keys = ON",
    "PRAGMA journal_mode = WAL",
    "PRAGMA busy_timeout = 5000",
    "PRAGMA synchronous = NORMAL",
];

/// Open (creating if needed) the database at `db_path` and bring its schema
/// up to date.
pub async fn init_db(db_path: &str) -> Result<SqlitePool, sqlx::Error> {
    if let Some(dir) = Path::new(db_path).parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).ok();
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .after_connect(|conn, _meta| Box::pin(async move { apply_pragmas(conn).await }))
        .connect(&format!("sqlite:{db_path}?mode=rwc"))
        .await?;

    run_migrations(&pool).await?;
    info!(db_path, "Result database ready");
    Ok(pool)
}

/// Apply the embedded schema. Every statement is `IF NOT EXISTS`.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let statements = SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty());
    for statement in statements {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

async fn apply_pragmas(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    for pragma in PRAGMAS {
        sqlx::query(pragma).execute(&mut *conn).await?;
    }
    Ok(())
}
