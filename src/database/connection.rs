use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

const DEFAULT_DATABASE_PATH: &str = "flex_reviews.db";

/// Open the review store named by `DATABASE_PATH` (default `flex_reviews.db`).
/// SQLite ships with foreign keys off, and `review_categories` relies on the
/// cascade from `reviews`, so every pooled connection enables them on open.
pub fn create_pool() -> Result<DbPool> {
    let path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| DEFAULT_DATABASE_PATH.to_string());
    let manager = SqliteConnectionManager::file(&path).with_init(enable_foreign_keys);
    r2d2::Pool::builder()
        .build(manager)
        .with_context(|| format!("Failed to create connection pool for {path}"))
}

pub(crate) fn enable_foreign_keys(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}
