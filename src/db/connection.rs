use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};
use rusqlite::Connection;

/// SQLite file name stored inside the application data directory.
pub const DATABASE_NAME: &str = "FeedReader.db";
/// Schema version mirrored into `PRAGMA user_version`. Bumping it wipes the
/// `entry` table on the next open; there are no migration scripts.
pub const DATABASE_VERSION: u32 = 1;

const SQL_CREATE_ENTRIES: &str = "CREATE TABLE IF NOT EXISTS entry (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    subtitle TEXT
)";
const SQL_DELETE_ENTRIES: &str = "DROP TABLE IF EXISTS entry";

/// Open (or create) the database file at `path` and bring the schema up to
/// [`DATABASE_VERSION`].
pub fn open_database(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let mut conn = Connection::open(path).context("failed to open SQLite database")?;
    initialize(&mut conn)?;

    info!(
        "event=db_open mode=file path={} version={} duration_ms={}",
        path.display(),
        DATABASE_VERSION,
        started_at.elapsed().as_millis()
    );
    Ok(conn)
}

/// In-memory variant of [`open_database`], handy for tests and throwaway runs.
pub fn open_in_memory() -> Result<Connection> {
    let mut conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    initialize(&mut conn)?;
    Ok(conn)
}

/// Make sure the `entry` table exists at the current schema version.
pub fn initialize(conn: &mut Connection) -> Result<()> {
    ensure_schema(conn, DATABASE_VERSION)
}

/// Create the table, or drop and recreate it when the stored version differs
/// from `version`.
///
/// This is a destructive upgrade: any mismatch, upward or downward, discards
/// every row. A fresh file (version 0) simply gets the table. The check and
/// the DDL share one transaction so the stored version never disagrees with
/// the table that exists.
pub fn ensure_schema(conn: &mut Connection, version: u32) -> Result<()> {
    let tx = conn
        .transaction()
        .context("failed to begin schema transaction")?;

    let current: u32 = tx
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .context("failed to read schema version")?;

    if current != 0 && current != version {
        warn!(
            "event=db_destructive_upgrade table=entry from_version={current} to_version={version}"
        );
        tx.execute(SQL_DELETE_ENTRIES, [])
            .context("failed to drop entry table")?;
    }

    tx.execute(SQL_CREATE_ENTRIES, [])
        .context("failed to create entry table")?;

    if current != version {
        tx.execute_batch(&format!("PRAGMA user_version = {version}"))
            .context("failed to record schema version")?;
    }

    tx.commit().context("failed to commit schema changes")
}

/// Read the version stored in `PRAGMA user_version`.
pub fn schema_version(conn: &Connection) -> Result<u32> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .context("failed to read schema version")
}
