use anyhow::{Context, Result};
use log::debug;
use rusqlite::{params, Connection};

use crate::models::Entry;

/// Insert one row and return the id SQLite assigned to it.
pub fn insert_entry(conn: &Connection, title: &str, subtitle: &str) -> Result<i64> {
    conn.execute(
        "INSERT INTO entry (title, subtitle) VALUES (?1, ?2)",
        params![title, subtitle],
    )
    .context("failed to insert entry")?;

    let id = conn.last_insert_rowid();
    debug!("event=entry_insert id={id} title={title:?} subtitle={subtitle:?}");
    Ok(id)
}

/// Snapshot every row. There is no `ORDER BY`; SQLite hands rows back in
/// rowid order for this table, which is insertion order.
pub fn fetch_entries(conn: &Connection) -> Result<Vec<Entry>> {
    let mut stmt = conn
        .prepare("SELECT _id, title, subtitle FROM entry")
        .context("failed to prepare entry query")?;

    let entries = stmt
        .query_map([], |row| {
            Ok(Entry {
                id: row.get(0)?,
                title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                subtitle: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            })
        })
        .context("failed to load entries")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect entries")?;

    debug!("event=entry_load count={}", entries.len());
    Ok(entries)
}

/// Overwrite title and subtitle for `id`. An unknown id touches nothing and
/// returns `Ok(0)`.
pub fn update_entry(conn: &Connection, id: i64, title: &str, subtitle: &str) -> Result<usize> {
    let updated = conn
        .execute(
            "UPDATE entry SET title = ?1, subtitle = ?2 WHERE _id = ?3",
            params![title, subtitle, id],
        )
        .context("failed to update entry")?;

    debug!("event=entry_update id={id} rows={updated}");
    Ok(updated)
}

/// Remove every row.
pub fn delete_all_entries(conn: &Connection) -> Result<usize> {
    let deleted = conn
        .execute("DELETE FROM entry", [])
        .context("failed to delete entries")?;

    debug!("event=entry_delete_all rows={deleted}");
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn fresh_database_loads_nothing() {
        let conn = open_in_memory().unwrap();
        assert!(fetch_entries(&conn).unwrap().is_empty());
    }

    #[test]
    fn null_columns_load_as_empty_strings() {
        let conn = open_in_memory().unwrap();
        conn.execute("INSERT INTO entry (title, subtitle) VALUES (NULL, 'only sub')", [])
            .unwrap();

        let entries = fetch_entries(&conn).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "");
        assert_eq!(entries[0].subtitle, "only sub");
    }

    #[test]
    fn update_unknown_id_reports_zero_rows() {
        let conn = open_in_memory().unwrap();
        insert_entry(&conn, "a", "b").unwrap();

        assert_eq!(update_entry(&conn, 999, "x", "y").unwrap(), 0);
        let entries = fetch_entries(&conn).unwrap();
        assert_eq!(entries[0].title, "a");
        assert_eq!(entries[0].subtitle, "b");
    }

    #[test]
    fn delete_all_reports_row_count() {
        let conn = open_in_memory().unwrap();
        insert_entry(&conn, "a", "b").unwrap();
        insert_entry(&conn, "c", "d").unwrap();

        assert_eq!(delete_all_entries(&conn).unwrap(), 2);
        assert_eq!(delete_all_entries(&conn).unwrap(), 0);
    }
}
