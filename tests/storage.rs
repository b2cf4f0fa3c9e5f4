use feed_reader::db::{
    delete_all_entries, ensure_schema, fetch_entries, initialize, insert_entry, open_database,
    open_in_memory, schema_version, update_entry, DATABASE_VERSION,
};
use rusqlite::Connection;

#[test]
fn load_after_no_inserts_is_empty() {
    let conn = open_in_memory().unwrap();
    assert!(fetch_entries(&conn).unwrap().is_empty());
}

#[test]
fn insert_adds_one_row_with_a_larger_id() {
    let conn = open_in_memory().unwrap();
    let first = insert_entry(&conn, "one", "1").unwrap();
    let before = fetch_entries(&conn).unwrap();

    let second = insert_entry(&conn, "two", "2").unwrap();
    let after = fetch_entries(&conn).unwrap();

    assert_eq!(after.len(), before.len() + 1);
    assert!(second > first);
    assert!(before.iter().all(|entry| entry.id < second));
}

#[test]
fn ids_keep_growing_after_delete_all() {
    let conn = open_in_memory().unwrap();
    let old = insert_entry(&conn, "a", "b").unwrap();
    delete_all_entries(&conn).unwrap();

    let new = insert_entry(&conn, "c", "d").unwrap();
    assert!(new > old);
}

#[test]
fn load_returns_rows_in_insertion_order() {
    let conn = open_in_memory().unwrap();
    for title in ["first", "second", "third"] {
        insert_entry(&conn, title, "x").unwrap();
    }

    let titles: Vec<String> = fetch_entries(&conn)
        .unwrap()
        .into_iter()
        .map(|entry| entry.title)
        .collect();
    assert_eq!(titles, ["first", "second", "third"]);
}

#[test]
fn insert_then_update_round_trip() {
    let conn = open_in_memory().unwrap();
    let id = insert_entry(&conn, "A", "B").unwrap();

    let entries = fetch_entries(&conn).unwrap();
    assert!(entries
        .iter()
        .any(|e| e.id == id && e.title == "A" && e.subtitle == "B"));

    assert_eq!(update_entry(&conn, id, "C", "D").unwrap(), 1);

    let entries = fetch_entries(&conn).unwrap();
    assert!(entries
        .iter()
        .any(|e| e.id == id && e.title == "C" && e.subtitle == "D"));
    assert!(!entries.iter().any(|e| e.title == "A" || e.subtitle == "B"));
}

#[test]
fn update_leaves_other_rows_untouched() {
    let conn = open_in_memory().unwrap();
    let target = insert_entry(&conn, "target", "t").unwrap();
    insert_entry(&conn, "other", "o").unwrap();
    let before = fetch_entries(&conn).unwrap();

    update_entry(&conn, target, "changed", "c").unwrap();
    let after = fetch_entries(&conn).unwrap();

    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(after.iter()) {
        if old.id == target {
            assert_eq!(new.title, "changed");
            assert_eq!(new.subtitle, "c");
        } else {
            assert_eq!(old, new);
        }
    }
}

#[test]
fn update_missing_id_changes_nothing() {
    let conn = open_in_memory().unwrap();
    insert_entry(&conn, "A", "B").unwrap();
    let before = fetch_entries(&conn).unwrap();

    assert_eq!(update_entry(&conn, 4242, "C", "D").unwrap(), 0);
    assert_eq!(fetch_entries(&conn).unwrap(), before);
}

#[test]
fn delete_all_empties_the_table() {
    let conn = open_in_memory().unwrap();
    assert_eq!(delete_all_entries(&conn).unwrap(), 0);
    assert!(fetch_entries(&conn).unwrap().is_empty());

    insert_entry(&conn, "A", "B").unwrap();
    insert_entry(&conn, "C", "D").unwrap();
    assert_eq!(delete_all_entries(&conn).unwrap(), 2);
    assert!(fetch_entries(&conn).unwrap().is_empty());
}

#[test]
fn initialize_twice_keeps_rows() {
    let mut conn = open_in_memory().unwrap();
    insert_entry(&conn, "A", "B").unwrap();
    let before = fetch_entries(&conn).unwrap();

    initialize(&mut conn).unwrap();
    initialize(&mut conn).unwrap();

    assert_eq!(fetch_entries(&conn).unwrap(), before);
    assert_eq!(schema_version(&conn).unwrap(), DATABASE_VERSION);
}

#[test]
fn reopening_the_same_file_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("FeedReader.db");

    let conn = open_database(&path).unwrap();
    let id = insert_entry(&conn, "persisted", "row").unwrap();
    drop(conn);

    let conn = open_database(&path).unwrap();
    let entries = fetch_entries(&conn).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id, id);
    assert_eq!(entries[0].title, "persisted");
}

#[test]
fn version_bump_drops_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("FeedReader.db");

    let mut conn = open_database(&path).unwrap();
    insert_entry(&conn, "old", "data").unwrap();

    ensure_schema(&mut conn, DATABASE_VERSION + 1).unwrap();

    assert!(fetch_entries(&conn).unwrap().is_empty());
    assert_eq!(schema_version(&conn).unwrap(), DATABASE_VERSION + 1);
    insert_entry(&conn, "new", "data").unwrap();
    assert_eq!(fetch_entries(&conn).unwrap().len(), 1);
}

#[test]
fn version_change_downward_also_recreates_the_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("FeedReader.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE entry (_id INTEGER PRIMARY KEY, title TEXT, subtitle TEXT);
         INSERT INTO entry (title, subtitle) VALUES ('from', 'future');
         PRAGMA user_version = 99;",
    )
    .unwrap();
    drop(conn);

    let conn = open_database(&path).unwrap();
    assert!(fetch_entries(&conn).unwrap().is_empty());
    assert_eq!(schema_version(&conn).unwrap(), DATABASE_VERSION);
}

#[test]
fn fresh_file_records_current_version() {
    let dir = tempfile::tempdir().unwrap();
    let conn = open_database(dir.path().join("FeedReader.db")).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), DATABASE_VERSION);

    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'entry')",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}
