//! Domain model that mirrors the single `entry` table. Entries are plain data
//! holders; the persistence layer fills them and the TUI renders them.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// One row of the `entry` table.
pub struct Entry {
    /// Rowid assigned by SQLite on insert. Updates are routed by this value.
    pub id: i64,
    /// Headline text. Stored nullable; a `NULL` column loads as `""`.
    pub title: String,
    /// Secondary text, same storage rules as `title`.
    pub subtitle: String,
}

impl fmt::Display for Entry {
    /// The row text rendered in the entry list.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Title: {}, Subtitle: {}",
            self.id, self.title, self.subtitle
        )
    }
}
