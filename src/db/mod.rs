//! Persistence for the single `entry` table, split into connection/schema
//! handling and the CRUD statements.

mod connection;
mod entries;

pub use connection::{
    ensure_schema, initialize, open_database, open_in_memory, schema_version, DATABASE_NAME,
    DATABASE_VERSION,
};
pub use entries::{delete_all_entries, fetch_entries, insert_entry, update_entry};
