//! Core library surface for the Feed Reader TUI: a single SQLite table of
//! entries with add, update, delete-all and reload actions.
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod ui;

/// Persistence entry points used by `main.rs` and the integration tests.
pub use db::{
    delete_all_entries, fetch_entries, initialize, insert_entry, open_database, update_entry,
};

pub use config::AppPaths;
pub use logging::init_logging;
pub use models::Entry;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
