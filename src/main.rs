//! Binary entry point: resolve paths, start logging, open the database once,
//! and hand the connection to the TUI for the rest of the process lifetime.
use feed_reader::{init_logging, open_database, run_app, App, AppPaths};

/// Storage failures anywhere in the run are fatal and surface here after the
/// terminal has been restored.
fn main() -> anyhow::Result<()> {
    let paths = AppPaths::from_home()?;
    let _logger = init_logging(&paths.log_dir)?;

    let conn = open_database(&paths.database)?;
    let mut app = App::new(conn)?;
    let result = run_app(&mut app);

    if let Err(err) = &result {
        log::error!("event=app_exit status=error error={err:#}");
    }
    result
}
