use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Initialize the claim store.
/// Delegates all schema creation / upgrades to the migration engine.
/// Returns how many migrations were applied.
pub fn init_db(conn: &Connection) -> AppResult<usize> {
    Ok(run_pending_migrations(conn)?)
}
