use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::claim_store::SqliteClaimStore;
use crate::db::initialize::init_db;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::profile::SqliteKvStore;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the claim store, with all pending migrations
///  - the local visitor profile
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.profile.clone(), cli.test)?;

    println!("⚙️  Initializing rCashOffer…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Claim store : {}", &cfg.database);
    println!("👤 Profile     : {}", &cfg.profile);

    let pool = DbPool::new(&cfg.database)?;
    let applied = init_db(&pool.conn)?;
    info(format!("Schema up to date ({} migration(s) applied).", applied));

    let store = SqliteClaimStore::from_pool(pool)?;
    SqliteKvStore::open(&cfg.profile)?;

    if let Err(e) = log::audit(
        &store.pool().conn,
        "init",
        "Database initialized",
        &format!("Claim store initialized at {}", &cfg.database),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    success("rCashOffer initialization completed!");
    Ok(())
}
