use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped with --test)
///  - the SQLite database with all pending migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let db_path = Config::init_all(cli.db.as_deref(), cli.test)?;

    info("Initializing attendlog…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Database    : {}", db_path.display()));

    let pool = DbPool::open(&db_path)?;

    pool.with_conn(|conn| {
        audit(
            conn,
            "init",
            "",
            &format!("Database initialized at {}", db_path.display()),
        );
        Ok(())
    })?;

    success(format!("Database initialized at {}", db_path.display()));
    Ok(())
}
