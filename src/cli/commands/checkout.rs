use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AttendanceLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkout { visit_id } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let receipt = AttendanceLogic::check_out(&pool, *visit_id)?;

        // unknown or already-closed ids are not an error
        if receipt.updated == 0 {
            warning(format!("No open visit with id {visit_id}; nothing changed."));
        } else {
            success(format!("{} (visit {visit_id})", receipt.message));
        }
    }

    Ok(())
}
