use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AttendanceLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::time::format_ts;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Checkin {
        student_id,
        purpose,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database)?;
        let receipt = AttendanceLogic::check_in(&pool, student_id, purpose)?;

        success(format!(
            "Visit {} opened for {} ({}) at {}",
            receipt.id,
            receipt.student_name,
            receipt.purpose,
            format_ts(&receipt.check_in)
        ));
    }

    Ok(())
}
