use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::AttendanceLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::core::calculator::duration::minutes_between;
use crate::utils::mins2readable;
use crate::utils::table::Table;
use crate::utils::time::{self, short_ts};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Active) {
        return Ok(());
    }

    let pool = DbPool::open(&cfg.database)?;
    let visits = AttendanceLogic::list_active(&pool)?;

    if visits.is_empty() {
        info("Nobody is checked in.");
        return Ok(());
    }

    header(format!("Active visitors: {}", visits.len()));

    let now = time::now();
    let mut table = Table::with_headers(&[
        "VISIT", "STUDENT", "NAME", "COURSE", "PURPOSE", "CHECK-IN", "ELAPSED",
    ]);
    for v in &visits {
        table.add_row(vec![
            v.id.to_string(),
            v.student_id.clone(),
            format!("{} {}", v.first_name, v.last_name),
            format!("{} {}-{}", v.course, v.year_level, v.section),
            v.purpose.to_string(),
            short_ts(&v.check_in),
            mins2readable(minutes_between(v.check_in, now), false),
        ]);
    }
    print!("{}", table.render());

    Ok(())
}
