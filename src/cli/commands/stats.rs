use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{ReportLogic, ReportWindow};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::report::DashboardStats;
use crate::ui::messages::{header, info};
use crate::utils::formatting::pad_right;

const BAR_WIDTH: i64 = 30;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { days, months } = cmd {
        let defaults = cfg.report_window();
        let window = ReportWindow {
            days: days.unwrap_or(defaults.days),
            months: months.unwrap_or(defaults.months),
        };

        let pool = DbPool::open(&cfg.database)?;
        let stats = ReportLogic::stats(&pool, window)?;
        print_stats(&stats, window);
    }

    Ok(())
}

fn print_stats(stats: &DashboardStats, window: ReportWindow) {
    header("Library attendance");
    println!("  Total visits:    {}", stats.total_visits);
    println!("  Active visitors: {}\n", stats.active_visitors);

    header("Visits by purpose");
    print_bars(
        stats
            .visits_by_purpose
            .iter()
            .map(|p| (p.purpose.clone(), p.count)),
    );

    header("Students by course");
    print_bars(
        stats
            .course_distribution
            .iter()
            .map(|c| (c.course.clone(), c.count)),
    );

    header(format!("Daily visits (last {} days)", window.days));
    print_bars(
        stats
            .daily_visits
            .iter()
            .map(|d| (d.date.to_string(), d.visits)),
    );

    header(format!("Monthly trends (last {} months)", window.months));
    print_bars(
        stats
            .monthly_trends
            .iter()
            .map(|m| (m.month.clone(), m.visits)),
    );
}

/// Label, count and a proportional bar scaled on the largest count.
fn print_bars(rows: impl Iterator<Item = (String, i64)>) {
    let rows: Vec<(String, i64)> = rows.collect();
    if rows.is_empty() {
        info("No data.");
        println!();
        return;
    }

    let label_w = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, c)| *c).max().unwrap_or(0);

    for (label, count) in &rows {
        println!(
            "  {} {:>5} {}",
            pad_right(label, label_w),
            count,
            bar(*count, max)
        );
    }
    println!();
}

fn bar(count: i64, max: i64) -> String {
    if max <= 0 {
        return String::new();
    }
    let len = (count * BAR_WIDTH + max - 1) / max;
    "█".repeat(len.max(0) as usize)
}
