use crate::db::pool::DbPool;
use crate::db::queries::load_activity;
use crate::db::stats;
use crate::errors::AppResult;
use crate::models::report::{
    CourseCount, DailyCount, DashboardStats, ExportReport, MonthlyCount, PurposeCount,
};
use crate::utils::date::{self, days_back, months_back};
use chrono::NaiveDate;

/// Trailing windows used by the trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub days: u32,
    pub months: u32,
}

impl Default for ReportWindow {
    fn default() -> Self {
        Self { days: 7, months: 6 }
    }
}

/// Read-only statistics over the attendance history.
pub struct ReportLogic;

impl ReportLogic {
    pub fn total_visits(pool: &DbPool) -> AppResult<i64> {
        pool.with_conn(|conn| stats::total_visits(conn))
    }

    pub fn active_visitors(pool: &DbPool) -> AppResult<i64> {
        pool.with_conn(|conn| stats::active_visitors(conn))
    }

    pub fn visits_by_purpose(pool: &DbPool) -> AppResult<Vec<PurposeCount>> {
        pool.with_conn(|conn| stats::visits_by_purpose(conn))
    }

    pub fn course_distribution(pool: &DbPool) -> AppResult<Vec<CourseCount>> {
        pool.with_conn(|conn| stats::course_distribution(conn))
    }

    /// Visits per day over the last `days` days, anchored on `today`.
    pub fn daily_visits(pool: &DbPool, today: NaiveDate, days: u32) -> AppResult<Vec<DailyCount>> {
        let since = days_back(today, days);
        pool.with_conn(|conn| stats::daily_visits(conn, &since))
    }

    /// Visits per month over the last `months` months, anchored on `today`.
    pub fn monthly_trends(
        pool: &DbPool,
        today: NaiveDate,
        months: u32,
    ) -> AppResult<Vec<MonthlyCount>> {
        let since = months_back(today, months);
        pool.with_conn(|conn| stats::monthly_trends(conn, &since))
    }

    /// Dashboard report anchored on the server's local date.
    pub fn stats(pool: &DbPool, window: ReportWindow) -> AppResult<DashboardStats> {
        Self::stats_at(pool, window, date::today())
    }

    /// All six aggregates. Each query runs on its own connection and the
    /// results are joined once every query has finished.
    pub fn stats_at(
        pool: &DbPool,
        window: ReportWindow,
        today: NaiveDate,
    ) -> AppResult<DashboardStats> {
        let ((total, active), ((purposes, courses), (daily, monthly))) = rayon::join(
            || {
                rayon::join(
                    || Self::total_visits(pool),
                    || Self::active_visitors(pool),
                )
            },
            || {
                rayon::join(
                    || {
                        rayon::join(
                            || Self::visits_by_purpose(pool),
                            || Self::course_distribution(pool),
                        )
                    },
                    || {
                        rayon::join(
                            || Self::daily_visits(pool, today, window.days),
                            || Self::monthly_trends(pool, today, window.months),
                        )
                    },
                )
            },
        );

        Ok(DashboardStats {
            total_visits: total?,
            active_visitors: active?,
            visits_by_purpose: purposes?,
            course_distribution: courses?,
            daily_visits: daily?,
            monthly_trends: monthly?,
        })
    }

    /// Row-level activity listing plus the two headline counters.
    pub fn export_report(pool: &DbPool) -> AppResult<ExportReport> {
        pool.with_conn(|conn| {
            Ok(ExportReport {
                activities: load_activity(conn)?,
                total_visits: stats::total_visits(conn)?,
                active_visitors: stats::active_visitors(conn)?,
            })
        })
    }
}
