use super::{purpose::Purpose, visit_status::VisitStatus};
use crate::core::calculator::duration::minutes_between;
use chrono::NaiveDateTime;
use serde::Serialize;

/// One row of `attendance_logs`: a single stay in the library.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Visit {
    pub id: i64,
    pub student_id: i64,                  // ⇔ students.id (internal identity)
    pub purpose: String,                  // ⇔ attendance_logs.purpose (display string)
    pub check_in: NaiveDateTime,          // ⇔ TEXT "YYYY-MM-DD HH:MM:SS", local time
    pub check_out: Option<NaiveDateTime>, // NULL while the visit is open
}

impl Visit {
    pub fn status(&self) -> VisitStatus {
        VisitStatus::from_check_out(self.check_out.as_ref())
    }

    pub fn is_active(&self) -> bool {
        self.check_out.is_none()
    }

    /// Whole minutes spent so far: up to check-out, or up to `now` while open.
    pub fn duration_minutes(&self, now: NaiveDateTime) -> i64 {
        minutes_between(self.check_in, self.check_out.unwrap_or(now))
    }
}

/// Visit plus the values derived from it, as shown on a student profile.
#[derive(Debug, Clone, Serialize)]
pub struct VisitSummary {
    #[serde(flatten)]
    pub visit: Visit,
    pub status: VisitStatus,
    pub duration_minutes: i64,
}

impl VisitSummary {
    pub fn derive(visit: Visit, now: NaiveDateTime) -> Self {
        let status = visit.status();
        let duration_minutes = visit.duration_minutes(now);
        Self {
            visit,
            status,
            duration_minutes,
        }
    }
}

/// Open visit joined with the visiting student's identity.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveVisit {
    pub id: i64,
    pub purpose: String,
    pub check_in: NaiveDateTime,
    pub student_id: String, // external identifier
    pub first_name: String,
    pub last_name: String,
    pub course: String,
    pub year_level: i64,
    pub section: String,
}

/// Returned by a successful check-in.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInReceipt {
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub purpose: Purpose,
    pub check_in: NaiveDateTime,
}

/// Returned by a check-out. `updated == 0` means no open visit had that id.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutReceipt {
    pub visit_id: i64,
    pub updated: usize,
    pub message: String,
}
