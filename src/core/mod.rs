pub mod attendance;
pub mod calculator;
pub mod config;
pub mod log;
pub mod report;
pub mod students;

pub use attendance::AttendanceLogic;
pub use report::{ReportLogic, ReportWindow};
pub use students::StudentLogic;
