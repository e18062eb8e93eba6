pub mod purpose;
pub mod report;
pub mod student;
pub mod visit;
pub mod visit_status;
