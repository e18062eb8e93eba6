use serde::Serialize;
use std::fmt;

/// Derived state of a visit: open until a check-out is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VisitStatus {
    Active,
    Completed,
}

impl VisitStatus {
    pub fn from_check_out<T>(check_out: Option<&T>) -> Self {
        match check_out {
            None => VisitStatus::Active,
            Some(_) => VisitStatus::Completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VisitStatus::Active => "Active",
            VisitStatus::Completed => "Completed",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, VisitStatus::Active)
    }
}

impl fmt::Display for VisitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
