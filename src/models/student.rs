use super::visit::VisitSummary;
use serde::{Deserialize, Serialize};

/// Row of the `students` table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub student_id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub course: String,
    pub year_level: i64,
    pub section: String,
    pub profile_image: Option<String>,
}

impl Student {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Registration payload (HTTP body or CLI arguments).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewStudent {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub middle_name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    #[serde(default)]
    pub course: String,
    #[serde(default = "default_year_level")]
    pub year_level: i64,
    #[serde(default)]
    pub section: String,
    pub profile_image: Option<String>,
}

fn default_year_level() -> i64 {
    1
}

/// Student plus recent history, for the profile page.
#[derive(Debug, Clone, Serialize)]
pub struct StudentProfile {
    pub student: Student,
    pub activities: Vec<VisitSummary>,
    pub total_visits: i64,
}
