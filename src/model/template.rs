use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::schedule::DayStatus;

/// Recurring default weekly pattern for one employee. Seeds the concrete
/// week schedules; editing a template never rewrites already-generated weeks.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct WorkScheduleTemplate {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 7)]
    pub employee_id: u64,
    #[schema(example = "working")]
    pub monday_status: String,
    pub tuesday_status: String,
    pub wednesday_status: String,
    pub thursday_status: String,
    pub friday_status: String,
    #[schema(example = "off")]
    pub saturday_status: String,
    pub sunday_status: String,
    pub is_active: bool,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<DateTime<Utc>>,
}

impl WorkScheduleTemplate {
    pub fn status_for(&self, weekday: Weekday) -> DayStatus {
        let raw = match weekday {
            Weekday::Mon => &self.monday_status,
            Weekday::Tue => &self.tuesday_status,
            Weekday::Wed => &self.wednesday_status,
            Weekday::Thu => &self.thursday_status,
            Weekday::Fri => &self.friday_status,
            Weekday::Sat => &self.saturday_status,
            Weekday::Sun => &self.sunday_status,
        };
        raw.parse().unwrap_or_else(|_| DayStatus::default_for(weekday))
    }
}
