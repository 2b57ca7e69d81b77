use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;

/// Working/off status of a single day. Stored as lowercase text in the
/// `*_status` columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DayStatus {
    Working,
    Off,
}

impl DayStatus {
    /// Default pattern: weekdays working, weekend off.
    pub fn default_for(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sat | Weekday::Sun => DayStatus::Off,
            _ => DayStatus::Working,
        }
    }
}

/// One employee's concrete schedule for a specific week.
/// `week_start_date` is always a Monday; (employee_id, week_start_date) is unique.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct WorkSchedule {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 7)]
    pub employee_id: u64,
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub week_start_date: NaiveDate,
    #[schema(example = "working")]
    pub monday_status: String,
    pub tuesday_status: String,
    pub wednesday_status: String,
    pub thursday_status: String,
    pub friday_status: String,
    #[schema(example = "off")]
    pub saturday_status: String,
    pub sunday_status: String,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<DateTime<Utc>>,
}

impl WorkSchedule {
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

/// Column name for a weekday, used by the day-toggle update.
pub fn status_column(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday_status",
        Weekday::Tue => "tuesday_status",
        Weekday::Wed => "wednesday_status",
        Weekday::Thu => "thursday_status",
        Weekday::Fri => "friday_status",
        Weekday::Sat => "saturday_status",
        Weekday::Sun => "sunday_status",
    }
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - chrono::Duration::days(date.weekday().num_days_from_monday() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn week_start_is_monday() {
        // 2026-01-07 is a Wednesday
        assert_eq!(week_start(d("2026-01-07")), d("2026-01-05"));
        // Monday maps to itself
        assert_eq!(week_start(d("2026-01-05")), d("2026-01-05"));
        // Sunday belongs to the week that started six days earlier
        assert_eq!(week_start(d("2026-01-11")), d("2026-01-05"));
    }

    #[test]
    fn default_pattern_weekend_off() {
        assert_eq!(DayStatus::default_for(Weekday::Mon), DayStatus::Working);
        assert_eq!(DayStatus::default_for(Weekday::Fri), DayStatus::Working);
        assert_eq!(DayStatus::default_for(Weekday::Sat), DayStatus::Off);
        assert_eq!(DayStatus::default_for(Weekday::Sun), DayStatus::Off);
    }

    #[test]
    fn day_status_round_trips_as_text() {
        assert_eq!(DayStatus::Working.to_string(), "working");
        assert_eq!("off".parse::<DayStatus>().unwrap(), DayStatus::Off);
    }
}
