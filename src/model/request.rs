use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A leave or exchange request row. Requester name/email are denormalized
/// copies taken at submit time; deleting the employee later does not rewrite
/// historical requests.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRequest {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 7, nullable = true)]
    pub employee_id: Option<u64>,

    #[schema(example = "Jane Doe")]
    pub employee_name: String,

    #[schema(example = "jane.doe@technetworkinc.com")]
    pub employee_email: String,

    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    #[schema(example = "Annual Leave")]
    pub leave_type: String,

    #[schema(example = "2026-02-02", value_type = String, format = "date")]
    pub start_date: NaiveDate,

    #[schema(example = "2026-02-06", value_type = String, format = "date")]
    pub end_date: NaiveDate,

    /// Inclusive day count, derived at submit time.
    #[schema(example = 5)]
    pub days: i64,

    #[schema(example = "Family vacation")]
    pub reason: String,

    #[schema(example = "Pending")]
    pub status: String,

    #[schema(example = "2026-01-20", value_type = String, format = "date")]
    pub submit_date: NaiveDate,

    #[schema(example = "John Smith", nullable = true)]
    pub coverage_by: Option<String>,

    pub coverage_arranged: bool,

    #[schema(nullable = true)]
    pub emergency_contact: Option<String>,

    #[schema(nullable = true)]
    pub additional_notes: Option<String>,

    pub medical_certificate: bool,

    #[schema(example = 9, nullable = true)]
    pub exchange_partner_id: Option<u64>,

    #[schema(value_type = String, format = "date", nullable = true)]
    pub exchange_from_date: Option<NaiveDate>,

    #[schema(value_type = String, format = "date", nullable = true)]
    pub exchange_to_date: Option<NaiveDate>,

    #[schema(nullable = true)]
    pub exchange_reason: Option<String>,

    #[schema(value_type = String, format = "date", nullable = true)]
    pub partner_desired_off_date: Option<NaiveDate>,

    pub requires_partner_approval: bool,

    #[schema(nullable = true)]
    pub exchange_partner_approved: Option<bool>,

    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub exchange_partner_approved_at: Option<DateTime<Utc>>,

    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<DateTime<Utc>>,
}
