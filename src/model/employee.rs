use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "name": "Jane Doe",
        "email": "jane.doe@technetworkinc.com",
        "phone": "+15551234567",
        "annual_leave_remaining": 15,
        "sick_leave_remaining": 10,
        "annual_leave_total": 15,
        "sick_leave_total": 10,
        "created_at": "2026-01-01T00:00:00Z"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Jane Doe")]
    pub name: String,

    #[schema(example = "jane.doe@technetworkinc.com")]
    pub email: String,

    #[schema(example = "+15551234567", nullable = true)]
    pub phone: Option<String>,

    #[schema(example = 15)]
    pub annual_leave_remaining: i32,

    #[schema(example = 10)]
    pub sick_leave_remaining: i32,

    #[schema(example = 15)]
    pub annual_leave_total: i32,

    #[schema(example = 10)]
    pub sick_leave_total: i32,

    #[schema(example = "2026-01-01T00:00:00Z", value_type = String, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Slim projection used by coverage/partner pickers.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeRef {
    pub id: u64,
    pub name: String,
    pub email: String,
}
