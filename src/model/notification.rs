use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Employee-addressed message, created when an exchange request names the
/// employee as partner.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Notification {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = 9)]
    pub employee_id: u64,
    #[schema(example = "Exchange request needs your approval")]
    pub title: String,
    pub message: String,
    pub is_read: bool,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<DateTime<Utc>>,
}
