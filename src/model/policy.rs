use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One leave-type definition inside a policy document. Field names follow the
/// published JSON shape (`maxDays`, `requiresCoverage`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTypeDef {
    #[schema(example = "Annual Leave")]
    pub value: String,
    #[schema(example = "Annual Leave")]
    pub label: String,
    #[schema(example = 14)]
    pub max_days: i64,
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(nullable = true)]
    pub description: Option<String>,
    #[serde(default)]
    pub requires_coverage: bool,
    #[serde(default)]
    pub is_exchange: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Entitlements {
    #[schema(example = 15)]
    pub annual_leave: i32,
    #[schema(example = 10)]
    pub sick_leave: i32,
}

/// The policy document body, stored as a JSON column.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PolicyContent {
    pub leave_types: Vec<LeaveTypeDef>,
    pub entitlements: Entitlements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object, nullable = true)]
    pub guidelines: Option<serde_json::Value>,
}

impl PolicyContent {
    /// True when publishing `new` over `self` changes the entitlement
    /// numbers, which triggers the balance overwrite for every employee.
    pub fn entitlements_changed(&self, new: &PolicyContent) -> bool {
        self.entitlements != new.entitlements
    }
}

/// A policy version row. Append-only history; exactly one row is published.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Policy {
    #[schema(example = 3)]
    pub id: u64,
    #[schema(value_type = PolicyContent)]
    pub content: sqlx::types::Json<PolicyContent>,
    pub published: bool,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub created_at: Option<DateTime<Utc>>,
    #[schema(value_type = String, format = "date-time", nullable = true)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(annual: i32, sick: i32) -> PolicyContent {
        PolicyContent {
            leave_types: vec![],
            entitlements: Entitlements {
                annual_leave: annual,
                sick_leave: sick,
            },
            guidelines: None,
        }
    }

    #[test]
    fn entitlement_change_detected() {
        let current = content(15, 10);
        assert!(current.entitlements_changed(&content(20, 10)));
        assert!(current.entitlements_changed(&content(15, 12)));
        assert!(!current.entitlements_changed(&content(15, 10)));
    }

    #[test]
    fn content_parses_published_json_shape() {
        let raw = serde_json::json!({
            "leaveTypes": [
                { "value": "Sick Leave", "label": "Sick Leave", "maxDays": 1, "paid": true },
                { "value": "Exchange Off Days", "label": "Exchange Off Days",
                  "maxDays": 1, "paid": false, "isExchange": true }
            ],
            "entitlements": { "annualLeave": 15, "sickLeave": 10 }
        });
        let content: PolicyContent = serde_json::from_value(raw).unwrap();
        assert_eq!(content.leave_types.len(), 2);
        assert!(content.leave_types[1].is_exchange);
        assert!(!content.leave_types[0].is_exchange);
        assert_eq!(content.entitlements.annual_leave, 15);
    }
}
