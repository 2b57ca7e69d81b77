use crate::api::employee::{EmployeeListResponse, EmployeeQuery, VacationBalanceUpdate};
use crate::api::request::{CreateRequest, PartnerDecision, RequestFilter, RequestListResponse};
use crate::api::schedule::{
    CoverageEntry, GenerateWeek, MaterializeSchedule, ScheduleWithEmployee,
};
use crate::api::template::{CopyTemplate, TemplateWithEmployee, UpsertTemplate};
use crate::model::employee::{Employee, EmployeeRef};
use crate::model::notification::Notification;
use crate::model::policy::{Entitlements, LeaveTypeDef, Policy, PolicyContent};
use crate::model::request::LeaveRequest;
use crate::model::schedule::{DayStatus, WorkSchedule};
use crate::model::template::WorkScheduleTemplate;
use crate::models::RegisterReqDto;
use crate::workflow::approval::ApprovalGate;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{openapi, Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Leave & Shift Exchange API",
        version = "1.0.0",
        description = r#"
## Leave & Shift Exchange System

This API powers a leave-management system for shift-based teams.

### 🔹 Key Features
- **Leave Requests**
  - Submit leave or off-day exchange requests, validated against the active policy
- **Approval Workflow**
  - Exchange requests need the partner's sign-off before an admin can approve
- **Work Schedules**
  - Weekly schedules materialized from per-employee templates
- **Vacation Balances & Policy**
  - Published policy versions drive leave types and entitlement numbers

### 🔐 Security
Most endpoints are protected using **JWT Bearer authentication**.
Roster and approval operations require the **Admin** or **HR** role.

### 📦 Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::request::create_request,
        crate::api::request::list_requests,
        crate::api::request::my_requests,
        crate::api::request::get_request,
        crate::api::request::approval_eligibility,
        crate::api::request::approve_request,
        crate::api::request::reject_request,
        crate::api::request::partner_approval,
        crate::api::request::pending_partner_approvals,

        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::update_vacation_balance,
        crate::api::employee::delete_employee,

        crate::api::schedule::list_schedules,
        crate::api::schedule::materialize_schedule,
        crate::api::schedule::update_schedule,
        crate::api::schedule::delete_schedule,
        crate::api::schedule::generate_week_schedules,
        crate::api::schedule::get_day_status,
        crate::api::schedule::get_available_coverage,

        crate::api::template::list_templates,
        crate::api::template::get_employee_template,
        crate::api::template::upsert_template,
        crate::api::template::update_template,
        crate::api::template::delete_template,
        crate::api::template::copy_template,

        crate::api::policy::get_current_policy,
        crate::api::policy::publish_policy,

        crate::api::notification::list_notifications,
        crate::api::notification::unread_count,
        crate::api::notification::mark_read
    ),
    components(
        schemas(
            LeaveRequest,
            CreateRequest,
            RequestFilter,
            RequestListResponse,
            PartnerDecision,
            ApprovalGate,
            Employee,
            EmployeeRef,
            EmployeeQuery,
            EmployeeListResponse,
            VacationBalanceUpdate,
            RegisterReqDto,
            DayStatus,
            WorkSchedule,
            ScheduleWithEmployee,
            CoverageEntry,
            MaterializeSchedule,
            GenerateWeek,
            WorkScheduleTemplate,
            TemplateWithEmployee,
            UpsertTemplate,
            CopyTemplate,
            Policy,
            PolicyContent,
            LeaveTypeDef,
            Entitlements,
            Notification
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Request", description = "Leave and exchange request APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Schedule", description = "Weekly work schedule APIs"),
        (name = "Template", description = "Schedule template APIs"),
        (name = "Policy", description = "Leave policy APIs"),
        (name = "Notification", description = "Notification APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
