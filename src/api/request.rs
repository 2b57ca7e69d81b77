use crate::{
    api::policy::current_catalog,
    api::schedule::{day_status_for, swap_day_statuses},
    auth::auth::AuthUser,
    model::employee::EmployeeRef,
    model::request::LeaveRequest,
    model::schedule::DayStatus,
    workflow::approval::{
        admin_approve, admin_reject, can_admin_approve, partner_decision, RequestStatus,
        TransitionError,
    },
    workflow::rules::{validate_request, RequestDraft, ValidationError},
};
use actix_web::{error::ErrorInternalServerError, web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{error, warn};
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema)]
pub struct CreateRequest {
    #[serde(rename = "type")]
    #[schema(example = "Annual Leave")]
    pub leave_type: String,
    #[schema(value_type = String, format = "date", example = "2026-02-02")]
    pub start_date: Option<NaiveDate>,
    #[schema(value_type = String, format = "date", example = "2026-02-06")]
    pub end_date: Option<NaiveDate>,
    #[schema(example = "Family vacation")]
    pub reason: String,

    pub coverage_by: Option<String>,
    #[serde(default)]
    pub coverage_arranged: bool,
    pub emergency_contact: Option<String>,
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub medical_certificate: bool,

    pub exchange_partner_id: Option<u64>,
    #[schema(value_type = String, format = "date", nullable = true)]
    pub exchange_to_date: Option<NaiveDate>,
    pub exchange_reason: Option<String>,
    #[schema(value_type = String, format = "date", nullable = true)]
    pub partner_desired_off_date: Option<NaiveDate>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct RequestFilter {
    /// Filter by employee ID
    #[param(example = 7)]
    pub employee_id: Option<u64>,
    /// Filter by request status
    #[param(example = "Pending")]
    pub status: Option<String>,
    /// Pagination page number (start with 1)
    pub page: Option<u64>,
    /// Pagination per page number
    pub per_page: Option<u64>,
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    U64(u64),
    Str(&'a str),
}

#[derive(serde::Serialize, ToSchema)]
pub struct RequestListResponse {
    pub data: Vec<LeaveRequest>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct PartnerDecision {
    pub approved: bool,
    #[schema(nullable = true)]
    pub notes: Option<String>,
}

async fn fetch_request(
    pool: &MySqlPool,
    request_id: u64,
) -> Result<Option<LeaveRequest>, sqlx::Error> {
    sqlx::query_as::<_, LeaveRequest>("SELECT * FROM requests WHERE id = ?")
        .bind(request_id)
        .fetch_optional(pool)
        .await
}

fn parse_status(raw: &str, request_id: u64) -> actix_web::Result<RequestStatus> {
    raw.parse::<RequestStatus>().map_err(|_| {
        error!(request_id, status = raw, "Request row carries unknown status");
        ErrorInternalServerError("Internal Server Error")
    })
}

/* =========================
Create request
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/requests",
    request_body(
        content = CreateRequest,
        description = "Leave/exchange request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Request submitted", body = LeaveRequest),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Request"
)]
pub async fn create_request(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateRequest>,
) -> actix_web::Result<impl Responder> {
    // Resolve the requester profile. The employee id on the token is
    // preferred; a triage user submitting on someone's behalf is not
    // supported here.
    let employee_id = auth.require_employee_id()?;

    let employee = sqlx::query_as::<_, EmployeeRef>(
        "SELECT id, name, email FROM employees WHERE id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch requester");
        ErrorInternalServerError("Internal Server Error")
    })?
    .ok_or_else(|| actix_web::error::ErrorForbidden("No employee profile"))?;

    let catalog = current_catalog(pool.get_ref()).await;

    let draft = RequestDraft {
        leave_type: &payload.leave_type,
        start_date: payload.start_date,
        end_date: payload.end_date,
        reason: &payload.reason,
        coverage_by: payload.coverage_by.as_deref(),
        exchange_partner_id: payload.exchange_partner_id,
        exchange_reason: payload.exchange_reason.as_deref(),
        partner_desired_off_date: payload.partner_desired_off_date,
    };

    let days = match validate_request(&draft, &catalog) {
        Ok(days) => days,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(json!({ "message": e.to_string() })));
        }
    };

    // The validator has already rejected drafts without dates.
    let (start_date, end_date) = match (payload.start_date, payload.end_date) {
        (Some(s), Some(e)) => (s, e),
        _ => {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": ValidationError::MissingFields.to_string()
            })));
        }
    };

    let is_exchange = catalog
        .iter()
        .find(|t| t.value == payload.leave_type)
        .map_or(false, |t| t.is_exchange);

    // The partner-side check needs the database, so it lives here rather
    // than in the pure rules.
    let mut partner: Option<EmployeeRef> = None;
    if is_exchange {
        let partner_id = match payload.exchange_partner_id {
            Some(id) => id,
            None => {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "message": ValidationError::ExchangePartnerMissing.to_string()
                })));
            }
        };
        let requested_date = start_date;

        let found = sqlx::query_as::<_, EmployeeRef>(
            "SELECT id, name, email FROM employees WHERE id = ?",
        )
        .bind(partner_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, partner_id, "Failed to fetch exchange partner");
            ErrorInternalServerError("Internal Server Error")
        })?;

        let found = match found {
            Some(p) => p,
            None => {
                return Ok(HttpResponse::BadRequest().json(json!({
                    "message": ValidationError::ExchangePartnerMissing.to_string()
                })));
            }
        };

        let status = day_status_for(pool.get_ref(), partner_id, requested_date)
            .await
            .map_err(|e| {
                error!(error = %e, partner_id, "Failed to derive partner day status");
                ErrorInternalServerError("Internal Server Error")
            })?;

        if status != DayStatus::Off {
            return Ok(HttpResponse::BadRequest().json(json!({
                "message": ValidationError::PartnerNotOff {
                    partner: found.name.clone(),
                    date: requested_date,
                }
                .to_string()
            })));
        }

        partner = Some(found);
    }

    let today = Utc::now().date_naive();

    let result = sqlx::query(
        r#"
        INSERT INTO requests
            (employee_id, employee_name, employee_email, type,
             start_date, end_date, days, reason, status, submit_date,
             coverage_by, coverage_arranged, emergency_contact, additional_notes,
             medical_certificate, exchange_partner_id, exchange_from_date,
             exchange_to_date, exchange_reason, partner_desired_off_date,
             requires_partner_approval)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee.id)
    .bind(&employee.name)
    .bind(&employee.email)
    .bind(&payload.leave_type)
    .bind(start_date)
    .bind(end_date)
    .bind(days)
    .bind(&payload.reason)
    .bind(RequestStatus::Pending.to_string())
    .bind(today)
    .bind(&payload.coverage_by)
    .bind(payload.coverage_arranged)
    .bind(&payload.emergency_contact)
    .bind(&payload.additional_notes)
    .bind(payload.medical_certificate)
    .bind(payload.exchange_partner_id.filter(|_| is_exchange))
    .bind(is_exchange.then_some(start_date))
    .bind(payload.exchange_to_date.filter(|_| is_exchange))
    .bind(payload.exchange_reason.as_deref().filter(|_| is_exchange))
    .bind(payload.partner_desired_off_date.filter(|_| is_exchange))
    .bind(is_exchange)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to create request");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let request_id = result.last_insert_id();

    // Best effort: the request is already saved, a notification failure
    // must not fail the submission.
    if let Some(partner) = &partner {
        let message = format!(
            "{} wants to exchange their off day on {} and offers you {} off. \
             Review it in your pending approvals.",
            employee.name,
            start_date,
            payload
                .partner_desired_off_date
                .map(|d| d.to_string())
                .unwrap_or_default()
        );
        if let Err(e) = sqlx::query(
            "INSERT INTO notifications (employee_id, title, message) VALUES (?, ?, ?)",
        )
        .bind(partner.id)
        .bind("Exchange request needs your approval")
        .bind(&message)
        .execute(pool.get_ref())
        .await
        {
            warn!(error = %e, request_id, partner_id = partner.id,
                "Failed to create exchange notification");
        }
    }

    let saved = fetch_request(pool.get_ref(), request_id)
        .await
        .map_err(|e| {
            error!(error = %e, request_id, "Failed to re-fetch saved request");
            ErrorInternalServerError("Internal Server Error")
        })?
        .ok_or_else(|| ErrorInternalServerError("Internal Server Error"))?;

    Ok(HttpResponse::Ok().json(saved))
}

/* =========================
List requests (HR/Admin)
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/requests",
    params(RequestFilter),
    responses(
        (status = 200, description = "Paginated request list", body = RequestListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Request"
)]
pub async fn list_requests(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<RequestFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let per_page = query.per_page.unwrap_or(10).min(100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(emp_id) = query.employee_id {
        where_sql.push_str(" AND employee_id = ?");
        args.push(FilterValue::U64(emp_id));
    }

    if let Some(status) = query.status.as_deref() {
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    let count_sql = format!("SELECT COUNT(*) FROM requests{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to count requests");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let data_sql = format!(
        "SELECT * FROM requests{} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, LeaveRequest>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let requests = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch request list");
            ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(RequestListResponse {
        data: requests,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}

/* =========================
My requests (employee history)
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/requests/mine",
    responses(
        (status = 200, description = "Requests submitted by the caller", body = [LeaveRequest]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Request"
)]
pub async fn my_requests(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    let requests = sqlx::query_as::<_, LeaveRequest>(
        "SELECT * FROM requests WHERE employee_id = ? ORDER BY created_at DESC",
    )
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch own requests");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(requests))
}

/* =========================
Get one request
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/requests/{request_id}",
    params(("request_id" = u64, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request found", body = LeaveRequest),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Request"
)]
pub async fn get_request(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let request_id = path.into_inner();

    let request = fetch_request(pool.get_ref(), request_id)
        .await
        .map_err(|e| {
            error!(error = %e, request_id, "Failed to fetch request");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let request = match request {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Request not found"
            })))
        }
    };

    // Owners and the nominated partner may read; everyone else needs triage rights.
    let is_own = auth.employee_id.is_some() && auth.employee_id == request.employee_id;
    let is_partner = auth.employee_id.is_some() && auth.employee_id == request.exchange_partner_id;
    if !is_own && !is_partner {
        auth.require_hr_or_admin()?;
    }

    Ok(HttpResponse::Ok().json(request))
}

/* =========================
Admin approval eligibility
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/requests/{request_id}/eligibility",
    params(("request_id" = u64, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Eligibility result", body = crate::workflow::approval::ApprovalGate),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Request"
)]
pub async fn approval_eligibility(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let request_id = path.into_inner();

    let request = fetch_request(pool.get_ref(), request_id)
        .await
        .map_err(|e| {
            error!(error = %e, request_id, "Failed to fetch request");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let request = match request {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Request not found"
            })))
        }
    };

    let status = parse_status(&request.status, request_id)?;
    let gate = can_admin_approve(status, request.requires_partner_approval);

    Ok(HttpResponse::Ok().json(gate))
}

/* =========================
Approve request (HR/Admin)
========================= */
/// Runs the eligibility gate again before writing; approving an exchange also
/// swaps the two day statuses in the same transaction as the status change.
#[utoipa::path(
    put,
    path = "/api/v1/requests/{request_id}/approve",
    params(("request_id" = u64, Path, description = "ID of the request to approve")),
    responses(
        (status = 200, description = "Request approved", body = LeaveRequest),
        (status = 400, description = "Not eligible for approval"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Request"
)]
pub async fn approve_request(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let request_id = path.into_inner();

    let request = fetch_request(pool.get_ref(), request_id)
        .await
        .map_err(|e| {
            error!(error = %e, request_id, "Failed to fetch request");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let request = match request {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Request not found"
            })))
        }
    };

    let status = parse_status(&request.status, request_id)?;

    let next = match admin_approve(status, request.requires_partner_approval) {
        Ok(next) => next,
        Err(TransitionError::NotEligible(reason)) => {
            return Ok(HttpResponse::BadRequest().json(json!({ "message": reason })));
        }
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(json!({ "message": e.to_string() })));
        }
    };

    let mut tx = pool.get_ref().begin().await.map_err(|e| {
        error!(error = %e, request_id, "Failed to open transaction");
        ErrorInternalServerError("Internal Server Error")
    })?;

    // Guard the UPDATE by the status we decided from, so a concurrent
    // decision loses cleanly instead of double-applying.
    let result = sqlx::query("UPDATE requests SET status = ? WHERE id = ? AND status = ?")
        .bind(next.to_string())
        .bind(request_id)
        .bind(&request.status)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(error = %e, request_id, "Approve request failed");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Request not found or already processed"
        })));
    }

    // Side effect of approving an exchange: the two employees trade day
    // statuses for the two dates.
    if request.requires_partner_approval {
        if let (Some(partner_id), Some(from_date), Some(desired)) = (
            request.exchange_partner_id,
            request.exchange_from_date,
            request.partner_desired_off_date,
        ) {
            let requester_id = request
                .employee_id
                .ok_or_else(|| ErrorInternalServerError("Request has no employee reference"))?;

            swap_day_statuses(&mut tx, requester_id, partner_id, [from_date, desired])
                .await
                .map_err(|e| {
                    error!(error = %e, request_id, "Failed to swap exchanged day statuses");
                    ErrorInternalServerError("Internal Server Error")
                })?;
        }
    }

    tx.commit().await.map_err(|e| {
        error!(error = %e, request_id, "Failed to commit approval");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let saved = fetch_request(pool.get_ref(), request_id)
        .await
        .map_err(|e| {
            error!(error = %e, request_id, "Failed to re-fetch approved request");
            ErrorInternalServerError("Internal Server Error")
        })?
        .ok_or_else(|| ErrorInternalServerError("Internal Server Error"))?;

    Ok(HttpResponse::Ok().json(saved))
}

/* =========================
Reject request (HR/Admin)
========================= */
#[utoipa::path(
    put,
    path = "/api/v1/requests/{request_id}/reject",
    params(("request_id" = u64, Path, description = "ID of the request to reject")),
    responses(
        (status = 200, description = "Request rejected"),
        (status = 400, description = "Request not found or already processed"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Request"
)]
pub async fn reject_request(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let request_id = path.into_inner();

    let request = fetch_request(pool.get_ref(), request_id)
        .await
        .map_err(|e| {
            error!(error = %e, request_id, "Failed to fetch request");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let request = match request {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Request not found"
            })))
        }
    };

    let status = parse_status(&request.status, request_id)?;

    let next = match admin_reject(status) {
        Ok(next) => next,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(json!({ "message": e.to_string() })));
        }
    };

    let result = sqlx::query("UPDATE requests SET status = ? WHERE id = ? AND status = ?")
        .bind(next.to_string())
        .bind(request_id)
        .bind(&request.status)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, request_id, "Reject request failed");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Request not found or already processed"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Request rejected" })))
}

/* =========================
Partner decision on an exchange
========================= */
#[utoipa::path(
    post,
    path = "/api/v1/requests/{request_id}/partner-approval",
    params(("request_id" = u64, Path, description = "Request ID")),
    request_body = PartnerDecision,
    responses(
        (status = 200, description = "Decision recorded", body = LeaveRequest),
        (status = 400, description = "Request is not awaiting a partner decision"),
        (status = 403, description = "Caller is not the nominated partner"),
        (status = 404, description = "Request not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Request"
)]
pub async fn partner_approval(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<PartnerDecision>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;
    let request_id = path.into_inner();

    let request = fetch_request(pool.get_ref(), request_id)
        .await
        .map_err(|e| {
            error!(error = %e, request_id, "Failed to fetch request");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let request = match request {
        Some(r) => r,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Request not found"
            })))
        }
    };

    if request.exchange_partner_id != Some(employee_id) {
        return Err(actix_web::error::ErrorForbidden(
            TransitionError::NotThePartner.to_string(),
        ));
    }

    let status = parse_status(&request.status, request_id)?;

    let next = match partner_decision(status, payload.approved) {
        Ok(next) => next,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(json!({ "message": e.to_string() })));
        }
    };

    let result = sqlx::query(
        r#"
        UPDATE requests
        SET status = ?,
            exchange_partner_approved = ?,
            exchange_partner_approved_at = NOW(),
            additional_notes = COALESCE(?, additional_notes)
        WHERE id = ? AND status = ?
        "#,
    )
    .bind(next.to_string())
    .bind(payload.approved)
    .bind(&payload.notes)
    .bind(request_id)
    .bind(&request.status)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, request_id, "Partner decision failed");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Request not found or already processed"
        })));
    }

    let saved = fetch_request(pool.get_ref(), request_id)
        .await
        .map_err(|e| {
            error!(error = %e, request_id, "Failed to re-fetch request");
            ErrorInternalServerError("Internal Server Error")
        })?
        .ok_or_else(|| ErrorInternalServerError("Internal Server Error"))?;

    Ok(HttpResponse::Ok().json(saved))
}

/* =========================
Pending partner approvals (inbox)
========================= */
#[utoipa::path(
    get,
    path = "/api/v1/requests/partner-approvals",
    responses(
        (status = 200, description = "Exchange requests awaiting the caller's decision",
         body = [LeaveRequest])
    ),
    security(("bearer_auth" = [])),
    tag = "Request"
)]
pub async fn pending_partner_approvals(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    let requests = sqlx::query_as::<_, LeaveRequest>(
        r#"
        SELECT * FROM requests
        WHERE exchange_partner_id = ?
          AND requires_partner_approval = TRUE
          AND status = 'Pending'
        ORDER BY created_at DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch pending partner approvals");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(requests))
}
