use crate::{
    auth::auth::AuthUser,
    model::template::WorkScheduleTemplate,
    utils::db_utils::{build_update_sql, execute_update},
};
use actix_web::{error::ErrorInternalServerError, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::MySqlPool;
use tracing::error;
use utoipa::ToSchema;

/// Columns a template edit may touch.
const UPDATABLE_COLUMNS: &[&str] = &[
    "monday_status",
    "tuesday_status",
    "wednesday_status",
    "thursday_status",
    "friday_status",
    "saturday_status",
    "sunday_status",
    "is_active",
];

#[derive(Deserialize, ToSchema)]
pub struct UpsertTemplate {
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
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Deserialize, ToSchema)]
pub struct CopyTemplate {
    #[schema(example = 9)]
    pub target_employee_id: u64,
}

/// Template joined with the employee it belongs to.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct TemplateWithEmployee {
    pub id: u64,
    pub employee_id: u64,
    pub monday_status: String,
    pub tuesday_status: String,
    pub wednesday_status: String,
    pub thursday_status: String,
    pub friday_status: String,
    pub saturday_status: String,
    pub sunday_status: String,
    pub is_active: bool,
    pub employee_name: String,
    pub employee_email: String,
}

async fn fetch_template_by_employee(
    pool: &MySqlPool,
    employee_id: u64,
) -> Result<Option<WorkScheduleTemplate>, sqlx::Error> {
    sqlx::query_as::<_, WorkScheduleTemplate>(
        "SELECT * FROM work_schedule_templates WHERE employee_id = ?",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await
}

/// List active templates with employee identity.
#[utoipa::path(
    get,
    path = "/api/v1/templates",
    responses(
        (status = 200, description = "Active templates", body = [TemplateWithEmployee])
    ),
    security(("bearer_auth" = [])),
    tag = "Template"
)]
pub async fn list_templates(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let templates = sqlx::query_as::<_, TemplateWithEmployee>(
        r#"
        SELECT t.id, t.employee_id,
               t.monday_status, t.tuesday_status, t.wednesday_status,
               t.thursday_status, t.friday_status, t.saturday_status, t.sunday_status,
               t.is_active,
               e.name AS employee_name, e.email AS employee_email
        FROM work_schedule_templates t
        JOIN employees e ON e.id = t.employee_id
        WHERE t.is_active = TRUE
        ORDER BY e.name
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch templates");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(templates))
}

/// Template for one employee, active or not.
#[utoipa::path(
    get,
    path = "/api/v1/templates/employee/{employee_id}",
    params(("employee_id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Template found", body = WorkScheduleTemplate),
        (status = 404, description = "No template for this employee")
    ),
    security(("bearer_auth" = [])),
    tag = "Template"
)]
pub async fn get_employee_template(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = path.into_inner();

    let template = fetch_template_by_employee(pool.get_ref(), employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to fetch template");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match template {
        Some(t) => Ok(HttpResponse::Ok().json(t)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "No template for this employee"
        }))),
    }
}

/// Create or replace an employee's template. One template per employee;
/// the unique key on employee_id turns a second save into an update.
#[utoipa::path(
    post,
    path = "/api/v1/templates",
    request_body = UpsertTemplate,
    responses(
        (status = 200, description = "Template saved", body = WorkScheduleTemplate),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Template"
)]
pub async fn upsert_template(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<UpsertTemplate>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let saved = save_template(pool.get_ref(), &payload).await?;

    Ok(HttpResponse::Ok().json(saved))
}

async fn save_template(
    pool: &MySqlPool,
    template: &UpsertTemplate,
) -> actix_web::Result<WorkScheduleTemplate> {
    sqlx::query(
        r#"
        INSERT INTO work_schedule_templates
            (employee_id, monday_status, tuesday_status, wednesday_status,
             thursday_status, friday_status, saturday_status, sunday_status, is_active)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON DUPLICATE KEY UPDATE
            monday_status = VALUES(monday_status),
            tuesday_status = VALUES(tuesday_status),
            wednesday_status = VALUES(wednesday_status),
            thursday_status = VALUES(thursday_status),
            friday_status = VALUES(friday_status),
            saturday_status = VALUES(saturday_status),
            sunday_status = VALUES(sunday_status),
            is_active = VALUES(is_active)
        "#,
    )
    .bind(template.employee_id)
    .bind(&template.monday_status)
    .bind(&template.tuesday_status)
    .bind(&template.wednesday_status)
    .bind(&template.thursday_status)
    .bind(&template.friday_status)
    .bind(&template.saturday_status)
    .bind(&template.sunday_status)
    .bind(template.is_active)
    .execute(pool)
    .await
    .map_err(|e| {
        error!(error = %e, employee_id = template.employee_id, "Failed to save template");
        ErrorInternalServerError("Internal Server Error")
    })?;

    fetch_template_by_employee(pool, template.employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = template.employee_id, "Failed to re-fetch template");
            ErrorInternalServerError("Internal Server Error")
        })?
        .ok_or_else(|| ErrorInternalServerError("Internal Server Error"))
}

/// Patch day statuses or the active flag on an existing template.
#[utoipa::path(
    put,
    path = "/api/v1/templates/{template_id}",
    params(("template_id" = u64, Path, description = "Template ID")),
    request_body = Object,
    responses(
        (status = 200, description = "Template updated"),
        (status = 400, description = "Unknown field in payload"),
        (status = 404, description = "Template not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Template"
)]
pub async fn update_template(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let template_id = path.into_inner();

    let update = build_update_sql(
        "work_schedule_templates",
        &body,
        UPDATABLE_COLUMNS,
        "id",
        template_id,
    )?;

    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().body("Template not found"));
    }

    Ok(HttpResponse::Ok().body("Template updated successfully"))
}

/// Delete a template. Weeks already generated from it are untouched.
#[utoipa::path(
    delete,
    path = "/api/v1/templates/{template_id}",
    params(("template_id" = u64, Path, description = "Template ID")),
    responses(
        (status = 200, description = "Successfully deleted"),
        (status = 404, description = "Template not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Template"
)]
pub async fn delete_template(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let template_id = path.into_inner();

    let result = sqlx::query("DELETE FROM work_schedule_templates WHERE id = ?")
        .bind(template_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, template_id, "Failed to delete template");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Template not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Successfully deleted" })))
}

/// Copy one template's seven statuses onto another employee, replacing any
/// template the target already has.
#[utoipa::path(
    post,
    path = "/api/v1/templates/{template_id}/copy",
    params(("template_id" = u64, Path, description = "Source template ID")),
    request_body = CopyTemplate,
    responses(
        (status = 200, description = "Template copied", body = WorkScheduleTemplate),
        (status = 404, description = "Source template not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Template"
)]
pub async fn copy_template(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<CopyTemplate>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let template_id = path.into_inner();

    let source = sqlx::query_as::<_, WorkScheduleTemplate>(
        "SELECT * FROM work_schedule_templates WHERE id = ?",
    )
    .bind(template_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, template_id, "Failed to fetch source template");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let source = match source {
        Some(t) => t,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Source template not found"
            })))
        }
    };

    let copy = UpsertTemplate {
        employee_id: payload.target_employee_id,
        monday_status: source.monday_status,
        tuesday_status: source.tuesday_status,
        wednesday_status: source.wednesday_status,
        thursday_status: source.thursday_status,
        friday_status: source.friday_status,
        saturday_status: source.saturday_status,
        sunday_status: source.sunday_status,
        is_active: true,
    };

    let saved = save_template(pool.get_ref(), &copy).await?;

    Ok(HttpResponse::Ok().json(saved))
}
