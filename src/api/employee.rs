use crate::{
    auth::auth::AuthUser,
    model::employee::Employee,
    models::RegisterReqDto,
    utils::db_utils::{build_update_sql, execute_update},
    utils::{email_cache, email_filter},
};
use actix_web::{error::ErrorInternalServerError, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::MySqlPool;
use tracing::{debug, error};
use utoipa::ToSchema;

/// Columns an admin profile edit may touch. Balances go through the
/// vacation-balance endpoint, never through here.
const UPDATABLE_COLUMNS: &[&str] = &["name", "email", "phone"];

#[derive(Debug, Deserialize, ToSchema)]
pub struct EmployeeQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub search: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 20)]
    pub per_page: u32,
    #[schema(example = 10)]
    pub total: i64,
}

#[derive(Deserialize, ToSchema)]
pub struct VacationBalanceUpdate {
    #[schema(example = 12)]
    pub annual_leave_remaining: i32,
    #[schema(example = 9)]
    pub sick_leave_remaining: i32,
    #[schema(example = 15)]
    pub annual_leave_total: i32,
    #[schema(example = 10)]
    pub sick_leave_total: i32,
}

/// Create Employee (admin), profile plus credential row in one call.
#[utoipa::path(
    post,
    path = "/api/v1/employees",
    request_body = RegisterReqDto,
    responses(
        (status = 201, description = "Employee created successfully", body = Object, example = json!({
            "message": "Registered successfully",
            "employee_id": 12
        })),
        (status = 400, description = "Bad request"),
        (status = 409, description = "Email already registered"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn create_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<crate::config::Config>,
    payload: web::Json<RegisterReqDto>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    // Same path as self-registration; the admin form obeys the same domain
    // gate and uniqueness rules.
    Ok(crate::auth::handlers::register(payload, pool, config).await)
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(
        ("page" = Option<u32>, Query, description = "Page number"),
        ("per_page" = Option<u32>, Query, description = "Items per page"),
        ("search" = Option<String>, Query, description = "Search by name or email")
    ),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse)
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn list_employees(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<EmployeeQuery>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    // ---------- build WHERE clause dynamically ----------
    let mut conditions = Vec::new();
    let mut bindings: Vec<String> = Vec::new();

    if let Some(search) = &query.search {
        conditions.push("(name LIKE ? OR email LIKE ?)");
        let like = format!("%{}%", search);
        bindings.push(like.clone());
        bindings.push(like);
    }

    let where_clause = if conditions.is_empty() {
        "".to_string()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    // ---------- total count ----------
    let count_sql = format!("SELECT COUNT(*) FROM employees {}", where_clause);
    debug!(sql = %count_sql, "Counting employees");

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    for b in &bindings {
        count_query = count_query.bind(b);
    }

    let total = count_query.fetch_one(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %count_sql, "Failed to count employees");
        ErrorInternalServerError("Database error")
    })?;

    // ---------- data query ----------
    let data_sql = format!(
        "SELECT * FROM employees {} ORDER BY created_at DESC LIMIT ? OFFSET ?",
        where_clause
    );
    debug!(sql = %data_sql, page, per_page, offset, "Fetching employees");

    let mut data_query = sqlx::query_as::<_, Employee>(&data_sql);
    for b in &bindings {
        data_query = data_query.bind(b);
    }
    data_query = data_query.bind(per_page as i64).bind(offset as i64);

    let employees = data_query.fetch_all(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, sql = %data_sql, "Failed to fetch employees");
        ErrorInternalServerError("Database error")
    })?;

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        data: employees,
        page,
        per_page,
        total,
    }))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}",
    params(("employee_id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn get_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let employee_id = path.into_inner();

    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to fetch employee");
            ErrorInternalServerError("Internal Server Error")
        })?;

    match employee {
        Some(emp) => Ok(HttpResponse::Ok().json(emp)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        }))),
    }
}

/// Update Employee profile fields
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}",
    params(("employee_id" = u64, Path, description = "Employee ID")),
    request_body = Object,
    responses(
        (status = 200, description = "Employee updated successfully"),
        (status = 400, description = "Unknown field in payload"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn update_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let employee_id = path.into_inner();

    let update = build_update_sql("employees", &body, UPDATABLE_COLUMNS, "id", employee_id)?;

    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().body("Employee not found"));
    }

    Ok(HttpResponse::Ok().body("Employee updated successfully"))
}

/// Overwrite all four balance fields as one update.
#[utoipa::path(
    put,
    path = "/api/v1/employees/{employee_id}/vacation-balance",
    params(("employee_id" = u64, Path, description = "Employee ID")),
    request_body = VacationBalanceUpdate,
    responses(
        (status = 200, description = "Balance updated", body = Employee),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn update_vacation_balance(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<VacationBalanceUpdate>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let employee_id = path.into_inner();

    let result = sqlx::query(
        r#"
        UPDATE employees SET
            annual_leave_remaining = ?,
            sick_leave_remaining = ?,
            annual_leave_total = ?,
            sick_leave_total = ?
        WHERE id = ?
        "#,
    )
    .bind(payload.annual_leave_remaining)
    .bind(payload.sick_leave_remaining)
    .bind(payload.annual_leave_total)
    .bind(payload.sick_leave_total)
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to update vacation balance");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Employee not found"
        })));
    }

    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_one(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to re-fetch employee");
            ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(employee))
}

/// Delete Employee (hard delete). Historical requests keep their denormalized
/// name/email and are not touched.
#[utoipa::path(
    delete,
    path = "/api/v1/employees/{employee_id}",
    params(("employee_id" = u64, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Successfully deleted"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee",
    security(("bearer_auth" = []))
)]
pub async fn delete_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let employee_id = path.into_inner();

    // Email needed afterwards to release the availability caches.
    let email = sqlx::query_scalar::<_, String>("SELECT email FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, employee_id, "Failed to look up employee email");
            ErrorInternalServerError("Internal Server Error")
        })?;

    let email = match email {
        Some(email) => email,
        None => {
            return Ok(HttpResponse::NotFound().json(json!({
                "message": "Employee not found"
            })))
        }
    };

    if let Err(e) = sqlx::query("DELETE FROM users WHERE employee_id = ?")
        .bind(employee_id)
        .execute(pool.get_ref())
        .await
    {
        error!(error = %e, employee_id, "Failed to delete credential row");
        return Ok(HttpResponse::InternalServerError().json(json!({
            "message": "Internal Server Error"
        })));
    }

    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(employee_id)
        .execute(pool.get_ref())
        .await;

    match result {
        Ok(res) => {
            if res.rows_affected() == 0 {
                return Ok(HttpResponse::NotFound().json(json!({
                    "message": "Employee not found"
                })));
            }

            email_filter::remove(&email);
            email_cache::mark_free(&email).await;

            Ok(HttpResponse::Ok().json(json!({
                "message": "Successfully deleted"
            })))
        }

        Err(e) => {
            error!(error = %e, employee_id, "Failed to delete employee");

            Ok(HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            })))
        }
    }
}
