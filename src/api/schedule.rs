use crate::{
    auth::auth::AuthUser,
    model::employee::EmployeeRef,
    model::schedule::{status_column, week_start, DayStatus, WorkSchedule},
    model::template::WorkScheduleTemplate,
    utils::db_utils::{build_update_sql, execute_update},
    workflow::rules::derive_day_status,
};
use actix_web::{error::ErrorInternalServerError, web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::MySqlPool;
use std::collections::HashMap;
use tracing::error;
use utoipa::{IntoParams, ToSchema};

const DAY_COLUMNS: &[&str] = &[
    "monday_status",
    "tuesday_status",
    "wednesday_status",
    "thursday_status",
    "friday_status",
    "saturday_status",
    "sunday_status",
];

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct WeekQuery {
    /// Week to list; any date inside the week works. Defaults to the current week.
    #[param(value_type = Option<String>, example = "2026-01-05")]
    pub week_start_date: Option<NaiveDate>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct DayStatusQuery {
    #[param(example = 7)]
    pub employee_id: u64,
    #[param(value_type = String, example = "2026-01-10")]
    pub date: NaiveDate,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct CoverageQuery {
    #[param(value_type = String, example = "2026-01-10")]
    pub date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct MaterializeSchedule {
    #[schema(example = 7)]
    pub employee_id: u64,
    /// Any date inside the target week.
    #[schema(value_type = String, example = "2026-01-05")]
    pub week_start_date: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
pub struct GenerateWeek {
    #[schema(value_type = String, example = "2026-01-05")]
    pub week_start_date: NaiveDate,
}

/// Week schedule row joined with the employee it belongs to.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct ScheduleWithEmployee {
    pub id: u64,
    pub employee_id: u64,
    #[schema(value_type = String, format = "date")]
    pub week_start_date: NaiveDate,
    pub monday_status: String,
    pub tuesday_status: String,
    pub wednesday_status: String,
    pub thursday_status: String,
    pub friday_status: String,
    pub saturday_status: String,
    pub sunday_status: String,
    pub employee_name: String,
    pub employee_email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CoverageEntry {
    pub employee_id: u64,
    pub employee_name: String,
    pub employee_email: String,
    pub day_status: DayStatus,
}

/// Day status for one employee on one date: concrete week schedule, else
/// active template, else the default weekday pattern.
pub async fn day_status_for(
    pool: &MySqlPool,
    employee_id: u64,
    date: NaiveDate,
) -> Result<DayStatus, sqlx::Error> {
    let monday = week_start(date);

    let schedule = sqlx::query_as::<_, WorkSchedule>(
        "SELECT * FROM work_schedules WHERE employee_id = ? AND week_start_date = ?",
    )
    .bind(employee_id)
    .bind(monday)
    .fetch_optional(pool)
    .await?;

    let template = sqlx::query_as::<_, WorkScheduleTemplate>(
        "SELECT * FROM work_schedule_templates WHERE employee_id = ? AND is_active = TRUE",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;

    Ok(derive_day_status(date, schedule.as_ref(), template.as_ref()))
}

/// Seven statuses an employee's week should start from: the active template
/// when one exists, otherwise weekdays working / weekend off. Same precedence
/// as `derive_day_status` for an employee without a concrete week row.
fn pattern_from_template(template: Option<WorkScheduleTemplate>) -> [String; 7] {
    match template {
        Some(t) => [
            t.monday_status,
            t.tuesday_status,
            t.wednesday_status,
            t.thursday_status,
            t.friday_status,
            t.saturday_status,
            t.sunday_status,
        ],
        None => [
            "working".into(),
            "working".into(),
            "working".into(),
            "working".into(),
            "working".into(),
            "off".into(),
            "off".into(),
        ],
    }
}

async fn seed_pattern(pool: &MySqlPool, employee_id: u64) -> Result<[String; 7], sqlx::Error> {
    let template = sqlx::query_as::<_, WorkScheduleTemplate>(
        "SELECT * FROM work_schedule_templates WHERE employee_id = ? AND is_active = TRUE",
    )
    .bind(employee_id)
    .fetch_optional(pool)
    .await?;

    Ok(pattern_from_template(template))
}

/// `seed_pattern` inside an open transaction.
async fn seed_pattern_tx(
    tx: &mut sqlx::Transaction<'_, sqlx::MySql>,
    employee_id: u64,
) -> Result<[String; 7], sqlx::Error> {
    let template = sqlx::query_as::<_, WorkScheduleTemplate>(
        "SELECT * FROM work_schedule_templates WHERE employee_id = ? AND is_active = TRUE",
    )
    .bind(employee_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(pattern_from_template(template))
}

/// List all week schedules for one week, joined with employee identity.
#[utoipa::path(
    get,
    path = "/api/v1/schedules",
    params(WeekQuery),
    responses(
        (status = 200, description = "Week schedules", body = [ScheduleWithEmployee])
    ),
    security(("bearer_auth" = [])),
    tag = "Schedule"
)]
pub async fn list_schedules(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<WeekQuery>,
) -> actix_web::Result<impl Responder> {
    let monday = week_start(
        query
            .week_start_date
            .unwrap_or_else(|| Utc::now().date_naive()),
    );

    let schedules = sqlx::query_as::<_, ScheduleWithEmployee>(
        r#"
        SELECT s.id, s.employee_id, s.week_start_date,
               s.monday_status, s.tuesday_status, s.wednesday_status,
               s.thursday_status, s.friday_status, s.saturday_status, s.sunday_status,
               e.name AS employee_name, e.email AS employee_email
        FROM work_schedules s
        JOIN employees e ON e.id = s.employee_id
        WHERE s.week_start_date = ?
        ORDER BY e.name
        "#,
    )
    .bind(monday)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, %monday, "Failed to fetch week schedules");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(schedules))
}

/// Materialize-or-get the schedule row for (employee, week). Idempotent:
/// first touch inserts the seed pattern, later calls return the same row.
#[utoipa::path(
    post,
    path = "/api/v1/schedules/materialize",
    request_body = MaterializeSchedule,
    responses(
        (status = 200, description = "Schedule row for the week", body = WorkSchedule),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Schedule"
)]
pub async fn materialize_schedule(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<MaterializeSchedule>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let monday = week_start(payload.week_start_date);
    let pattern = seed_pattern(pool.get_ref(), payload.employee_id)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = payload.employee_id, "Failed to load seed pattern");
            ErrorInternalServerError("Internal Server Error")
        })?;

    // INSERT IGNORE + SELECT keeps double-submits from racing each other:
    // the unique (employee_id, week_start_date) key makes the second insert
    // a no-op.
    sqlx::query(
        r#"
        INSERT IGNORE INTO work_schedules
            (employee_id, week_start_date,
             monday_status, tuesday_status, wednesday_status, thursday_status,
             friday_status, saturday_status, sunday_status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(payload.employee_id)
    .bind(monday)
    .bind(&pattern[0])
    .bind(&pattern[1])
    .bind(&pattern[2])
    .bind(&pattern[3])
    .bind(&pattern[4])
    .bind(&pattern[5])
    .bind(&pattern[6])
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id = payload.employee_id, "Failed to materialize schedule");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let schedule = sqlx::query_as::<_, WorkSchedule>(
        "SELECT * FROM work_schedules WHERE employee_id = ? AND week_start_date = ?",
    )
    .bind(payload.employee_id)
    .bind(monday)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id = payload.employee_id, "Failed to fetch schedule");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(schedule))
}

/// Update day statuses on an existing week schedule.
#[utoipa::path(
    put,
    path = "/api/v1/schedules/{schedule_id}",
    params(("schedule_id" = u64, Path, description = "Schedule row ID")),
    request_body = Object,
    responses(
        (status = 200, description = "Schedule updated"),
        (status = 400, description = "Unknown field in payload"),
        (status = 404, description = "Schedule not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Schedule"
)]
pub async fn update_schedule(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    body: web::Json<Value>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let schedule_id = path.into_inner();

    let update = build_update_sql("work_schedules", &body, DAY_COLUMNS, "id", schedule_id)?;

    let affected = execute_update(pool.get_ref(), update)
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    if affected == 0 {
        return Ok(HttpResponse::NotFound().body("Schedule not found"));
    }

    Ok(HttpResponse::Ok().body("Schedule updated successfully"))
}

/// Remove an employee from a week's schedule.
#[utoipa::path(
    delete,
    path = "/api/v1/schedules/{schedule_id}",
    params(("schedule_id" = u64, Path, description = "Schedule row ID")),
    responses(
        (status = 200, description = "Successfully deleted"),
        (status = 404, description = "Schedule not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Schedule"
)]
pub async fn delete_schedule(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let schedule_id = path.into_inner();

    let result = sqlx::query("DELETE FROM work_schedules WHERE id = ?")
        .bind(schedule_id)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, schedule_id, "Failed to delete schedule");
            ErrorInternalServerError("Internal Server Error")
        })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Schedule not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Successfully deleted" })))
}

/// Materialize the given week from every active template (bulk). Existing
/// rows are left alone.
#[utoipa::path(
    post,
    path = "/api/v1/schedules/generate",
    request_body = GenerateWeek,
    responses(
        (status = 200, description = "Generation summary", body = Object, example = json!({
            "created": 8
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Schedule"
)]
pub async fn generate_week_schedules(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<GenerateWeek>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let monday = week_start(payload.week_start_date);

    let templates = sqlx::query_as::<_, WorkScheduleTemplate>(
        "SELECT * FROM work_schedule_templates WHERE is_active = TRUE",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to load active templates");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let mut created = 0u64;

    for template in &templates {
        let result = sqlx::query(
            r#"
            INSERT IGNORE INTO work_schedules
                (employee_id, week_start_date,
                 monday_status, tuesday_status, wednesday_status, thursday_status,
                 friday_status, saturday_status, sunday_status)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(template.employee_id)
        .bind(monday)
        .bind(&template.monday_status)
        .bind(&template.tuesday_status)
        .bind(&template.wednesday_status)
        .bind(&template.thursday_status)
        .bind(&template.friday_status)
        .bind(&template.saturday_status)
        .bind(&template.sunday_status)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = template.employee_id, "Failed to generate schedule");
            ErrorInternalServerError("Internal Server Error")
        })?;

        created += result.rows_affected();
    }

    Ok(HttpResponse::Ok().json(json!({ "created": created })))
}

/// Derived day status for one employee on one date.
#[utoipa::path(
    get,
    path = "/api/v1/schedules/day-status",
    params(DayStatusQuery),
    responses(
        (status = 200, description = "Derived day status", body = Object, example = json!({
            "employee_id": 7,
            "date": "2026-01-10",
            "status": "off"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Schedule"
)]
pub async fn get_day_status(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<DayStatusQuery>,
) -> actix_web::Result<impl Responder> {
    let status = day_status_for(pool.get_ref(), query.employee_id, query.date)
        .await
        .map_err(|e| {
            error!(error = %e, employee_id = query.employee_id, "Failed to derive day status");
            ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(json!({
        "employee_id": query.employee_id,
        "date": query.date,
        "status": status,
    })))
}

/// Employees available to cover a shift on the given date (those off that day).
#[utoipa::path(
    get,
    path = "/api/v1/schedules/coverage",
    params(CoverageQuery),
    responses(
        (status = 200, description = "Available coverage", body = [CoverageEntry])
    ),
    security(("bearer_auth" = [])),
    tag = "Schedule"
)]
pub async fn get_available_coverage(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<CoverageQuery>,
) -> actix_web::Result<impl Responder> {
    let date = query.date;
    let monday = week_start(date);

    let employees =
        sqlx::query_as::<_, EmployeeRef>("SELECT id, name, email FROM employees ORDER BY name")
            .fetch_all(pool.get_ref())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to fetch employees for coverage");
                ErrorInternalServerError("Internal Server Error")
            })?;

    let schedules = sqlx::query_as::<_, WorkSchedule>(
        "SELECT * FROM work_schedules WHERE week_start_date = ?",
    )
    .bind(monday)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch schedules for coverage");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let templates = sqlx::query_as::<_, WorkScheduleTemplate>(
        "SELECT * FROM work_schedule_templates WHERE is_active = TRUE",
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, "Failed to fetch templates for coverage");
        ErrorInternalServerError("Internal Server Error")
    })?;

    let schedules: HashMap<u64, &WorkSchedule> =
        schedules.iter().map(|s| (s.employee_id, s)).collect();
    let templates: HashMap<u64, &WorkScheduleTemplate> =
        templates.iter().map(|t| (t.employee_id, t)).collect();

    let available: Vec<CoverageEntry> = employees
        .into_iter()
        .filter_map(|emp| {
            let status = derive_day_status(
                date,
                schedules.get(&emp.id).copied(),
                templates.get(&emp.id).copied(),
            );
            (status == DayStatus::Off).then(|| CoverageEntry {
                employee_id: emp.id,
                employee_name: emp.name,
                employee_email: emp.email,
                day_status: status,
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(available))
}

/// Swap two employees' day statuses for the two exchanged dates, inside the
/// caller's transaction. Weeks are materialized first so the swap always has
/// a concrete row to write to.
pub async fn swap_day_statuses(
    tx: &mut sqlx::Transaction<'_, sqlx::MySql>,
    employee_a: u64,
    employee_b: u64,
    dates: [NaiveDate; 2],
) -> Result<(), sqlx::Error> {
    use chrono::Datelike;

    for date in dates {
        let monday = week_start(date);

        for employee_id in [employee_a, employee_b] {
            // Seed from the active template so the materialized week carries
            // the same statuses the approval gate just validated against.
            let pattern = seed_pattern_tx(tx, employee_id).await?;

            sqlx::query(
                r#"
                INSERT IGNORE INTO work_schedules
                    (employee_id, week_start_date,
                     monday_status, tuesday_status, wednesday_status, thursday_status,
                     friday_status, saturday_status, sunday_status)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(employee_id)
            .bind(monday)
            .bind(&pattern[0])
            .bind(&pattern[1])
            .bind(&pattern[2])
            .bind(&pattern[3])
            .bind(&pattern[4])
            .bind(&pattern[5])
            .bind(&pattern[6])
            .execute(&mut **tx)
            .await?;
        }

        let column = status_column(date.weekday());

        let select_sql = format!(
            "SELECT {} FROM work_schedules WHERE employee_id = ? AND week_start_date = ? FOR UPDATE",
            column
        );

        let status_a = sqlx::query_scalar::<_, String>(&select_sql)
            .bind(employee_a)
            .bind(monday)
            .fetch_one(&mut **tx)
            .await?;
        let status_b = sqlx::query_scalar::<_, String>(&select_sql)
            .bind(employee_b)
            .bind(monday)
            .fetch_one(&mut **tx)
            .await?;

        let update_sql = format!(
            "UPDATE work_schedules SET {} = ? WHERE employee_id = ? AND week_start_date = ?",
            column
        );

        sqlx::query(&update_sql)
            .bind(&status_b)
            .bind(employee_a)
            .bind(monday)
            .execute(&mut **tx)
            .await?;
        sqlx::query(&update_sql)
            .bind(&status_a)
            .bind(employee_b)
            .bind(monday)
            .execute(&mut **tx)
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(wednesday: &str) -> WorkScheduleTemplate {
        WorkScheduleTemplate {
            id: 1,
            employee_id: 9,
            monday_status: "working".into(),
            tuesday_status: "working".into(),
            wednesday_status: wednesday.into(),
            thursday_status: "working".into(),
            friday_status: "working".into(),
            saturday_status: "off".into(),
            sunday_status: "off".into(),
            is_active: true,
            created_at: None,
        }
    }

    #[test]
    fn seed_follows_active_template() {
        // An employee templated off on Wednesday must be materialized as off
        // on Wednesday, not with the generic weekday pattern.
        let pattern = pattern_from_template(Some(template("off")));
        assert_eq!(pattern[2], "off");
        assert_eq!(pattern[0], "working");
        assert_eq!(pattern[5], "off");
    }

    #[test]
    fn seed_defaults_to_weekday_pattern_without_template() {
        let pattern = pattern_from_template(None);
        assert_eq!(
            pattern,
            ["working", "working", "working", "working", "working", "off", "off"]
                .map(String::from)
        );
    }
}
