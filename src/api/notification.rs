use crate::{auth::auth::AuthUser, model::notification::Notification};
use actix_web::{error::ErrorInternalServerError, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::error;

/// Caller's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/notifications",
    responses(
        (status = 200, description = "Notification list", body = [Notification]),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Notification"
)]
pub async fn list_notifications(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    let notifications = sqlx::query_as::<_, Notification>(
        "SELECT * FROM notifications WHERE employee_id = ? ORDER BY created_at DESC",
    )
    .bind(employee_id)
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to fetch notifications");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(notifications))
}

/// Unread notification count, for the badge.
#[utoipa::path(
    get,
    path = "/api/v1/notifications/unread-count",
    responses(
        (status = 200, description = "Unread count", body = Object, example = json!({
            "unread": 3
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Notification"
)]
pub async fn unread_count(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;

    let unread = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM notifications WHERE employee_id = ? AND is_read = FALSE",
    )
    .bind(employee_id)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, employee_id, "Failed to count unread notifications");
        ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(json!({ "unread": unread })))
}

/// Mark one notification read. Scoped to the caller so nobody can clear
/// someone else's inbox by guessing ids.
#[utoipa::path(
    put,
    path = "/api/v1/notifications/{notification_id}/read",
    params(("notification_id" = u64, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked read"),
        (status = 404, description = "Notification not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Notification"
)]
pub async fn mark_read(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;
    let notification_id = path.into_inner();

    let result = sqlx::query(
        "UPDATE notifications SET is_read = TRUE WHERE id = ? AND employee_id = ?",
    )
    .bind(notification_id)
    .bind(employee_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, notification_id, "Failed to mark notification read");
        ErrorInternalServerError("Internal Server Error")
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::NotFound().json(json!({
            "message": "Notification not found"
        })));
    }

    Ok(HttpResponse::Ok().json(json!({ "message": "Marked read" })))
}
