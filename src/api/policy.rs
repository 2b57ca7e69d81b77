use crate::auth::auth::AuthUser;
use crate::model::policy::{Entitlements, LeaveTypeDef, Policy, PolicyContent};
use crate::workflow::rules::BUILTIN_CATALOG;
use actix_web::{web, HttpResponse, Responder};
use sqlx::MySqlPool;
use tracing::error;

/// Most recently published policy row, or None. Lookup failures are logged
/// and treated as "no policy" so callers fall back to the built-in catalog
/// instead of failing the whole page.
pub async fn current_policy(pool: &MySqlPool) -> Option<Policy> {
    match sqlx::query_as::<_, Policy>(
        r#"
        SELECT id, content, published, created_at, updated_at
        FROM policies
        WHERE published = TRUE
        ORDER BY updated_at DESC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await
    {
        Ok(policy) => policy,
        Err(e) => {
            error!(error = %e, "Failed to fetch current policy");
            None
        }
    }
}

/// Active leave-type catalog: the published policy's, else the built-in one.
pub async fn current_catalog(pool: &MySqlPool) -> Vec<LeaveTypeDef> {
    match current_policy(pool).await {
        Some(policy) if !policy.content.leave_types.is_empty() => {
            policy.content.leave_types.clone()
        }
        _ => BUILTIN_CATALOG.clone(),
    }
}

/// Entitlement numbers used to seed new employees' balances.
pub async fn current_entitlements(pool: &MySqlPool) -> Entitlements {
    match current_policy(pool).await {
        Some(policy) => policy.content.entitlements,
        None => Entitlements {
            annual_leave: 15,
            sick_leave: 10,
        },
    }
}

/// Current published policy, with the built-in defaults when nothing has
/// been published yet.
#[utoipa::path(
    get,
    path = "/api/v1/policy",
    responses(
        (status = 200, description = "Current policy document", body = Object),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "Policy"
)]
pub async fn get_current_policy(
    _auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    match current_policy(pool.get_ref()).await {
        Some(policy) => Ok(HttpResponse::Ok().json(policy)),
        None => Ok(HttpResponse::Ok().json(serde_json::json!({
            "id": null,
            "published": false,
            "content": PolicyContent {
                leave_types: BUILTIN_CATALOG.clone(),
                entitlements: Entitlements { annual_leave: 15, sick_leave: 10 },
                guidelines: None,
            }
        }))),
    }
}

/// Publish a new policy version (admin).
///
/// Three sequential writes, mirroring the workflow this replaces:
/// unpublish-all, insert the new published row, then overwrite every
/// employee's balances when the entitlement numbers changed. The balance
/// overwrite is best-effort; its failure is logged, not propagated, so the
/// already-published policy is not left half-rolled-back.
#[utoipa::path(
    put,
    path = "/api/v1/policy",
    request_body = PolicyContent,
    responses(
        (status = 200, description = "Policy published", body = Policy),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Policy"
)]
pub async fn publish_policy(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<PolicyContent>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let content = payload.into_inner();
    let previous = current_policy(pool.get_ref()).await;

    sqlx::query("UPDATE policies SET published = FALSE WHERE published = TRUE")
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to unpublish current policy");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let content_json = serde_json::to_value(&content).map_err(|e| {
        error!(error = %e, "Failed to serialize policy content");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let result = sqlx::query("INSERT INTO policies (content, published) VALUES (?, TRUE)")
        .bind(&content_json)
        .execute(pool.get_ref())
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to insert policy");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    let policy_id = result.last_insert_id();

    let entitlements_changed = previous
        .as_ref()
        .map_or(true, |p| p.content.entitlements_changed(&content));

    if entitlements_changed {
        let ent = content.entitlements;
        if let Err(e) = sqlx::query(
            r#"
            UPDATE employees SET
                annual_leave_remaining = ?,
                sick_leave_remaining = ?,
                annual_leave_total = ?,
                sick_leave_total = ?
            "#,
        )
        .bind(ent.annual_leave)
        .bind(ent.sick_leave)
        .bind(ent.annual_leave)
        .bind(ent.sick_leave)
        .execute(pool.get_ref())
        .await
        {
            // Policy is already published; do not fail the publish over this.
            error!(error = %e, policy_id, "Failed to overwrite employee balances");
        }
    }

    let policy = sqlx::query_as::<_, Policy>(
        "SELECT id, content, published, created_at, updated_at FROM policies WHERE id = ?",
    )
    .bind(policy_id)
    .fetch_one(pool.get_ref())
    .await
    .map_err(|e| {
        error!(error = %e, policy_id, "Failed to fetch published policy");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(policy))
}
