use crate::{
    auth::{
        jwt::{generate_access_token, generate_refresh_token, verify_token},
        password::{hash_password, verify_password},
    },
    config::Config,
    model::role::Role,
    models::{LoginReqDto, RegisterReqDto, TokenType, UserSql},
    utils::{email_cache, email_filter},
};
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{debug, error, info, instrument};

/// true  => email AVAILABLE
/// false => email TAKEN
pub async fn is_email_available(email: &str, pool: &MySqlPool) -> bool {
    let email = email.to_lowercase();

    // Cuckoo filter: a definite "never seen" skips the DB entirely.
    if !email_filter::might_exist(&email) {
        return true;
    }

    // Moka cache: fast positive.
    if email_cache::is_taken(&email).await {
        return false;
    }

    // Database fallback
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM employees WHERE email = ? LIMIT 1)",
    )
    .bind(&email)
    .fetch_one(pool)
    .await
    .unwrap_or(true); // fail-safe

    !exists
}

/// Inserts the employee profile plus its credential row, then updates the
/// availability filter and cache.
async fn insert_employee_user(
    req: &RegisterReqDto,
    pool: &MySqlPool,
) -> Result<u64, HttpResponse> {
    let entitlements = crate::api::policy::current_entitlements(pool).await;

    let email = req.email.to_lowercase();
    let result = sqlx::query(
        r#"
        INSERT INTO employees
            (name, email, phone,
             annual_leave_remaining, sick_leave_remaining,
             annual_leave_total, sick_leave_total)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.name)
    .bind(&email)
    .bind(&req.phone)
    .bind(entitlements.annual_leave)
    .bind(entitlements.sick_leave)
    .bind(entitlements.annual_leave)
    .bind(entitlements.sick_leave)
    .execute(pool)
    .await;

    let employee_id = match result {
        Ok(res) => res.last_insert_id(),
        Err(e) => {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return Err(HttpResponse::Conflict().json(json!({
                        "error": "Email already registered"
                    })));
                }
            }
            error!(error = %e, "Failed to insert employee");
            return Err(HttpResponse::InternalServerError().json(json!({
                "error": "Failed to register employee"
            })));
        }
    };

    let hashed = hash_password(&req.password);

    if let Err(e) = sqlx::query(
        r#"INSERT INTO users (email, password, role_id, employee_id) VALUES (?, ?, ?, ?)"#,
    )
    .bind(&email)
    .bind(&hashed)
    .bind(Role::Employee as u8)
    .bind(employee_id)
    .execute(pool)
    .await
    {
        error!(error = %e, employee_id, "Failed to insert credential row");
        return Err(HttpResponse::InternalServerError().json(json!({
            "error": "Failed to register employee"
        })));
    }

    email_filter::insert(&email);
    email_cache::mark_taken(&email).await;

    Ok(employee_id)
}

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// Availability probe the registration form polls while typing.
pub async fn check_email(
    query: web::Query<EmailQuery>,
    pool: web::Data<MySqlPool>,
) -> impl Responder {
    let available = is_email_available(&query.email, pool.get_ref()).await;
    HttpResponse::Ok().json(json!({ "available": available }))
}

/// Employee self-registration, gated by the corporate email domain.
pub async fn register(
    req: web::Json<RegisterReqDto>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    let email = req.email.trim();

    if req.name.trim().is_empty() || email.is_empty() || req.password.is_empty() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Name, email and password must not be empty"
        }));
    }

    if !config.email_in_domain(email) {
        return HttpResponse::BadRequest().json(json!({
            "error": format!(
                "Registration requires a @{} email address",
                config.allowed_email_domain
            )
        }));
    }

    if !is_email_available(email, pool.get_ref()).await {
        return HttpResponse::Conflict().json(json!({
            "error": "Email already registered"
        }));
    }

    match insert_employee_user(&req, pool.get_ref()).await {
        Ok(employee_id) => HttpResponse::Created().json(json!({
            "message": "Registered successfully",
            "employee_id": employee_id
        })),
        Err(err_resp) => err_resp,
    }
}

#[derive(Serialize, Deserialize)]
struct LoginResponse {
    access_token: String,
    refresh_token: String,
}

#[instrument(
    name = "auth_login",
    skip(pool, config, user),
    fields(email = %user.email)
)]
pub async fn login(
    user: web::Json<LoginReqDto>,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    info!("Login request received");

    if user.email.trim().is_empty() || user.password.is_empty() {
        info!("Validation failed: empty email or password");
        return HttpResponse::BadRequest().body("Email or password required");
    }

    debug!("Fetching user from database");

    let db_user = match sqlx::query_as::<_, UserSql>(
        r#"
        SELECT id, email, password, role_id, employee_id
        FROM users
        WHERE email = ?
        "#,
    )
    .bind(user.email.to_lowercase())
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(Some(user)) => {
            debug!(user_id = user.id, "User found");
            user
        }
        Ok(None) => {
            // Same message as a password mismatch; no account enumeration.
            info!("Invalid credentials: user not found");
            return HttpResponse::Unauthorized().body("Invalid credentials");
        }
        Err(e) => {
            error!(error = %e, "Database error while fetching user");
            return HttpResponse::InternalServerError().finish();
        }
    };

    debug!("Verifying password");

    if let Err(e) = verify_password(&user.password, &db_user.password) {
        info!(error = %e, "Invalid credentials: password mismatch");
        return HttpResponse::Unauthorized().body("Invalid credentials");
    }

    debug!("Password verified");

    let access_token = generate_access_token(
        db_user.id,
        db_user.email.clone(),
        db_user.role_id,
        db_user.employee_id,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    let (refresh_token, refresh_claims) = generate_refresh_token(
        db_user.id,
        db_user.email.clone(),
        db_user.role_id,
        db_user.employee_id,
        &config.jwt_secret,
        config.refresh_token_ttl,
    );

    debug!(
        user_id = db_user.id,
        jti = %refresh_claims.jti,
        "Storing refresh token"
    );

    if let Err(e) = sqlx::query(
        r#"
        INSERT INTO refresh_tokens (user_id, jti, expires_at)
        VALUES (?, ?, FROM_UNIXTIME(?))
        "#,
    )
    .bind(db_user.id)
    .bind(&refresh_claims.jti)
    .bind(refresh_claims.exp as i64)
    .execute(pool.get_ref())
    .await
    {
        error!(error = %e, "Failed to store refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    // last_login_at is bookkeeping; its failure must not fail the login
    if let Err(e) = sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = ?")
        .bind(db_user.id)
        .execute(pool.get_ref())
        .await
    {
        error!(error = %e, "Failed to update last_login_at");
    }

    info!("Login successful");

    HttpResponse::Ok().json(LoginResponse {
        access_token,
        refresh_token,
    })
}

pub async fn refresh_token(
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::Unauthorized().body("No token"),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::Unauthorized().body("Invalid token"),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::Unauthorized().finish(),
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::Unauthorized().finish();
    }

    let record = match sqlx::query_as::<_, (u64, u64, bool)>(
        r#"
        SELECT id, user_id, revoked
        FROM refresh_tokens
        WHERE jti = ?
        "#,
    )
    .bind(&claims.jti)
    .fetch_optional(pool.get_ref())
    .await
    {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "Failed to look up refresh token");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let (record_id, record_user_id) = match record {
        Some((id, user_id, revoked)) if !revoked => (id, user_id),
        _ => return HttpResponse::Unauthorized().finish(),
    };

    // Rotate: revoke the old refresh token before issuing a new pair.
    if let Err(e) = sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE id = ?")
        .bind(record_id)
        .execute(pool.get_ref())
        .await
    {
        error!(error = %e, "Failed to revoke refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    let (new_refresh_token, new_claims) = generate_refresh_token(
        claims.user_id,
        claims.sub.clone(),
        claims.role,
        claims.employee_id,
        &config.jwt_secret,
        config.refresh_token_ttl,
    );

    if let Err(e) = sqlx::query(
        r#"
        INSERT INTO refresh_tokens (user_id, jti, expires_at)
        VALUES (?, ?, FROM_UNIXTIME(?))
        "#,
    )
    .bind(record_user_id)
    .bind(&new_claims.jti)
    .bind(new_claims.exp as i64)
    .execute(pool.get_ref())
    .await
    {
        error!(error = %e, "Failed to store rotated refresh token");
        return HttpResponse::InternalServerError().finish();
    }

    let access_token = generate_access_token(
        claims.user_id,
        claims.sub.clone(),
        claims.role,
        claims.employee_id,
        &config.jwt_secret,
        config.access_token_ttl,
    );

    HttpResponse::Ok().json(serde_json::json!({
        "access_token": access_token,
        "refresh_token": new_refresh_token
    }))
}

pub async fn logout(
    req: HttpRequest,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
) -> impl Responder {
    let header = match req.headers().get("Authorization") {
        Some(h) => h.to_str().unwrap_or(""),
        None => return HttpResponse::NoContent().finish(),
    };

    let token = match header.strip_prefix("Bearer ") {
        Some(t) => t,
        None => return HttpResponse::NoContent().finish(),
    };

    let claims = match verify_token(token, &config.jwt_secret) {
        Ok(c) => c,
        Err(_) => return HttpResponse::NoContent().finish(),
    };

    if claims.token_type != TokenType::Refresh {
        return HttpResponse::NoContent().finish();
    }

    // Revoke is idempotent; logout succeeds even if the token was unknown.
    let _ = sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE jti = ?")
        .bind(&claims.jti)
        .execute(pool.get_ref())
        .await;

    HttpResponse::NoContent().finish()
}

/// Echo endpoint for verifying the middleware wiring.
#[actix_web::get("/protected")]
pub async fn protected(req: HttpRequest) -> impl Responder {
    match req.extensions().get::<crate::auth::auth::AuthUser>() {
        Some(user) => HttpResponse::Ok().body(user.email.clone()),
        None => HttpResponse::Unauthorized().body("No user"),
    }
}
