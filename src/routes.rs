use crate::{
    api::{employee, notification, policy, request, schedule, template},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    governor::middleware::NoOpMiddleware, Governor, GovernorConfigBuilder, PeerIpKeyExtractor,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/check-email")
                    .wrap(register_limiter.clone())
                    .route(web::get().to(handlers::check_email)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limiter.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(handlers::protected)
            .service(
                web::scope("/employees")
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    )
                    .service(
                        web::resource("/{id}/vacation-balance")
                            .route(web::put().to(employee::update_vacation_balance)),
                    ),
            )
            .service(
                web::scope("/requests")
                    .service(
                        web::resource("")
                            .route(web::post().to(request::create_request))
                            .route(web::get().to(request::list_requests)),
                    )
                    .service(web::resource("/mine").route(web::get().to(request::my_requests)))
                    .service(
                        web::resource("/partner-approvals")
                            .route(web::get().to(request::pending_partner_approvals)),
                    )
                    .service(web::resource("/{id}").route(web::get().to(request::get_request)))
                    .service(
                        web::resource("/{id}/eligibility")
                            .route(web::get().to(request::approval_eligibility)),
                    )
                    .service(
                        web::resource("/{id}/approve")
                            .route(web::put().to(request::approve_request)),
                    )
                    .service(
                        web::resource("/{id}/reject")
                            .route(web::put().to(request::reject_request)),
                    )
                    .service(
                        web::resource("/{id}/partner-approval")
                            .route(web::post().to(request::partner_approval)),
                    ),
            )
            .service(
                web::scope("/schedules")
                    .service(web::resource("").route(web::get().to(schedule::list_schedules)))
                    .service(
                        web::resource("/materialize")
                            .route(web::post().to(schedule::materialize_schedule)),
                    )
                    .service(
                        web::resource("/generate")
                            .route(web::post().to(schedule::generate_week_schedules)),
                    )
                    .service(
                        web::resource("/day-status")
                            .route(web::get().to(schedule::get_day_status)),
                    )
                    .service(
                        web::resource("/coverage")
                            .route(web::get().to(schedule::get_available_coverage)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(schedule::update_schedule))
                            .route(web::delete().to(schedule::delete_schedule)),
                    ),
            )
            .service(
                web::scope("/templates")
                    .service(
                        web::resource("")
                            .route(web::get().to(template::list_templates))
                            .route(web::post().to(template::upsert_template)),
                    )
                    .service(
                        web::resource("/employee/{id}")
                            .route(web::get().to(template::get_employee_template)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(template::update_template))
                            .route(web::delete().to(template::delete_template)),
                    )
                    .service(
                        web::resource("/{id}/copy")
                            .route(web::post().to(template::copy_template)),
                    ),
            )
            .service(
                web::resource("/policy")
                    .route(web::get().to(policy::get_current_policy))
                    .route(web::put().to(policy::publish_policy)),
            )
            .service(
                web::scope("/notifications")
                    .service(
                        web::resource("").route(web::get().to(notification::list_notifications)),
                    )
                    .service(
                        web::resource("/unread-count")
                            .route(web::get().to(notification::unread_count)),
                    )
                    .service(
                        web::resource("/{id}/read")
                            .route(web::put().to(notification::mark_read)),
                    ),
            ),
    );
}

// LOGIN
//  ├─ access_token (15 min)
//  └─ refresh_token (7 days)
//
// API REQUEST
//  └─ Authorization: Bearer access_token
//
// ACCESS EXPIRED
//  └─ POST /refresh with refresh_token
//       └─ returns new access_token
