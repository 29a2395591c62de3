// src/routes.rs

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
    Json, Router,
};
use serde_json::json;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{AppConfig, AppState},
    docs::ApiDoc,
    handlers,
    middleware::auth::{admin_guard, auth_guard},
};

const JSON_BODY_LIMIT: usize = 10 * 1024;
const MULTIPART_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Router completo (API + arquivos estáticos + SPA), usado pelo binário e pelos testes.
pub fn build_router(app_state: AppState) -> Router {
    let config = app_state.config.clone();

    let admin_only = || axum_middleware::from_fn_with_state(app_state.clone(), admin_guard);
    let signed_in = || axum_middleware::from_fn_with_state(app_state.clone(), auth_guard);

    // --- Agendamentos ---
    let booking_routes = Router::new()
        .route("/book-service", post(handlers::bookings::create_booking))
        .merge(
            Router::new()
                .route("/bookings", get(handlers::bookings::list_bookings))
                .route(
                    "/booking/{id}",
                    get(handlers::bookings::get_booking)
                        .patch(handlers::bookings::update_booking_status)
                        .delete(handlers::bookings::delete_booking),
                )
                .route_layer(admin_only()),
        );

    // --- Catálogo: leitura pública, escrita só admin ---
    let service_routes = Router::new()
        .route("/", get(handlers::catalog::list_services))
        .route("/category/{category}", get(handlers::catalog::list_services_by_category))
        .route("/{id}", get(handlers::catalog::get_service))
        .merge(
            Router::new()
                .route("/", post(handlers::catalog::create_service))
                .route(
                    "/{id}",
                    put(handlers::catalog::update_service).delete(handlers::catalog::delete_service),
                )
                .route_layer(admin_only())
                .layer(DefaultBodyLimit::max(MULTIPART_BODY_LIMIT)),
        );

    // --- Funcionários e folha ---
    let employee_routes = Router::new()
        .route(
            "/",
            post(handlers::employees::create_employee).get(handlers::employees::list_employees),
        )
        .route("/reset", put(handlers::employees::monthly_reset))
        .route(
            "/{id}",
            get(handlers::employees::get_employee)
                .put(handlers::employees::update_employee)
                .delete(handlers::employees::delete_employee),
        )
        .route("/{id}/payments", post(handlers::employees::record_payment))
        .route_layer(admin_only());

    // O cliente chama com e sem a barra final
    let testimonial_routes = Router::new()
        .route(
            "/testimonials",
            post(handlers::intake::create_testimonial).get(handlers::intake::list_testimonials),
        )
        .route(
            "/testimonials/",
            post(handlers::intake::create_testimonial).get(handlers::intake::list_testimonials),
        );

    let query_routes = Router::new()
        .route("/submit-query", post(handlers::intake::submit_query))
        .merge(
            Router::new()
                .route("/get-all-queries", get(handlers::intake::list_queries))
                .route(
                    "/update-query/{id}/status",
                    patch(handlers::intake::update_query_status),
                )
                .route_layer(admin_only()),
        );

    let payment_routes = Router::new()
        .route("/create-order", post(handlers::payments::create_order))
        .route("/getKey", get(handlers::payments::get_key))
        .route("/verify", post(handlers::payments::verify_payment));

    // --- Contas ---
    let user_routes = Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/forget-password", post(handlers::auth::forget_password))
        .merge(
            Router::new()
                .route("/logout", post(handlers::auth::logout))
                .route("/get-user-info", get(handlers::auth::get_user_info))
                .route_layer(signed_in()),
        )
        .merge(
            Router::new()
                .route("/get-all-users", get(handlers::auth::get_all_users))
                .route("/{id}", delete(handlers::auth::delete_user))
                .route_layer(admin_only()),
        );

    let admin_routes = Router::new()
        .route("/signup", post(handlers::auth::admin_signup))
        .route("/login", post(handlers::auth::admin_login));

    let api_routes = Router::new()
        .route("/health", get(handlers::health::health))
        .merge(booking_routes)
        .nest("/services", service_routes)
        .nest("/employees", employee_routes)
        .merge(testimonial_routes)
        .nest("/user-queries", query_routes)
        .nest("/v1", payment_routes)
        .nest("/users", user_routes)
        .nest("/admin", admin_routes)
        .fallback(api_not_found);

    // Qualquer GET fora da API cai no index.html do cliente (SPA)
    let spa = ServeDir::new(&config.client_dist)
        .fallback(ServeFile::new(config.client_dist.join("index.html")));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .fallback_service(spa)
        .layer(DefaultBodyLimit::max(JSON_BODY_LIMIT))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(build_cors_layer(&config))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .with_state(app_state)
}

async fn api_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "API endpoint not found" })),
    )
}

/// Sem CORS_ORIGINS configurado, qualquer origem é aceita (sem credenciais).
pub fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    if config.cors_origins.is_empty() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(origin) => Some(origin),
            Err(e) => {
                tracing::warn!("⚠️ Origem CORS ignorada '{}': {}", o, e);
                None
            }
        })
        .collect();

    base.allow_origin(origins).allow_credentials(true)
}
