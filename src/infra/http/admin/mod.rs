mod audit;
mod brand;
mod contact;
mod dashboard;
mod health;
mod hours;
mod selectors;
mod services;
mod shared;
mod state;
mod theme;
mod uploads;

pub use state::AdminState;

use axum::{
    Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode, header::LOCATION},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};

use crate::infra::assets;

use super::middleware::{log_admin_responses, set_request_context};

pub fn build_admin_router(state: AdminState, upload_body_limit: usize) -> Router {
    Router::new()
        .route("/", get(dashboard::admin_dashboard))
        .route(
            "/brand",
            get(brand::admin_brand).post(brand::admin_brand_update),
        )
        .route(
            "/contact",
            get(contact::admin_contact).post(contact::admin_contact_update),
        )
        .route(
            "/theme",
            get(theme::admin_theme).post(theme::admin_theme_update),
        )
        .route("/services", get(services::admin_services))
        .route("/services/add", post(services::admin_service_add))
        .route("/services/{index}/edit", post(services::admin_service_edit))
        .route(
            "/services/{index}/delete",
            post(services::admin_service_delete),
        )
        .route(
            "/hours",
            get(hours::admin_hours).post(hours::admin_hours_update),
        )
        .route("/audit", get(audit::admin_audit))
        .route("/settings/export", get(dashboard::admin_settings_export))
        .route("/settings/import", post(dashboard::admin_settings_import))
        .route("/settings/reset", post(dashboard::admin_settings_reset))
        .route(
            "/uploads/brand",
            post(uploads::admin_brand_asset_upload)
                .layer(DefaultBodyLimit::max(upload_body_limit)),
        )
        .route("/healthz", get(healthz))
        .route("/_health/db", get(health::admin_health))
        .route("/static/admin/{*path}", get(assets::serve_admin))
        .route("/static/common/{*path}", get(assets::serve_common))
        .route("/favicon.ico", get(favicon))
        .with_state(state)
        .layer(middleware::from_fn(log_admin_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn favicon(State(state): State<AdminState>) -> Response {
    let settings = state.settings.current();
    match HeaderValue::from_str(&settings.brand.favicon) {
        Ok(location) => {
            let mut response = StatusCode::TEMPORARY_REDIRECT.into_response();
            response.headers_mut().insert(LOCATION, location);
            response
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}
