use std::{io::ErrorKind, sync::Arc};

use axum::{
    Router,
    body::Body,
    extract::{Path, Query, State},
    http::{
        HeaderMap, HeaderValue, StatusCode,
        header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
    },
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use bytes::Bytes;
use chrono::Datelike;
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::error;

use crate::{
    application::{error::HttpError, store::SettingsStore},
    domain::locale::Locale,
    domain::settings::Weekday,
    infra::{
        db::SqliteRepositories,
        uploads::{UploadStorage, UploadStorageError},
    },
    presentation::views::{
        IndexTemplate, LandingView, render_not_found_response, render_template_response,
    },
};

use super::middleware::{log_public_responses, set_request_context};

const LOCALE_COOKIE: &str = "orma-lang";

#[derive(Clone)]
pub struct PublicState {
    pub store: Arc<SettingsStore>,
    pub db: Arc<SqliteRepositories>,
    pub upload_storage: Arc<UploadStorage>,
    pub default_locale: Locale,
    pub timezone: Tz,
}

pub fn build_public_router(state: PublicState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(healthz))
        .route("/_health/db", get(public_health))
        .route("/favicon.ico", get(favicon))
        .route("/media/{*path}", get(serve_upload))
        .route(
            "/static/public/{*path}",
            get(crate::infra::assets::serve_public),
        )
        .route(
            "/static/common/{*path}",
            get(crate::infra::assets::serve_common),
        )
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_public_responses))
        .layer(middleware::from_fn(set_request_context))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LangQuery {
    lang: Option<String>,
}

async fn index(
    State(state): State<PublicState>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
) -> Response {
    let requested = query
        .lang
        .as_deref()
        .and_then(|value| Locale::try_from(value).ok());
    let locale = requested
        .or_else(|| locale_from_cookie(&headers))
        .unwrap_or(state.default_locale);

    let settings = state.store.current();
    let today = today_weekday(state.timezone);
    let view = LandingView::build(&settings, locale, today);

    let mut response = render_template_response(IndexTemplate { view }, StatusCode::OK);

    // Only an explicit `?lang=` choice is remembered.
    if requested.is_some()
        && let Ok(cookie) = HeaderValue::from_str(&format!(
            "{LOCALE_COOKIE}={}; Path=/; Max-Age=31536000; SameSite=Lax",
            locale.as_str()
        ))
    {
        response.headers_mut().insert(SET_COOKIE, cookie);
    }

    response
}

fn locale_from_cookie(headers: &HeaderMap) -> Option<Locale> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == LOCALE_COOKIE {
            Locale::try_from(value).ok()
        } else {
            None
        }
    })
}

fn today_weekday(timezone: Tz) -> Weekday {
    match chrono::Utc::now().with_timezone(&timezone).weekday() {
        chrono::Weekday::Mon => Weekday::Monday,
        chrono::Weekday::Tue => Weekday::Tuesday,
        chrono::Weekday::Wed => Weekday::Wednesday,
        chrono::Weekday::Thu => Weekday::Thursday,
        chrono::Weekday::Fri => Weekday::Friday,
        chrono::Weekday::Sat => Weekday::Saturday,
        chrono::Weekday::Sun => Weekday::Sunday,
    }
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

async fn public_health(State(state): State<PublicState>) -> Response {
    super::db_health_response(state.db.health_check().await)
}

async fn favicon(State(state): State<PublicState>) -> Response {
    let settings = state.store.current();
    match HeaderValue::from_str(&settings.brand.favicon) {
        Ok(location) => {
            let mut response = StatusCode::TEMPORARY_REDIRECT.into_response();
            response.headers_mut().insert(LOCATION, location);
            response
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn serve_upload(State(state): State<PublicState>, Path(path): Path<String>) -> Response {
    const SOURCE: &str = "infra::http::public::serve_upload";

    match state.upload_storage.read(&path).await {
        Ok(bytes) => build_upload_response(&path, bytes),
        Err(UploadStorageError::InvalidPath) => HttpError::new(
            SOURCE,
            StatusCode::NOT_FOUND,
            "Media not found",
            "The requested media file is not available",
        )
        .into_response(),
        Err(UploadStorageError::Io(err)) if err.kind() == ErrorKind::NotFound => HttpError::new(
            SOURCE,
            StatusCode::NOT_FOUND,
            "Media not found",
            "The requested media file is not available",
        )
        .into_response(),
        Err(err) => {
            error!(
                source = SOURCE,
                path = %path,
                error = %err,
                "failed to read stored media file"
            );
            HttpError::new(
                SOURCE,
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read media file",
                err.to_string(),
            )
            .into_response()
        }
    }
}

fn build_upload_response(path: &str, bytes: Bytes) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let len = bytes.len();
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(mime.as_ref()) {
        headers.insert(CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&len.to_string()) {
        headers.insert(CONTENT_LENGTH, value);
    }
    // Stored paths are content-addressed, so long-lived caching is safe.
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static("public, max-age=31536000, immutable"),
    );

    response
}

async fn fallback() -> Response {
    render_not_found_response()
}
