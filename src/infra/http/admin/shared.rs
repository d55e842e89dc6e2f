use askama::{Error as AskamaError, Template};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use datastar::prelude::ElementPatchMode;
use std::time::Duration;
use uuid::Uuid;

use super::selectors::{PANEL, TOAST_STACK};
use crate::{
    application::{
        admin::settings::AdminSettingsError, error::HttpError, store::StoreError,
        stream::StreamBuilder,
    },
    domain::settings::SiteSettings,
    presentation::{
        admin::views as admin_views,
        views::{TemplateRenderError, render_template_response},
    },
};

/// The single operator identity recorded in the audit trail. The admin
/// listener is reachable only from trusted networks; there are no accounts.
pub(super) const ACTOR: &str = "studio-admin";

#[derive(Clone)]
pub(super) struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub text: String,
    pub ttl: Duration,
}

#[derive(Clone, Copy)]
pub(super) enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    fn as_variant(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
        }
    }
}

const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(6000);

impl Toast {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ToastKind::Success,
            text: text.into(),
            ttl: DEFAULT_TOAST_TTL,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: ToastKind::Error,
            text: text.into(),
            ttl: DEFAULT_TOAST_TTL,
        }
    }
}

pub(super) fn push_toasts(stream: &mut StreamBuilder, toasts: &[Toast]) -> Result<(), HttpError> {
    let view_items = toasts
        .iter()
        .map(|toast| admin_views::AdminToastItem {
            id: toast.id.to_string(),
            kind: toast.kind.as_variant(),
            text: toast.text.clone(),
            ttl_ms: toast.ttl.as_millis() as u64,
        })
        .collect::<Vec<_>>();

    let template = admin_views::AdminToastStackTemplate { toasts: view_items };

    let html = template.render().map_err(|err| {
        template_render_http_error(
            "infra::http::admin::push_toasts",
            "Template rendering failed",
            err,
        )
    })?;

    stream.push_patch(html, TOAST_STACK, ElementPatchMode::Replace);
    Ok(())
}

/// Render a section panel to a string, for page wrapping or datastar patches.
pub(super) fn render_panel<T: Template>(template: T) -> Result<String, HttpError> {
    template.render().map_err(|err| {
        template_render_http_error(
            "infra::http::admin::render_panel",
            "Template rendering failed",
            err,
        )
    })
}

/// Full page response: panel HTML wrapped in the admin layout.
pub(super) fn render_admin_page(
    chrome: admin_views::AdminChrome,
    panel_html: String,
) -> Response {
    let view = admin_views::AdminLayout::new(chrome, panel_html);
    render_template_response(admin_views::AdminPageTemplate { view }, StatusCode::OK)
}

/// Datastar response that swaps the section panel and raises a toast.
pub(super) fn panel_patch_response(panel_html: String, toast: Toast) -> Response {
    let mut stream = StreamBuilder::new();
    stream.push_patch(panel_html, PANEL, ElementPatchMode::Replace);
    if let Err(err) = push_toasts(&mut stream, &[toast]) {
        return err.into_response();
    }
    stream.into_response()
}

/// Resolve a settings mutation into the aggregate to re-render and the toast
/// to show. Save failures and audit failures still re-render the applied
/// value: the in-memory aggregate has already moved.
pub(super) fn settings_outcome(
    section: &'static str,
    result: Result<SiteSettings, AdminSettingsError>,
    current: impl FnOnce() -> SiteSettings,
) -> (SiteSettings, Toast) {
    match result {
        Ok(applied) => (applied, Toast::success(format!("{section} updated"))),
        Err(AdminSettingsError::ConstraintViolation(field)) => (
            current(),
            Toast::error(format!("Validation failed: {field}")),
        ),
        Err(AdminSettingsError::Store(StoreError::SaveFailed(_))) => (
            current(),
            Toast::error("Change applied, but saving to the database failed"),
        ),
        Err(AdminSettingsError::Repo(err)) => (
            current(),
            Toast::error(format!("Change saved, but the audit log write failed: {err}")),
        ),
    }
}

pub(super) fn template_render_http_error(
    source: &'static str,
    message: &'static str,
    err: AskamaError,
) -> HttpError {
    HttpError::from(TemplateRenderError::new(source, message, err))
}
