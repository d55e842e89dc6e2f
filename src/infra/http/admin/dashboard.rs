use axum::{
    extract::{Form, State},
    http::{
        HeaderValue, StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::warn;

use crate::application::admin::settings::AdminSettingsError;
use crate::application::error::HttpError;
use crate::application::site;
use crate::presentation::admin::views::{
    AdminDashboardPanelTemplate, AdminDashboardView, AuditRowView, SaveStateView,
};

use super::AdminState;
use super::shared::{ACTOR, Toast, panel_patch_response, render_admin_page, render_panel, settings_outcome};

pub(super) async fn admin_dashboard(State(state): State<AdminState>) -> Response {
    let panel = match build_dashboard_panel(&state).await {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };
    render_admin_page(state.chrome.load("/"), panel)
}

pub(super) async fn admin_settings_export(State(state): State<AdminState>) -> Response {
    const SOURCE: &str = "infra::http::admin::settings_export";

    let settings = state.settings.current();
    match site::export_archive(&settings) {
        Ok(text) => {
            let mut response = (StatusCode::OK, text).into_response();
            let headers = response.headers_mut();
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/toml"));
            headers.insert(
                CONTENT_DISPOSITION,
                HeaderValue::from_static("attachment; filename=\"orma-settings.toml\""),
            );
            response
        }
        Err(err) => HttpError::new(
            SOURCE,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to export settings",
            err.to_string(),
        )
        .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ImportForm {
    archive: String,
}

pub(super) async fn admin_settings_import(
    State(state): State<AdminState>,
    Form(form): Form<ImportForm>,
) -> Response {
    let outcome = match site::parse_archive(&form.archive) {
        Ok(parsed) => {
            let result = state.settings.replace(ACTOR, parsed).await;
            settings_outcome("Settings archive", result, || state.settings.current())
        }
        Err(err) => (
            state.settings.current(),
            Toast::error(format!("Import rejected: {err}")),
        ),
    };
    let (_, toast) = outcome;

    respond_with_dashboard(&state, toast).await
}

pub(super) async fn admin_settings_reset(State(state): State<AdminState>) -> Response {
    let result = state.settings.reset(ACTOR).await;
    let toast = match result {
        Ok(_) => Toast::success("Settings reset to defaults"),
        Err(AdminSettingsError::Store(_)) => {
            Toast::error("Reset applied, but clearing the stored snapshot failed")
        }
        Err(err) => Toast::error(format!("Reset applied, but could not be recorded: {err}")),
    };

    respond_with_dashboard(&state, toast).await
}

async fn respond_with_dashboard(state: &AdminState, toast: Toast) -> Response {
    match build_dashboard_panel(state).await {
        Ok(html) => panel_patch_response(html, toast),
        Err(err) => err.into_response(),
    }
}

async fn build_dashboard_panel(state: &AdminState) -> Result<String, HttpError> {
    let settings = state.settings.current();

    // Dashboard stays useful even when the audit table is unreadable.
    let recent = match state.audit.list_recent(8).await {
        Ok(records) => records,
        Err(err) => {
            warn!(error = %err, "failed to load recent audit entries for dashboard");
            Vec::new()
        }
    };

    let view = AdminDashboardView {
        brand_name: settings.brand.name.clone(),
        services_count: settings.services.len(),
        hours_published: settings.working_hours.is_some(),
        save_state: SaveStateView::new(state.settings.last_saved_at()),
        recent_audit: recent.iter().map(AuditRowView::from).collect(),
        export_href: "/settings/export",
        preview_href: state.chrome.public_site_url().to_string(),
    };

    render_panel(AdminDashboardPanelTemplate { view })
}
