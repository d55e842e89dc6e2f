use axum::{
    extract::State,
    response::{IntoResponse, Response},
};

use crate::infra::http::repo_error_to_http;
use crate::presentation::admin::views::{AdminAuditPanelTemplate, AuditPanelView, AuditRowView};

use super::AdminState;
use super::shared::{render_admin_page, render_panel};

const RECENT_LIMIT: u32 = 50;

pub(super) async fn admin_audit(State(state): State<AdminState>) -> Response {
    let records = match state.audit.list_recent(RECENT_LIMIT).await {
        Ok(records) => records,
        Err(err) => {
            return repo_error_to_http("infra::http::admin::audit", err).into_response();
        }
    };

    let view = AuditPanelView {
        entries: records.iter().map(AuditRowView::from).collect(),
    };

    let panel = match render_panel(AdminAuditPanelTemplate { view }) {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };
    render_admin_page(state.chrome.load("/audit"), panel)
}
