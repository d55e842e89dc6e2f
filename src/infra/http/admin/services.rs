use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::admin::settings::EditServiceCommand;
use crate::domain::settings::LocalizedText;
use crate::presentation::admin::views::{AdminServicesPanelTemplate, ServicesPanelView};

use super::AdminState;
use super::shared::{ACTOR, panel_patch_response, render_admin_page, render_panel, settings_outcome};

#[derive(Debug, Deserialize)]
pub(super) struct ServiceEditForm {
    title_en: String,
    title_fr: String,
    description_en: String,
    description_fr: String,
    icon: String,
}

pub(super) async fn admin_services(State(state): State<AdminState>) -> Response {
    let settings = state.settings.current();
    let panel = match render_panel(AdminServicesPanelTemplate {
        view: ServicesPanelView::from(&settings),
    }) {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };
    render_admin_page(state.chrome.load("/services"), panel)
}

pub(super) async fn admin_service_edit(
    State(state): State<AdminState>,
    Path(index): Path<usize>,
    Form(form): Form<ServiceEditForm>,
) -> Response {
    let command = EditServiceCommand {
        index,
        title: LocalizedText::new(form.title_en.trim(), form.title_fr.trim()),
        description: LocalizedText::new(form.description_en.trim(), form.description_fr.trim()),
        icon: form.icon.trim().to_string(),
    };

    let result = state.settings.edit_service(ACTOR, command).await;
    respond_with_services_panel(settings_outcome("Service", result, || {
        state.settings.current()
    }))
}

pub(super) async fn admin_service_add(State(state): State<AdminState>) -> Response {
    let result = state.settings.add_service(ACTOR).await;
    respond_with_services_panel(settings_outcome("Services", result, || {
        state.settings.current()
    }))
}

pub(super) async fn admin_service_delete(
    State(state): State<AdminState>,
    Path(index): Path<usize>,
) -> Response {
    let result = state.settings.delete_service(ACTOR, index).await;
    respond_with_services_panel(settings_outcome("Services", result, || {
        state.settings.current()
    }))
}

fn respond_with_services_panel(
    (settings, toast): (crate::domain::settings::SiteSettings, super::shared::Toast),
) -> Response {
    match render_panel(AdminServicesPanelTemplate {
        view: ServicesPanelView::from(&settings),
    }) {
        Ok(html) => panel_patch_response(html, toast),
        Err(err) => err.into_response(),
    }
}
