use axum::{
    extract::{Form, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::admin::settings::UpdateContactCommand;
use crate::presentation::admin::views::{AdminContactPanelTemplate, ContactPanelView};

use super::AdminState;
use super::shared::{ACTOR, panel_patch_response, render_admin_page, render_panel, settings_outcome};

#[derive(Debug, Deserialize)]
pub(super) struct ContactForm {
    email: String,
    whatsapp: String,
    instagram: String,
    linktree: String,
    #[serde(default)]
    tiktok: String,
}

impl ContactForm {
    fn into_command(self) -> UpdateContactCommand {
        UpdateContactCommand {
            email: self.email.trim().to_string(),
            whatsapp: self.whatsapp.trim().to_string(),
            instagram: self.instagram.trim().to_string(),
            linktree: self.linktree.trim().to_string(),
            tiktok: self.tiktok.trim().to_string(),
        }
    }
}

pub(super) async fn admin_contact(State(state): State<AdminState>) -> Response {
    let settings = state.settings.current();
    let panel = match render_panel(AdminContactPanelTemplate {
        view: ContactPanelView::from(&settings),
    }) {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };
    render_admin_page(state.chrome.load("/contact"), panel)
}

pub(super) async fn admin_contact_update(
    State(state): State<AdminState>,
    Form(form): Form<ContactForm>,
) -> Response {
    let result = state
        .settings
        .update_contact(ACTOR, form.into_command())
        .await;
    let (settings, toast) = settings_outcome("Contact", result, || state.settings.current());

    match render_panel(AdminContactPanelTemplate {
        view: ContactPanelView::from(&settings),
    }) {
        Ok(html) => panel_patch_response(html, toast),
        Err(err) => err.into_response(),
    }
}
