use axum::{
    extract::{Form, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::admin::settings::UpdateBrandCommand;
use crate::domain::settings::LocalizedText;
use crate::presentation::admin::views::{AdminBrandPanelTemplate, BrandPanelView};

use super::AdminState;
use super::shared::{ACTOR, panel_patch_response, render_admin_page, render_panel, settings_outcome};

#[derive(Debug, Deserialize)]
pub(super) struct BrandForm {
    name: String,
    tagline_en: String,
    tagline_fr: String,
    description_en: String,
    description_fr: String,
    logo: String,
    favicon: String,
}

impl BrandForm {
    fn into_command(self) -> UpdateBrandCommand {
        UpdateBrandCommand {
            name: self.name.trim().to_string(),
            tagline: LocalizedText::new(self.tagline_en.trim(), self.tagline_fr.trim()),
            description: LocalizedText::new(
                self.description_en.trim(),
                self.description_fr.trim(),
            ),
            logo: self.logo.trim().to_string(),
            favicon: self.favicon.trim().to_string(),
        }
    }
}

pub(super) async fn admin_brand(State(state): State<AdminState>) -> Response {
    let settings = state.settings.current();
    let panel = match render_panel(AdminBrandPanelTemplate {
        view: BrandPanelView::from(&settings),
    }) {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };
    render_admin_page(state.chrome.load("/brand"), panel)
}

pub(super) async fn admin_brand_update(
    State(state): State<AdminState>,
    Form(form): Form<BrandForm>,
) -> Response {
    let result = state.settings.update_brand(ACTOR, form.into_command()).await;
    let (settings, toast) = settings_outcome("Brand", result, || state.settings.current());

    match render_panel(AdminBrandPanelTemplate {
        view: BrandPanelView::from(&settings),
    }) {
        Ok(html) => panel_patch_response(html, toast),
        Err(err) => err.into_response(),
    }
}
