use axum::{
    extract::{Form, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::admin::settings::UpdateThemeCommand;
use crate::presentation::admin::views::{AdminThemePanelTemplate, ThemePanelView};

use super::AdminState;
use super::shared::{ACTOR, panel_patch_response, render_admin_page, render_panel, settings_outcome};

#[derive(Debug, Deserialize)]
pub(super) struct ThemeForm {
    primary: String,
    secondary: String,
    background: String,
    text: String,
    font: String,
}

impl ThemeForm {
    fn into_command(self) -> UpdateThemeCommand {
        UpdateThemeCommand {
            primary: self.primary.trim().to_string(),
            secondary: self.secondary.trim().to_string(),
            background: self.background.trim().to_string(),
            text: self.text.trim().to_string(),
            font: self.font.trim().to_string(),
        }
    }
}

pub(super) async fn admin_theme(State(state): State<AdminState>) -> Response {
    let settings = state.settings.current();
    let panel = match render_panel(AdminThemePanelTemplate {
        view: ThemePanelView::from(&settings),
    }) {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };
    render_admin_page(state.chrome.load("/theme"), panel)
}

pub(super) async fn admin_theme_update(
    State(state): State<AdminState>,
    Form(form): Form<ThemeForm>,
) -> Response {
    let result = state.settings.update_theme(ACTOR, form.into_command()).await;
    let (settings, toast) = settings_outcome("Theme", result, || state.settings.current());

    match render_panel(AdminThemePanelTemplate {
        view: ThemePanelView::from(&settings),
    }) {
        Ok(html) => panel_patch_response(html, toast),
        Err(err) => err.into_response(),
    }
}
