use axum::{
    extract::{Form, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::application::admin::settings::UpdateHoursCommand;
use crate::domain::settings::WeekSchedule;
use crate::presentation::admin::views::{AdminHoursPanelTemplate, HoursPanelView};

use super::AdminState;
use super::shared::{ACTOR, panel_patch_response, render_admin_page, render_panel, settings_outcome};

/// One text input per day and language; unchecking `published` removes the
/// whole section from the aggregate.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct HoursForm {
    published: Option<String>,
    monday_en: String,
    monday_fr: String,
    tuesday_en: String,
    tuesday_fr: String,
    wednesday_en: String,
    wednesday_fr: String,
    thursday_en: String,
    thursday_fr: String,
    friday_en: String,
    friday_fr: String,
    saturday_en: String,
    saturday_fr: String,
    sunday_en: String,
    sunday_fr: String,
}

impl HoursForm {
    fn into_command(self) -> UpdateHoursCommand {
        UpdateHoursCommand {
            published: self.published.is_some(),
            en: WeekSchedule {
                monday: self.monday_en.trim().to_string(),
                tuesday: self.tuesday_en.trim().to_string(),
                wednesday: self.wednesday_en.trim().to_string(),
                thursday: self.thursday_en.trim().to_string(),
                friday: self.friday_en.trim().to_string(),
                saturday: self.saturday_en.trim().to_string(),
                sunday: self.sunday_en.trim().to_string(),
            },
            fr: WeekSchedule {
                monday: self.monday_fr.trim().to_string(),
                tuesday: self.tuesday_fr.trim().to_string(),
                wednesday: self.wednesday_fr.trim().to_string(),
                thursday: self.thursday_fr.trim().to_string(),
                friday: self.friday_fr.trim().to_string(),
                saturday: self.saturday_fr.trim().to_string(),
                sunday: self.sunday_fr.trim().to_string(),
            },
        }
    }
}

pub(super) async fn admin_hours(State(state): State<AdminState>) -> Response {
    let settings = state.settings.current();
    let panel = match render_panel(AdminHoursPanelTemplate {
        view: HoursPanelView::from(&settings),
    }) {
        Ok(html) => html,
        Err(err) => return err.into_response(),
    };
    render_admin_page(state.chrome.load("/hours"), panel)
}

pub(super) async fn admin_hours_update(
    State(state): State<AdminState>,
    Form(form): Form<HoursForm>,
) -> Response {
    let result = state.settings.update_hours(ACTOR, form.into_command()).await;
    let (settings, toast) = settings_outcome("Working hours", result, || state.settings.current());

    match render_panel(AdminHoursPanelTemplate {
        view: HoursPanelView::from(&settings),
    }) {
        Ok(html) => panel_patch_response(html, toast),
        Err(err) => err.into_response(),
    }
}
