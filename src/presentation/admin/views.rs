//! Admin panel view models.
//!
//! Every page renders through [`AdminPageTemplate`]: the section panel is
//! rendered first, then wrapped in the layout chrome. The same panel
//! templates are re-rendered on their own for datastar patches after a POST.

use askama::Template;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::domain::entities::AuditLogRecord;
use crate::domain::icons::{SERVICE_ICONS, ServiceIcon};
use crate::domain::settings::{SiteSettings, WEEKDAYS};

#[derive(Clone)]
pub struct AdminBrandView {
    pub title: String,
}

#[derive(Clone)]
pub struct AdminNavigationItemView {
    pub label: String,
    pub href: String,
    pub is_active: bool,
    pub open_in_new_tab: bool,
}

#[derive(Clone)]
pub struct AdminNavigationView {
    pub items: Vec<AdminNavigationItemView>,
}

#[derive(Clone)]
pub struct AdminMetaView {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct AdminChrome {
    pub brand: AdminBrandView,
    pub navigation: AdminNavigationView,
    pub meta: AdminMetaView,
}

#[derive(Clone)]
pub struct AdminLayout<T> {
    pub chrome: AdminChrome,
    pub asset_version: String,
    pub content: T,
}

impl<T> AdminLayout<T> {
    pub fn new(chrome: AdminChrome, content: T) -> Self {
        Self {
            chrome,
            asset_version: asset_version(),
            content,
        }
    }
}

fn asset_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Full admin page: layout chrome around a pre-rendered panel.
#[derive(Template)]
#[template(path = "admin/page.html")]
pub struct AdminPageTemplate {
    pub view: AdminLayout<String>,
}

#[derive(Clone)]
pub struct SaveStateView {
    pub last_saved_at: Option<String>,
    /// Set when the process is serving seed defaults that were never saved.
    pub running_on_seed: bool,
}

impl SaveStateView {
    pub fn new(last_saved_at: Option<OffsetDateTime>) -> Self {
        Self {
            running_on_seed: last_saved_at.is_none(),
            last_saved_at: last_saved_at.map(format_timestamp),
        }
    }
}

#[derive(Clone)]
pub struct AdminDashboardView {
    pub brand_name: String,
    pub services_count: usize,
    pub hours_published: bool,
    pub save_state: SaveStateView,
    pub recent_audit: Vec<AuditRowView>,
    pub export_href: &'static str,
    pub preview_href: String,
}

#[derive(Template)]
#[template(path = "admin/panels/dashboard.html")]
pub struct AdminDashboardPanelTemplate {
    pub view: AdminDashboardView,
}

#[derive(Clone)]
pub struct AuditRowView {
    pub created_at: String,
    pub actor: String,
    pub action: String,
    pub entity: String,
}

impl From<&AuditLogRecord> for AuditRowView {
    fn from(record: &AuditLogRecord) -> Self {
        let entity = match &record.entity_id {
            Some(id) => format!("{} {}", record.entity_type, id),
            None => record.entity_type.clone(),
        };
        Self {
            created_at: format_timestamp(record.created_at),
            actor: record.actor.clone(),
            action: record.action.clone(),
            entity,
        }
    }
}

#[derive(Clone)]
pub struct AuditPanelView {
    pub entries: Vec<AuditRowView>,
}

#[derive(Template)]
#[template(path = "admin/panels/audit.html")]
pub struct AdminAuditPanelTemplate {
    pub view: AuditPanelView,
}

#[derive(Clone)]
pub struct BrandPanelView {
    pub name: String,
    pub tagline_en: String,
    pub tagline_fr: String,
    pub description_en: String,
    pub description_fr: String,
    pub logo: String,
    pub favicon: String,
}

impl From<&SiteSettings> for BrandPanelView {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            name: settings.brand.name.clone(),
            tagline_en: settings.brand.tagline.en.clone(),
            tagline_fr: settings.brand.tagline.fr.clone(),
            description_en: settings.brand.description.en.clone(),
            description_fr: settings.brand.description.fr.clone(),
            logo: settings.brand.logo.clone(),
            favicon: settings.brand.favicon.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/panels/brand.html")]
pub struct AdminBrandPanelTemplate {
    pub view: BrandPanelView,
}

#[derive(Clone)]
pub struct ContactPanelView {
    pub email: String,
    pub whatsapp: String,
    pub instagram: String,
    pub linktree: String,
    pub tiktok: String,
}

impl From<&SiteSettings> for ContactPanelView {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            email: settings.contact.email.clone(),
            whatsapp: settings.contact.whatsapp.clone(),
            instagram: settings.contact.instagram.clone(),
            linktree: settings.contact.linktree.clone(),
            tiktok: settings.contact.tiktok.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/panels/contact.html")]
pub struct AdminContactPanelTemplate {
    pub view: ContactPanelView,
}

#[derive(Clone)]
pub struct ThemePanelView {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub font: String,
}

impl From<&SiteSettings> for ThemePanelView {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            primary: settings.theme.colors.primary.clone(),
            secondary: settings.theme.colors.secondary.clone(),
            background: settings.theme.colors.background.clone(),
            text: settings.theme.colors.text.clone(),
            font: settings.theme.fonts.primary.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "admin/panels/theme.html")]
pub struct AdminThemePanelTemplate {
    pub view: ThemePanelView,
}

#[derive(Clone)]
pub struct IconOptionView {
    pub value: &'static str,
    pub selected: bool,
}

#[derive(Clone)]
pub struct ServiceEditorView {
    pub index: usize,
    pub id: String,
    pub title_en: String,
    pub title_fr: String,
    pub description_en: String,
    pub description_fr: String,
    pub icon_options: Vec<IconOptionView>,
}

#[derive(Clone)]
pub struct ServicesPanelView {
    pub services: Vec<ServiceEditorView>,
}

impl From<&SiteSettings> for ServicesPanelView {
    fn from(settings: &SiteSettings) -> Self {
        let services = settings
            .services
            .iter()
            .enumerate()
            .map(|(index, service)| {
                let resolved = ServiceIcon::parse_or_default(&service.icon);
                ServiceEditorView {
                    index,
                    id: service.id.clone(),
                    title_en: service.title.en.clone(),
                    title_fr: service.title.fr.clone(),
                    description_en: service.description.en.clone(),
                    description_fr: service.description.fr.clone(),
                    icon_options: SERVICE_ICONS
                        .iter()
                        .map(|icon| IconOptionView {
                            value: icon.as_str(),
                            selected: *icon == resolved,
                        })
                        .collect(),
                }
            })
            .collect();
        Self { services }
    }
}

#[derive(Template)]
#[template(path = "admin/panels/services.html")]
pub struct AdminServicesPanelTemplate {
    pub view: ServicesPanelView,
}

#[derive(Clone)]
pub struct HoursEditorRowView {
    pub day: &'static str,
    pub label: &'static str,
    pub en: String,
    pub fr: String,
}

#[derive(Clone)]
pub struct HoursPanelView {
    pub published: bool,
    pub rows: Vec<HoursEditorRowView>,
    pub placeholder_en: &'static str,
    pub placeholder_fr: &'static str,
}

impl From<&SiteSettings> for HoursPanelView {
    fn from(settings: &SiteSettings) -> Self {
        let rows = WEEKDAYS
            .iter()
            .map(|day| HoursEditorRowView {
                day: day.as_str(),
                label: day.label(crate::domain::locale::Locale::En),
                en: settings
                    .working_hours
                    .as_ref()
                    .map(|hours| hours.en.get(*day).to_string())
                    .unwrap_or_default(),
                fr: settings
                    .working_hours
                    .as_ref()
                    .map(|hours| hours.fr.get(*day).to_string())
                    .unwrap_or_default(),
            })
            .collect();
        Self {
            published: settings.working_hours.is_some(),
            rows,
            placeholder_en: "Appointment only",
            placeholder_fr: "Sur rendez-vous uniquement",
        }
    }
}

#[derive(Template)]
#[template(path = "admin/panels/hours.html")]
pub struct AdminHoursPanelTemplate {
    pub view: HoursPanelView,
}

#[derive(Clone)]
pub struct AdminToastItem {
    pub id: String,
    pub kind: &'static str,
    pub text: String,
    pub ttl_ms: u64,
}

#[derive(Template)]
#[template(path = "admin/toast_stack.html")]
pub struct AdminToastStackTemplate {
    pub toasts: Vec<AdminToastItem>,
}

fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339).unwrap_or_else(|_| ts.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::seed_settings;

    #[test]
    fn services_panel_marks_the_stored_icon_selected() {
        let view = ServicesPanelView::from(&seed_settings());
        let first = &view.services[0];
        let selected: Vec<_> = first
            .icon_options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value)
            .collect();
        assert_eq!(selected, vec!["stethoscope"]);
    }

    #[test]
    fn unknown_icons_select_the_circle_option() {
        let mut settings = seed_settings();
        settings.services[0].icon = "rocket".to_string();
        let view = ServicesPanelView::from(&settings);
        assert!(
            view.services[0]
                .icon_options
                .iter()
                .any(|option| option.value == "circle" && option.selected)
        );
    }

    #[test]
    fn hours_panel_reflects_unpublished_state_with_empty_rows() {
        let mut settings = seed_settings();
        settings.working_hours = None;
        let view = HoursPanelView::from(&settings);
        assert!(!view.published);
        assert_eq!(view.rows.len(), 7);
        assert!(view.rows.iter().all(|row| row.en.is_empty() && row.fr.is_empty()));
    }
}
