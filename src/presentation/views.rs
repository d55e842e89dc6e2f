//! Public landing page view models and rendering helpers.
//!
//! The view layer is built once per request from the in-memory aggregate:
//! the templates receive fully resolved strings (locale already applied,
//! links already assembled) and contain no logic beyond iteration.

use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::application::catalog;
use crate::application::error::{ErrorReport, HttpError};
use crate::domain::icons::ServiceIcon;
use crate::domain::locale::Locale;
use crate::domain::settings::{SiteSettings, WEEKDAYS, Weekday};

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;
        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response() -> Response {
    let mut response = render_template_response(
        ErrorTemplate {
            view: ErrorPageView::not_found(),
        },
        StatusCode::NOT_FOUND,
    );
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

#[derive(Clone)]
pub struct ThemeVars {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub font: String,
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
    pub lang: &'static str,
}

#[derive(Clone)]
pub struct TopBarView {
    pub logo: String,
    pub brand_name: String,
    pub language_label: String,
    pub toggle_href: String,
    pub toggle_label: &'static str,
    pub instagram_href: String,
    pub instagram_label: String,
    pub linktree_href: String,
    pub linktree_label: String,
    pub email_href: String,
    pub email_label: String,
}

#[derive(Clone)]
pub struct HeroView {
    pub tagline: String,
    pub description: String,
    pub whatsapp_href: String,
    pub book_label: String,
    pub email_href: String,
    pub email_label: String,
    pub explore_label: String,
}

#[derive(Clone)]
pub struct AboutView {
    pub title: String,
    pub description: String,
}

#[derive(Clone)]
pub struct ServiceCardView {
    pub icon: &'static str,
    pub title: String,
    pub description: String,
    pub book_href: String,
    pub book_label: String,
}

#[derive(Clone)]
pub struct ServicesSectionView {
    pub title: String,
    pub cards: Vec<ServiceCardView>,
}

#[derive(Clone)]
pub struct CtaView {
    pub text: String,
    pub whatsapp_href: String,
    pub whatsapp_label: String,
    pub email_href: String,
    pub email_label: String,
}

#[derive(Clone)]
pub struct HoursRowView {
    pub label: &'static str,
    pub value: String,
    pub is_today: bool,
}

#[derive(Clone)]
pub struct HoursTableView {
    pub title: String,
    pub rows: Vec<HoursRowView>,
}

#[derive(Clone)]
pub struct QuickLinkView {
    pub label: String,
    pub href: String,
    pub external: bool,
}

#[derive(Clone)]
pub struct ContactSectionView {
    pub title: String,
    pub quick_links_title: String,
    pub quick_links: Vec<QuickLinkView>,
    pub hours: Option<HoursTableView>,
}

#[derive(Clone)]
pub struct FooterView {
    pub slogan: String,
    pub legal: String,
}

#[derive(Clone)]
pub struct LandingView {
    pub meta: PageMetaView,
    pub theme: ThemeVars,
    pub topbar: TopBarView,
    pub hero: HeroView,
    pub about: AboutView,
    pub services: ServicesSectionView,
    pub cta: CtaView,
    pub contact: ContactSectionView,
    pub footer: FooterView,
}

impl LandingView {
    /// Assemble the whole page for one locale. `today` is resolved in the
    /// studio timezone by the caller.
    pub fn build(settings: &SiteSettings, locale: Locale, today: Weekday) -> Self {
        let t = |key: &'static str| catalog::translate(locale, key).to_string();

        let whatsapp_message = catalog::translate(locale, "whatsapp.message");
        let whatsapp_href = settings.contact.whatsapp_link(Some(whatsapp_message));
        let email_href = format!("mailto:{}", settings.contact.email);

        let meta = PageMetaView {
            title: settings.brand.name.clone(),
            description: settings.brand.tagline.get(locale).to_string(),
            lang: locale.as_str(),
        };

        let theme = ThemeVars {
            primary: settings.theme.colors.primary.clone(),
            secondary: settings.theme.colors.secondary.clone(),
            background: settings.theme.colors.background.clone(),
            text: settings.theme.colors.text.clone(),
            font: settings.theme.fonts.primary.clone(),
        };

        let topbar = TopBarView {
            logo: settings.brand.logo.clone(),
            brand_name: settings.brand.name.clone(),
            language_label: t("nav.language"),
            toggle_href: format!("/?lang={}", locale.other().as_str()),
            toggle_label: locale.other().label(),
            instagram_href: settings.contact.instagram.clone(),
            instagram_label: t("nav.instagram"),
            linktree_href: settings.contact.linktree.clone(),
            linktree_label: t("nav.linktree"),
            email_href: email_href.clone(),
            email_label: t("nav.email"),
        };

        let hero = HeroView {
            tagline: settings.brand.tagline.get(locale).to_string(),
            description: settings.brand.description.get(locale).to_string(),
            whatsapp_href: whatsapp_href.clone(),
            book_label: t("hero.book_whatsapp"),
            email_href: email_href.clone(),
            email_label: t("hero.email_us"),
            explore_label: t("hero.explore_services"),
        };

        let about = AboutView {
            title: t("about.title"),
            description: settings.brand.description.get(locale).to_string(),
        };

        let cards = settings
            .services
            .iter()
            .map(|service| ServiceCardView {
                icon: ServiceIcon::parse_or_default(&service.icon).as_str(),
                title: service.title.get(locale).to_string(),
                description: service.description.get(locale).to_string(),
                book_href: whatsapp_href.clone(),
                book_label: t("services.book"),
            })
            .collect();

        let services = ServicesSectionView {
            title: t("services.title"),
            cards,
        };

        let cta = CtaView {
            text: t("cta.text"),
            whatsapp_href: whatsapp_href.clone(),
            whatsapp_label: t("cta.whatsapp"),
            email_href: email_href.clone(),
            email_label: t("cta.email"),
        };

        let hours = settings.working_hours.as_ref().map(|hours| {
            let schedule = hours.for_locale(locale);
            HoursTableView {
                title: t("contact.hours"),
                rows: WEEKDAYS
                    .iter()
                    .map(|day| HoursRowView {
                        label: day.label(locale),
                        value: schedule.get(*day).to_string(),
                        is_today: *day == today,
                    })
                    .collect(),
            }
        });

        let contact = ContactSectionView {
            title: t("contact.title"),
            quick_links_title: t("contact.quick_links"),
            quick_links: vec![
                QuickLinkView {
                    label: t("cta.whatsapp"),
                    href: whatsapp_href,
                    external: true,
                },
                QuickLinkView {
                    label: t("nav.instagram"),
                    href: settings.contact.instagram.clone(),
                    external: true,
                },
                QuickLinkView {
                    label: t("nav.linktree"),
                    href: settings.contact.linktree.clone(),
                    external: true,
                },
                QuickLinkView {
                    label: t("nav.email"),
                    href: email_href,
                    external: false,
                },
            ],
            hours,
        };

        let footer = FooterView {
            slogan: t("footer.slogan"),
            legal: t("footer.legal"),
        };

        Self {
            meta,
            theme,
            topbar,
            hero,
            about,
            services,
            cta,
            contact,
            footer,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LandingView,
}

#[derive(Clone)]
pub struct ErrorPageView {
    pub status: u16,
    pub title: &'static str,
    pub message: &'static str,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            status: 404,
            title: "Page not found",
            message: "The page you are looking for does not exist.",
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: ErrorPageView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::seed_settings;

    #[test]
    fn landing_view_resolves_locale_specific_copy() {
        let seed = seed_settings();
        let en = LandingView::build(&seed, Locale::En, Weekday::Monday);
        let fr = LandingView::build(&seed, Locale::Fr, Weekday::Monday);

        assert_eq!(en.services.title, "Our Services");
        assert_eq!(fr.services.title, "Nos Services");
        assert_eq!(en.topbar.toggle_href, "/?lang=fr");
        assert_eq!(fr.topbar.toggle_href, "/?lang=en");
        assert_eq!(en.services.cards.len(), seed.services.len());
    }

    #[test]
    fn whatsapp_links_carry_the_prefilled_message() {
        let seed = seed_settings();
        let view = LandingView::build(&seed, Locale::En, Weekday::Monday);
        assert!(view.hero.whatsapp_href.starts_with("https://wa.me/1234567890?text="));
    }

    #[test]
    fn hours_section_disappears_with_unpublished_hours() {
        let mut settings = seed_settings();
        settings.working_hours = None;
        let view = LandingView::build(&settings, Locale::En, Weekday::Friday);
        assert!(view.contact.hours.is_none());
    }

    #[test]
    fn todays_row_is_highlighted() {
        let seed = seed_settings();
        let view = LandingView::build(&seed, Locale::En, Weekday::Wednesday);
        let hours = view.contact.hours.expect("seed publishes hours");
        let highlighted: Vec<_> = hours
            .rows
            .iter()
            .filter(|row| row.is_today)
            .map(|row| row.label)
            .collect();
        assert_eq!(highlighted, vec!["Wednesday"]);
    }

    #[test]
    fn unknown_icons_render_as_the_circle() {
        let mut settings = seed_settings();
        settings.services[0].icon = "rocket".to_string();
        let view = LandingView::build(&settings, Locale::En, Weekday::Monday);
        assert_eq!(view.services.cards[0].icon, "circle");
    }
}
