//! The site settings aggregate: brand copy, contact details, theme,
//! services catalog, and working hours.
//!
//! The aggregate is always fully shaped. Only `working_hours` is optional at
//! the top level; every other section is present in every snapshot. The wire
//! form (persisted JSON, export archives) uses camelCase keys.

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::domain::locale::{Locale, SUPPORTED_LOCALES};

/// One string per supported language.
///
/// A blank entry is legal: `get` returns it as-is and the templates render an
/// empty field rather than failing. Older snapshots that omit a language
/// deserialize to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub fr: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, fr: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            fr: fr.into(),
        }
    }

    /// Text for `locale`; blank when that language was never filled in.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Fr => &self.fr,
        }
    }

    /// True when every supported language has a non-blank value.
    pub fn is_complete(&self) -> bool {
        SUPPORTED_LOCALES
            .iter()
            .all(|locale| !self.get(*locale).trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandSettings {
    pub name: String,
    pub tagline: LocalizedText,
    pub description: LocalizedText,
    pub logo: String,
    pub favicon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    pub whatsapp: String,
    pub instagram: String,
    pub linktree: String,
    #[serde(default)]
    pub tiktok: String,
}

impl ContactDetails {
    /// The WhatsApp number reduced to digits. Accepts both raw digit strings
    /// and `+`-prefixed international formats.
    pub fn whatsapp_digits(&self) -> String {
        self.whatsapp
            .chars()
            .filter(|ch| ch.is_ascii_digit())
            .collect()
    }

    /// `wa.me` chat link, optionally with a prefilled message.
    pub fn whatsapp_link(&self, message: Option<&str>) -> String {
        let base = format!("https://wa.me/{}", self.whatsapp_digits());
        match message {
            Some(text) => match Url::parse_with_params(&base, [("text", text)]) {
                Ok(url) => url.into(),
                Err(_) => base,
            },
            None => base,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFonts {
    pub primary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSettings {
    pub colors: ThemeColors,
    pub fonts: ThemeFonts,
}

/// One offered service. `id` is assigned at creation and never reassigned;
/// uniqueness across the sequence is the caller's responsibility when adding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: LocalizedText,
    pub description: LocalizedText,
    #[serde(default)]
    pub icon: String,
}

impl Service {
    /// Fresh opaque id for a newly added service.
    pub fn fresh_id() -> String {
        format!("service-{}", Uuid::new_v4().simple())
    }

    /// The placeholder entry appended by the services manager.
    pub fn placeholder() -> Self {
        Self {
            id: Self::fresh_id(),
            title: LocalizedText::new("New Service", "Nouveau Service"),
            description: LocalizedText::new("Service description", "Description du service"),
            icon: "circle".to_string(),
        }
    }
}

/// Days of the week, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
    Weekday::Sunday,
];

impl Weekday {
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Weekday::Monday, Locale::En) => "Monday",
            (Weekday::Monday, Locale::Fr) => "Lundi",
            (Weekday::Tuesday, Locale::En) => "Tuesday",
            (Weekday::Tuesday, Locale::Fr) => "Mardi",
            (Weekday::Wednesday, Locale::En) => "Wednesday",
            (Weekday::Wednesday, Locale::Fr) => "Mercredi",
            (Weekday::Thursday, Locale::En) => "Thursday",
            (Weekday::Thursday, Locale::Fr) => "Jeudi",
            (Weekday::Friday, Locale::En) => "Friday",
            (Weekday::Friday, Locale::Fr) => "Vendredi",
            (Weekday::Saturday, Locale::En) => "Saturday",
            (Weekday::Saturday, Locale::Fr) => "Samedi",
            (Weekday::Sunday, Locale::En) => "Sunday",
            (Weekday::Sunday, Locale::Fr) => "Dimanche",
        }
    }
}

/// Free-text opening hours for one week in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSchedule {
    #[serde(default)]
    pub monday: String,
    #[serde(default)]
    pub tuesday: String,
    #[serde(default)]
    pub wednesday: String,
    #[serde(default)]
    pub thursday: String,
    #[serde(default)]
    pub friday: String,
    #[serde(default)]
    pub saturday: String,
    #[serde(default)]
    pub sunday: String,
}

impl WeekSchedule {
    pub fn get(&self, day: Weekday) -> &str {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn set(&mut self, day: Weekday, value: String) {
        match day {
            Weekday::Monday => self.monday = value,
            Weekday::Tuesday => self.tuesday = value,
            Weekday::Wednesday => self.wednesday = value,
            Weekday::Thursday => self.thursday = value,
            Weekday::Friday => self.friday = value,
            Weekday::Saturday => self.saturday = value,
            Weekday::Sunday => self.sunday = value,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingHours {
    #[serde(default)]
    pub en: WeekSchedule,
    #[serde(default)]
    pub fr: WeekSchedule,
}

impl WorkingHours {
    pub fn for_locale(&self, locale: Locale) -> &WeekSchedule {
        match locale {
            Locale::En => &self.en,
            Locale::Fr => &self.fr,
        }
    }

    pub fn for_locale_mut(&mut self, locale: Locale) -> &mut WeekSchedule {
        match locale {
            Locale::En => &mut self.en,
            Locale::Fr => &mut self.fr,
        }
    }
}

/// The whole configuration aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub brand: BrandSettings,
    pub contact: ContactDetails,
    pub theme: ThemeSettings,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours: Option<WorkingHours>,
}

impl SiteSettings {
    /// First service id that appears more than once, if any. The store never
    /// deduplicates; editing surfaces use this to refuse bad drafts.
    pub fn duplicate_service_id(&self) -> Option<&str> {
        for (index, service) in self.services.iter().enumerate() {
            if self.services[..index]
                .iter()
                .any(|earlier| earlier.id == service.id)
            {
                return Some(&service.id);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_text_falls_back_to_blank() {
        let text: LocalizedText = serde_json::from_str(r#"{"en":"Hello"}"#).unwrap();
        assert_eq!(text.get(Locale::En), "Hello");
        assert_eq!(text.get(Locale::Fr), "");
        assert!(!text.is_complete());
    }

    #[test]
    fn whatsapp_digits_tolerates_both_formats() {
        let mut contact = ContactDetails {
            email: String::new(),
            whatsapp: "1234567890".to_string(),
            instagram: String::new(),
            linktree: String::new(),
            tiktok: String::new(),
        };
        assert_eq!(contact.whatsapp_digits(), "1234567890");

        contact.whatsapp = "+33 6 12 34 56 78".to_string();
        assert_eq!(contact.whatsapp_digits(), "33612345678");
        assert_eq!(
            contact.whatsapp_link(None),
            "https://wa.me/33612345678".to_string()
        );
    }

    #[test]
    fn whatsapp_link_encodes_message() {
        let contact = ContactDetails {
            email: String::new(),
            whatsapp: "+1234567890".to_string(),
            instagram: String::new(),
            linktree: String::new(),
            tiktok: String::new(),
        };
        assert_eq!(
            contact.whatsapp_link(Some("Hello Podoflex, I'd like to book.")),
            "https://wa.me/1234567890?text=Hello+Podoflex%2C+I%27d+like+to+book."
        );
    }

    #[test]
    fn duplicate_service_id_reports_first_repeat() {
        let service = |id: &str| Service {
            id: id.to_string(),
            title: LocalizedText::default(),
            description: LocalizedText::default(),
            icon: String::new(),
        };
        let mut settings = crate::domain::seed::seed_settings();
        settings.services = vec![service("a"), service("b"), service("a")];
        assert_eq!(settings.duplicate_service_id(), Some("a"));

        settings.services = vec![service("a"), service("b")];
        assert_eq!(settings.duplicate_service_id(), None);
    }

    #[test]
    fn fresh_service_ids_do_not_collide() {
        let first = Service::fresh_id();
        let second = Service::fresh_id();
        assert_ne!(first, second);
        assert!(first.starts_with("service-"));
    }

    #[test]
    fn working_hours_is_dropped_from_wire_form_when_absent() {
        let mut settings = crate::domain::seed::seed_settings();
        settings.working_hours = None;
        let encoded = serde_json::to_value(&settings).unwrap();
        assert!(encoded.get("workingHours").is_none());
    }

    #[test]
    fn wire_form_uses_camel_case_keys() {
        let settings = crate::domain::seed::seed_settings();
        let encoded = serde_json::to_value(&settings).unwrap();
        assert!(encoded.get("workingHours").is_some());
        assert!(encoded["brand"].get("tagline").is_some());
        assert_eq!(encoded["brand"]["tagline"]["en"], "Step into healing, stay in comfort.");
    }
}
