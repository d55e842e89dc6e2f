//! Supported interface languages.

use serde::{Deserialize, Serialize};

/// Closed set of languages the site renders in.
///
/// Every locale-keyed value in the settings aggregate carries one entry per
/// variant; lookups never fail, they fall back (empty string for settings
/// copy, the raw key for catalog strings).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
}

/// All locales, in display order.
pub const SUPPORTED_LOCALES: [Locale; 2] = [Locale::En, Locale::Fr];

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fr => "fr",
        }
    }

    /// Native-language label for the toggle control.
    pub fn label(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::Fr => "Français",
        }
    }

    /// The other supported language; drives the one-click toggle.
    pub fn other(self) -> Self {
        match self {
            Locale::En => Locale::Fr,
            Locale::Fr => Locale::En,
        }
    }
}

impl TryFrom<&str> for Locale {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "en" => Ok(Locale::En),
            "fr" => Ok(Locale::Fr),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_codes_and_rejects_others() {
        assert_eq!(Locale::try_from("en"), Ok(Locale::En));
        assert_eq!(Locale::try_from("fr"), Ok(Locale::Fr));
        assert!(Locale::try_from("de").is_err());
        assert!(Locale::try_from("EN").is_err());
    }

    #[test]
    fn toggle_is_an_involution() {
        for locale in SUPPORTED_LOCALES {
            assert_eq!(locale.other().other(), locale);
        }
    }
}
