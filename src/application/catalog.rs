//! Static catalog of interface strings, keyed by locale.
//!
//! Settings-driven copy (taglines, service titles, hours) lives in the
//! aggregate; everything else the chrome needs is here. Lookup misses return
//! the raw key so a template with a stale key renders the key, never panics.

use crate::domain::locale::Locale;

struct CatalogEntry {
    key: &'static str,
    en: &'static str,
    fr: &'static str,
}

/// Translate `key` for `locale`, falling back to the key itself on a miss.
pub fn translate<'a>(locale: Locale, key: &'a str) -> &'a str {
    match lookup(locale, key) {
        Some(value) => value,
        None => key,
    }
}

/// True when `key` exists in the catalog.
pub fn contains(key: &str) -> bool {
    CATALOG.iter().any(|entry| entry.key == key)
}

fn lookup(locale: Locale, key: &str) -> Option<&'static str> {
    let entry = CATALOG.iter().find(|entry| entry.key == key)?;
    Some(match locale {
        Locale::En => entry.en,
        Locale::Fr => entry.fr,
    })
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        key: "nav.language",
        en: "Language",
        fr: "Langue",
    },
    CatalogEntry {
        key: "nav.instagram",
        en: "Instagram",
        fr: "Instagram",
    },
    CatalogEntry {
        key: "nav.linktree",
        en: "Linktree",
        fr: "Linktree",
    },
    CatalogEntry {
        key: "nav.email",
        en: "Email",
        fr: "Email",
    },
    CatalogEntry {
        key: "hero.book_whatsapp",
        en: "Book on WhatsApp",
        fr: "Réserver sur WhatsApp",
    },
    CatalogEntry {
        key: "hero.email_us",
        en: "Email Us",
        fr: "Nous écrire",
    },
    CatalogEntry {
        key: "hero.explore_services",
        en: "Explore Services",
        fr: "Découvrir nos services",
    },
    CatalogEntry {
        key: "whatsapp.message",
        en: "Hello Podoflex, I'd like to book an appointment.",
        fr: "Bonjour Podoflex, je souhaite prendre rendez-vous.",
    },
    CatalogEntry {
        key: "about.title",
        en: "About Podoflex",
        fr: "À propos de Podoflex",
    },
    CatalogEntry {
        key: "services.title",
        en: "Our Services",
        fr: "Nos Services",
    },
    CatalogEntry {
        key: "services.book",
        en: "Book Now",
        fr: "Réserver",
    },
    CatalogEntry {
        key: "cta.text",
        en: "Appointments by request. Quickest reply on WhatsApp.",
        fr: "Rendez-vous sur demande. Réponse la plus rapide sur WhatsApp.",
    },
    CatalogEntry {
        key: "cta.whatsapp",
        en: "WhatsApp",
        fr: "WhatsApp",
    },
    CatalogEntry {
        key: "cta.email",
        en: "Email",
        fr: "Email",
    },
    CatalogEntry {
        key: "contact.title",
        en: "Get in Touch",
        fr: "Contactez-nous",
    },
    CatalogEntry {
        key: "contact.quick_links",
        en: "Quick Links",
        fr: "Liens rapides",
    },
    CatalogEntry {
        key: "contact.hours",
        en: "Working Hours",
        fr: "Horaires d'ouverture",
    },
    CatalogEntry {
        key: "footer.slogan",
        en: "Step into healing, stay in comfort.",
        fr: "Entrez dans la guérison, restez dans le confort.",
    },
    CatalogEntry {
        key: "footer.legal",
        en: "© 2024 Podoflex by Heidi. All rights reserved.",
        fr: "© 2024 Podoflex by Heidi. Tous droits réservés.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::locale::SUPPORTED_LOCALES;

    #[test]
    fn known_keys_translate_per_locale() {
        assert_eq!(translate(Locale::En, "contact.title"), "Get in Touch");
        assert_eq!(translate(Locale::Fr, "contact.title"), "Contactez-nous");
    }

    #[test]
    fn unknown_keys_fall_back_to_the_key_itself() {
        assert_eq!(translate(Locale::En, "contact.fax"), "contact.fax");
        assert_eq!(translate(Locale::Fr, ""), "");
        assert!(!contains("contact.fax"));
    }

    #[test]
    fn every_entry_is_filled_for_every_locale() {
        for entry in CATALOG {
            for locale in SUPPORTED_LOCALES {
                let value = translate(locale, entry.key);
                assert!(!value.is_empty(), "{} missing {}", entry.key, locale);
                assert_ne!(value, entry.key, "{} fell back for {}", entry.key, locale);
            }
        }
    }
}
