//! Baked-in settings a fresh install boots with.

use crate::domain::settings::{
    BrandSettings, ContactDetails, LocalizedText, Service, SiteSettings, ThemeColors, ThemeFonts,
    ThemeSettings, WeekSchedule, WorkingHours,
};

const HOURS_EN: &str = "Appointment only";
const HOURS_FR: &str = "Sur rendez-vous uniquement";

/// The default aggregate: the Podoflex studio content. Used when no snapshot
/// is persisted and restored verbatim by Reset.
pub fn seed_settings() -> SiteSettings {
    SiteSettings {
        brand: BrandSettings {
            name: "Podoflex by Heidi".to_string(),
            tagline: LocalizedText::new(
                "Step into healing, stay in comfort.",
                "Entrez dans la guérison, restez dans le confort.",
            ),
            description: LocalizedText::new(
                "Podoflex by Heidi is dedicated to your foot health and overall holistic \
                 well-being. Our services encompass advanced medical pedicures, soothing \
                 reflexotherapy treatments, and a curated selection of foot care products. \
                 We also provide expert professional consultancy and valuable foot health \
                 training and education.",
                "Podoflex by Heidi est dédié à la santé de vos pieds et à votre bien-être \
                 holistique. Nos services incluent des pédicures médicales avancées, des \
                 séances apaisantes de réflexothérapie et une sélection soignée de produits \
                 de soins des pieds. Nous proposons également des conseils professionnels et \
                 des formations utiles en santé du pied.",
            ),
            logo: "/static/common/brand/logo.svg".to_string(),
            favicon: "/static/common/brand/favicon.svg".to_string(),
        },
        contact: ContactDetails {
            email: "hello@podoflexbyheidi.com".to_string(),
            whatsapp: "+1234567890".to_string(),
            instagram: "https://www.instagram.com/podoflexbyheidi".to_string(),
            linktree: "https://linktr.ee/podoflexbyheidi".to_string(),
            tiktok: "https://www.tiktok.com/@podoflexbyheidi".to_string(),
        },
        theme: ThemeSettings {
            colors: ThemeColors {
                primary: "#0f766e".to_string(),
                secondary: "#6b7f3b".to_string(),
                background: "#fdfcf8".to_string(),
                text: "#1f2933".to_string(),
            },
            fonts: ThemeFonts {
                primary: "Inter".to_string(),
            },
        },
        services: seed_services(),
        working_hours: Some(seed_working_hours()),
    }
}

fn seed_services() -> Vec<Service> {
    vec![
        Service {
            id: "medical-pedicures".to_string(),
            title: LocalizedText::new(
                "Advanced Medical Pedicures",
                "Pédicures médicales avancées",
            ),
            description: LocalizedText::new(
                "Professional medical-grade pedicure treatments for optimal foot health and care.",
                "Traitements de pédicure de niveau médical pour une santé et des soins optimaux \
                 des pieds.",
            ),
            icon: "stethoscope".to_string(),
        },
        Service {
            id: "reflexotherapy".to_string(),
            title: LocalizedText::new("Reflexotherapy Treatments", "Réflexothérapie"),
            description: LocalizedText::new(
                "Soothing therapeutic sessions that promote relaxation and holistic wellness.",
                "Séances thérapeutiques apaisantes qui favorisent la relaxation et le bien-être \
                 holistique.",
            ),
            icon: "sparkles".to_string(),
        },
        Service {
            id: "foot-care-products".to_string(),
            title: LocalizedText::new("Foot Care Products", "Produits de soins des pieds"),
            description: LocalizedText::new(
                "Curated selection of premium products for maintaining healthy, comfortable feet.",
                "Sélection soignée de produits premium pour maintenir des pieds sains et \
                 confortables.",
            ),
            icon: "package".to_string(),
        },
        Service {
            id: "consultancy-training".to_string(),
            title: LocalizedText::new("Consultancy & Training", "Conseil & Formation"),
            description: LocalizedText::new(
                "Expert professional advice and educational training in foot health and wellness.",
                "Conseils professionnels experts et formation éducative en santé et bien-être \
                 des pieds.",
            ),
            icon: "graduation-cap".to_string(),
        },
    ]
}

fn seed_working_hours() -> WorkingHours {
    let filled = |value: &str| WeekSchedule {
        monday: value.to_string(),
        tuesday: value.to_string(),
        wednesday: value.to_string(),
        thursday: value.to_string(),
        friday: value.to_string(),
        saturday: value.to_string(),
        sunday: value.to_string(),
    };
    WorkingHours {
        en: filled(HOURS_EN),
        fr: filled(HOURS_FR),
    }
}
