//! Icon vocabulary for service cards.

/// Symbols the service templates know how to draw.
///
/// Settings keep the icon as a free string; rendering resolves it here, and
/// any name outside the vocabulary falls back to [`ServiceIcon::Circle`]
/// instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceIcon {
    Stethoscope,
    Sparkles,
    Package,
    GraduationCap,
    Circle,
}

/// Vocabulary in the order the admin picker lists it.
pub const SERVICE_ICONS: [ServiceIcon; 5] = [
    ServiceIcon::Stethoscope,
    ServiceIcon::Sparkles,
    ServiceIcon::Package,
    ServiceIcon::GraduationCap,
    ServiceIcon::Circle,
];

impl ServiceIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceIcon::Stethoscope => "stethoscope",
            ServiceIcon::Sparkles => "sparkles",
            ServiceIcon::Package => "package",
            ServiceIcon::GraduationCap => "graduation-cap",
            ServiceIcon::Circle => "circle",
        }
    }

    /// Resolve a stored icon name, defaulting unknown names to the circle.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "stethoscope" => ServiceIcon::Stethoscope,
            "sparkles" => ServiceIcon::Sparkles,
            "package" => ServiceIcon::Package,
            "graduation-cap" => ServiceIcon::GraduationCap,
            "circle" => ServiceIcon::Circle,
            _ => ServiceIcon::Circle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_round_trip() {
        for icon in SERVICE_ICONS {
            assert_eq!(ServiceIcon::parse_or_default(icon.as_str()), icon);
        }
    }

    #[test]
    fn unknown_names_fall_back_to_circle() {
        assert_eq!(ServiceIcon::parse_or_default("rocket"), ServiceIcon::Circle);
        assert_eq!(ServiceIcon::parse_or_default(""), ServiceIcon::Circle);
    }
}
