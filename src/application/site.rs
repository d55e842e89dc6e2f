//! TOML archives of the settings aggregate, used by the admin export action
//! and the `settings export` / `settings import` subcommands.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::settings::SiteSettings;

/// Bumped when the archive layout changes shape incompatibly.
pub const ARCHIVE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct SiteArchive {
    pub schema_version: u32,
    pub settings: SiteSettings,
}

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive does not parse: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("archive could not be encoded: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("unsupported archive schema version {0}")]
    SchemaVersion(u32),
    #[error("archive violates settings invariants: {0}")]
    Invalid(&'static str),
}

pub fn export_archive(settings: &SiteSettings) -> Result<String, ArchiveError> {
    let archive = SiteArchive {
        schema_version: ARCHIVE_SCHEMA_VERSION,
        settings: settings.clone(),
    };
    Ok(toml::to_string_pretty(&archive)?)
}

/// Parse an archive and re-check the invariants an external editor could
/// have broken.
pub fn parse_archive(text: &str) -> Result<SiteSettings, ArchiveError> {
    let archive: SiteArchive = toml::from_str(text)?;
    if archive.schema_version != ARCHIVE_SCHEMA_VERSION {
        return Err(ArchiveError::SchemaVersion(archive.schema_version));
    }
    if archive.settings.duplicate_service_id().is_some() {
        return Err(ArchiveError::Invalid("duplicate service id"));
    }
    Ok(archive.settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::seed::seed_settings;

    #[test]
    fn seed_round_trips_through_the_archive_format() {
        let seed = seed_settings();
        let text = export_archive(&seed).expect("export");
        assert!(text.contains("schema_version = 1"));
        let parsed = parse_archive(&text).expect("import");
        assert_eq!(parsed, seed);
    }

    #[test]
    fn hours_stay_absent_across_a_round_trip() {
        let mut settings = seed_settings();
        settings.working_hours = None;
        let text = export_archive(&settings).expect("export");
        assert!(!text.contains("workingHours"));
        let parsed = parse_archive(&text).expect("import");
        assert!(parsed.working_hours.is_none());
    }

    #[test]
    fn foreign_schema_versions_are_refused() {
        let seed = seed_settings();
        let text = export_archive(&seed)
            .expect("export")
            .replace("schema_version = 1", "schema_version = 2");
        assert!(matches!(
            parse_archive(&text),
            Err(ArchiveError::SchemaVersion(2))
        ));
    }

    #[test]
    fn duplicate_service_ids_are_refused() {
        let mut settings = seed_settings();
        let clone = settings.services[0].clone();
        settings.services.push(clone);
        let text = export_archive(&settings).expect("export");
        assert!(matches!(parse_archive(&text), Err(ArchiveError::Invalid(_))));
    }

    #[test]
    fn garbage_input_is_a_parse_error() {
        assert!(matches!(
            parse_archive("not = [toml"),
            Err(ArchiveError::Parse(_))
        ));
    }
}
