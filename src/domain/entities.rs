//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::settings::SiteSettings;

/// The persisted settings snapshot: the whole aggregate plus the moment it
/// was last written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsSnapshotRecord {
    pub settings: SiteSettings,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditLogRecord {
    pub id: Uuid,
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub payload_text: Option<String>,
    pub created_at: OffsetDateTime,
}
