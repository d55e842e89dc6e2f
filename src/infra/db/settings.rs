//! Settings snapshot persistence: one row, the whole aggregate as JSON.

use async_trait::async_trait;
use sqlx::FromRow;
use time::OffsetDateTime;
use tracing::warn;

use crate::application::repos::{RepoError, SettingsRepo};
use crate::domain::entities::SettingsSnapshotRecord;
use crate::domain::settings::SiteSettings;

use super::SqliteRepositories;
use super::util::map_sqlx_error;

/// The snapshot table holds at most this one row.
const SNAPSHOT_ID: i64 = 1;

#[derive(FromRow)]
struct SnapshotRow {
    document: String,
    updated_at: OffsetDateTime,
}

#[async_trait]
impl SettingsRepo for SqliteRepositories {
    async fn load_snapshot(&self) -> Result<Option<SettingsSnapshotRecord>, RepoError> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            "SELECT document, updated_at FROM site_settings WHERE id = ?",
        )
        .bind(SNAPSHOT_ID)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        // A snapshot that does not parse is treated as absent; the caller
        // falls back to the seed rather than refusing to boot.
        match serde_json::from_str::<SiteSettings>(&row.document) {
            Ok(settings) => Ok(Some(SettingsSnapshotRecord {
                settings,
                updated_at: row.updated_at,
            })),
            Err(error) => {
                warn!(%error, "Stored settings snapshot does not parse; ignoring it");
                Ok(None)
            }
        }
    }

    async fn save_snapshot(&self, snapshot: &SettingsSnapshotRecord) -> Result<(), RepoError> {
        let document =
            serde_json::to_string(&snapshot.settings).map_err(RepoError::from_persistence)?;

        sqlx::query(
            "INSERT INTO site_settings (id, document, updated_at) \
             VALUES (?, ?, ?) \
             ON CONFLICT(id) DO UPDATE SET \
                 document = excluded.document, \
                 updated_at = excluded.updated_at",
        )
        .bind(SNAPSHOT_ID)
        .bind(document)
        .bind(snapshot.updated_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn clear_snapshot(&self) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM site_settings WHERE id = ?")
            .bind(SNAPSHOT_ID)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}
