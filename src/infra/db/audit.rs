use async_trait::async_trait;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{AuditRepo, RepoError};
use crate::domain::entities::AuditLogRecord;

use super::SqliteRepositories;
use super::util::map_sqlx_error;

#[derive(FromRow)]
struct AuditLogRow {
    id: String,
    actor: String,
    action: String,
    entity_type: String,
    entity_id: Option<String>,
    payload_text: Option<String>,
    created_at: OffsetDateTime,
}

impl AuditLogRow {
    fn into_record(self) -> Result<AuditLogRecord, RepoError> {
        let id = Uuid::parse_str(&self.id).map_err(RepoError::from_persistence)?;
        Ok(AuditLogRecord {
            id,
            actor: self.actor,
            action: self.action,
            entity_type: self.entity_type,
            entity_id: self.entity_id,
            payload_text: self.payload_text,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl AuditRepo for SqliteRepositories {
    async fn append_log(&self, record: AuditLogRecord) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO audit_logs \
                 (id, actor, action, entity_type, entity_id, payload_text, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(record.actor)
        .bind(record.action)
        .bind(record.entity_type)
        .bind(record.entity_id)
        .bind(record.payload_text)
        .bind(record.created_at)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<AuditLogRecord>, RepoError> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            "SELECT id, actor, action, entity_type, entity_id, payload_text, created_at \
             FROM audit_logs \
             ORDER BY created_at DESC, id DESC \
             LIMIT ?",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(AuditLogRow::into_record).collect()
    }
}
