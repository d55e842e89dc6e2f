//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{AuditLogRecord, SettingsSnapshotRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Durable home of the settings aggregate.
///
/// The store owns both sides of the snapshot format; adapters move opaque
/// aggregates in and out. `load_snapshot` returns `None` both when nothing
/// was ever saved and when the stored blob does not parse — first run and
/// corruption are deliberately indistinguishable to callers.
#[async_trait]
pub trait SettingsRepo: Send + Sync {
    async fn load_snapshot(&self) -> Result<Option<SettingsSnapshotRecord>, RepoError>;
    async fn save_snapshot(&self, snapshot: &SettingsSnapshotRecord) -> Result<(), RepoError>;
    async fn clear_snapshot(&self) -> Result<(), RepoError>;
}

#[async_trait]
pub trait AuditRepo: Send + Sync {
    async fn append_log(&self, record: AuditLogRecord) -> Result<(), RepoError>;
    async fn list_recent(&self, limit: u32) -> Result<Vec<AuditLogRecord>, RepoError>;
}
