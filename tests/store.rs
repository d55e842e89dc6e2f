use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;

use orma::application::repos::{RepoError, SettingsRepo};
use orma::application::store::{SettingsStore, StoreError};
use orma::domain::entities::SettingsSnapshotRecord;
use orma::domain::seed::seed_settings;
use orma::domain::settings::{Service, SiteSettings};
use orma::infra::db::SqliteRepositories;

async fn sqlite_repositories() -> Arc<SqliteRepositories> {
    // A single connection keeps the in-memory database alive and shared.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should connect");
    let db = SqliteRepositories::from_pool(pool);
    db.run_migrations().await.expect("migrations should run");
    Arc::new(db)
}

fn edited_settings() -> SiteSettings {
    let mut settings = seed_settings();
    settings.brand.name = "Atelier Pieds Légers".to_string();
    settings
}

/// Repo that accepts reads but refuses every write.
struct ReadOnlyRepo {
    loaded: AtomicBool,
}

impl ReadOnlyRepo {
    fn new() -> Self {
        Self {
            loaded: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl SettingsRepo for ReadOnlyRepo {
    async fn load_snapshot(&self) -> Result<Option<SettingsSnapshotRecord>, RepoError> {
        self.loaded.store(true, Ordering::SeqCst);
        Ok(None)
    }

    async fn save_snapshot(&self, _snapshot: &SettingsSnapshotRecord) -> Result<(), RepoError> {
        Err(RepoError::Persistence("disk full".to_string()))
    }

    async fn clear_snapshot(&self) -> Result<(), RepoError> {
        Err(RepoError::Persistence("disk full".to_string()))
    }
}

#[tokio::test]
async fn boots_on_seed_when_nothing_is_persisted() {
    let db = sqlite_repositories().await;
    let repo: Arc<dyn SettingsRepo> = db;
    let store = SettingsStore::initialize(repo).await;

    assert_eq!(store.current(), seed_settings());
    assert!(store.last_saved_at().is_none());
}

#[tokio::test]
async fn update_persists_and_survives_a_restart() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should connect");
    let db = Arc::new(SqliteRepositories::from_pool(pool.clone()));
    db.run_migrations().await.expect("migrations should run");

    {
        let repo: Arc<dyn SettingsRepo> = db.clone();
        let store = SettingsStore::initialize(repo).await;
        store
            .update(edited_settings())
            .await
            .expect("update should persist");
        assert!(store.last_saved_at().is_some());
    }

    // The aggregate actually hit the database, not just the store's memory.
    let (document,): (String,) = sqlx::query_as("SELECT document FROM site_settings WHERE id = 1")
        .fetch_one(&pool)
        .await
        .expect("snapshot row should exist");
    let written: SiteSettings =
        serde_json::from_str(&document).expect("snapshot should be valid json");
    assert_eq!(written, edited_settings());

    let repo: Arc<dyn SettingsRepo> = db;
    let reopened = SettingsStore::initialize(repo).await;
    assert_eq!(reopened.current(), edited_settings());
    assert!(reopened.last_saved_at().is_some());
}

#[tokio::test]
async fn repeating_an_update_lands_on_the_same_state() {
    let db = sqlite_repositories().await;
    let repo: Arc<dyn SettingsRepo> = db;
    let store = SettingsStore::initialize(repo).await;

    store
        .update(edited_settings())
        .await
        .expect("first update should persist");
    let after_first = store.current();

    store
        .update(edited_settings())
        .await
        .expect("identical update should persist again");
    assert_eq!(store.current(), after_first);
    assert!(store.last_saved_at().is_some());
}

#[tokio::test]
async fn update_replaces_the_whole_aggregate() {
    let db = sqlite_repositories().await;
    let repo: Arc<dyn SettingsRepo> = db;
    let store = SettingsStore::initialize(repo).await;

    let mut replacement = seed_settings();
    replacement.working_hours = None;
    replacement.services = vec![Service::placeholder()];

    store
        .update(replacement)
        .await
        .expect("update should persist");

    let current = store.current();
    assert!(current.working_hours.is_none(), "omitted section is gone");
    assert_eq!(current.services.len(), 1);
}

#[tokio::test]
async fn failed_save_keeps_the_new_value_in_memory() {
    let repo = Arc::new(ReadOnlyRepo::new());
    let store = SettingsStore::initialize(repo.clone()).await;
    assert!(repo.loaded.load(Ordering::SeqCst));

    let result = store.update(edited_settings()).await;
    assert!(matches!(result, Err(StoreError::SaveFailed(_))));

    // Readers observe the applied value even though nothing was written.
    assert_eq!(store.current().brand.name, "Atelier Pieds Légers");
    assert!(store.last_saved_at().is_none());
}

#[tokio::test]
async fn reset_restores_seed_and_clears_the_snapshot() {
    let db = sqlite_repositories().await;

    {
        let repo: Arc<dyn SettingsRepo> = db.clone();
        let store = SettingsStore::initialize(repo).await;
        store
            .update(edited_settings())
            .await
            .expect("update should persist");

        let restored = store.reset().await.expect("reset should clear");
        assert_eq!(restored, seed_settings());
        assert_eq!(store.current(), seed_settings());
        assert!(store.last_saved_at().is_none());
    }

    // A restart after reset lands back on the seed.
    let repo: Arc<dyn SettingsRepo> = db;
    let reopened = SettingsStore::initialize(repo).await;
    assert_eq!(reopened.current(), seed_settings());
    assert!(reopened.last_saved_at().is_none());
}

#[tokio::test]
async fn corrupt_snapshot_falls_back_to_seed() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should connect");
    let db = Arc::new(SqliteRepositories::from_pool(pool.clone()));
    db.run_migrations().await.expect("migrations should run");

    {
        let repo: Arc<dyn SettingsRepo> = db.clone();
        let store = SettingsStore::initialize(repo).await;
        store
            .update(edited_settings())
            .await
            .expect("update should persist");
    }

    sqlx::query("UPDATE site_settings SET document = 'not json' WHERE id = 1")
        .execute(&pool)
        .await
        .expect("snapshot should be overwritten");

    let repo: Arc<dyn SettingsRepo> = db;
    let store = SettingsStore::initialize(repo).await;
    assert_eq!(store.current(), seed_settings());
    assert!(store.last_saved_at().is_none());
}
