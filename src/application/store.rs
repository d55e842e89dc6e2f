//! The settings store: single source of truth for the site aggregate.
//!
//! Built once in `main` and handed (via `Arc`) to the public router and the
//! admin services; nothing reaches it through ambient globals. Reads are
//! synchronous and never touch storage; every successful update is persisted
//! before the call returns.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use metrics::counter;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::application::repos::{RepoError, SettingsRepo};
use crate::domain::entities::SettingsSnapshotRecord;
use crate::domain::seed::seed_settings;
use crate::domain::settings::SiteSettings;

/// Failure surfaced to editing surfaces. The in-memory aggregate is already
/// swapped when `SaveFailed` comes back: readers observe the new value while
/// the durable copy still holds the old one.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("settings were applied in memory but could not be persisted")]
    SaveFailed(#[source] RepoError),
}

struct StoreState {
    settings: SiteSettings,
    last_saved_at: Option<OffsetDateTime>,
}

/// Owns the canonical settings aggregate for the process lifetime.
pub struct SettingsStore {
    repo: Arc<dyn SettingsRepo>,
    state: RwLock<StoreState>,
}

impl SettingsStore {
    /// Load the persisted snapshot, falling back to the seed when nothing is
    /// stored or the snapshot cannot be read. Both are the normal first-run
    /// path and are never surfaced as errors.
    pub async fn initialize(repo: Arc<dyn SettingsRepo>) -> Self {
        let state = match repo.load_snapshot().await {
            Ok(Some(snapshot)) => {
                info!(updated_at = %snapshot.updated_at, "Loaded persisted site settings");
                StoreState {
                    settings: snapshot.settings,
                    last_saved_at: Some(snapshot.updated_at),
                }
            }
            Ok(None) => {
                info!("No persisted site settings; starting from seed");
                counter!("orma_settings_seed_boot_total").increment(1);
                StoreState {
                    settings: seed_settings(),
                    last_saved_at: None,
                }
            }
            Err(error) => {
                warn!(%error, "Failed to load persisted site settings; starting from seed");
                counter!("orma_settings_seed_boot_total").increment(1);
                StoreState {
                    settings: seed_settings(),
                    last_saved_at: None,
                }
            }
        };

        Self {
            repo,
            state: RwLock::new(state),
        }
    }

    /// The current aggregate. Always fully shaped.
    pub fn current(&self) -> SiteSettings {
        self.read_state().settings.clone()
    }

    /// When the active aggregate was last written durably. `None` while the
    /// process runs on unsaved seed defaults.
    pub fn last_saved_at(&self) -> Option<OffsetDateTime> {
        self.read_state().last_saved_at
    }

    /// Replace the whole aggregate and persist it.
    ///
    /// Full replacement, not a merge: sections the caller omits are gone.
    /// The in-memory swap happens before the durable write, so a failed
    /// persist leaves readers on the new value and reports
    /// [`StoreError::SaveFailed`].
    pub async fn update(&self, settings: SiteSettings) -> Result<OffsetDateTime, StoreError> {
        let updated_at = OffsetDateTime::now_utc();
        let snapshot = SettingsSnapshotRecord {
            settings: settings.clone(),
            updated_at,
        };

        self.write_state().settings = settings;

        match self.repo.save_snapshot(&snapshot).await {
            Ok(()) => {
                self.write_state().last_saved_at = Some(updated_at);
                counter!("orma_settings_save_total").increment(1);
                Ok(updated_at)
            }
            Err(error) => {
                counter!("orma_settings_save_failed_total").increment(1);
                warn!(%error, "Settings updated in memory but persisting the snapshot failed");
                Err(StoreError::SaveFailed(error))
            }
        }
    }

    /// Revert to the seed and clear the persisted snapshot, so both the
    /// running process and the next boot observe the seed.
    pub async fn reset(&self) -> Result<SiteSettings, StoreError> {
        let seed = seed_settings();

        {
            let mut state = self.write_state();
            state.settings = seed.clone();
            state.last_saved_at = None;
        }

        match self.repo.clear_snapshot().await {
            Ok(()) => {
                counter!("orma_settings_reset_total").increment(1);
                info!("Site settings reset to seed");
                Ok(seed)
            }
            Err(error) => {
                counter!("orma_settings_save_failed_total").increment(1);
                warn!(%error, "Settings reset in memory but clearing the snapshot failed");
                Err(StoreError::SaveFailed(error))
            }
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, StoreState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    lock_kind = "rwlock.read",
                    result = "poisoned_recovered",
                    "Recovered from poisoned settings lock"
                );
                poisoned.into_inner()
            }
        }
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, StoreState> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    lock_kind = "rwlock.write",
                    result = "poisoned_recovered",
                    "Recovered from poisoned settings lock"
                );
                poisoned.into_inner()
            }
        }
    }
}
