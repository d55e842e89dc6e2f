use std::sync::Arc;

use crate::application::admin::{
    audit::AdminAuditService, chrome::AdminChromeService, settings::AdminSettingsService,
};
use crate::application::store::SettingsStore;
use crate::infra::{db::SqliteRepositories, uploads::UploadStorage};

#[derive(Clone)]
pub struct AdminState {
    pub db: Arc<SqliteRepositories>,
    pub store: Arc<SettingsStore>,
    pub settings: AdminSettingsService,
    pub audit: AdminAuditService,
    pub chrome: AdminChromeService,
    pub upload_storage: Arc<UploadStorage>,
}
