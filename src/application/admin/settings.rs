//! Section-by-section editing of the settings aggregate.
//!
//! Each command replaces exactly one section of the current aggregate and
//! submits the whole thing to the store (Update is a full replacement). The
//! commands are the only mutation paths the admin surface has; there is no
//! generic field-path setter.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use time::OffsetDateTime;
use url::Url;

use crate::application::admin::audit::AdminAuditService;
use crate::application::repos::RepoError;
use crate::application::store::{SettingsStore, StoreError};
use crate::domain::settings::{
    LocalizedText, Service, SiteSettings, WeekSchedule, WorkingHours,
};

#[derive(Debug, Error)]
pub enum AdminSettingsError {
    #[error("{0}")]
    ConstraintViolation(&'static str),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct UpdateBrandCommand {
    pub name: String,
    pub tagline: LocalizedText,
    pub description: LocalizedText,
    pub logo: String,
    pub favicon: String,
}

#[derive(Debug, Clone)]
pub struct UpdateContactCommand {
    pub email: String,
    pub whatsapp: String,
    pub instagram: String,
    pub linktree: String,
    pub tiktok: String,
}

#[derive(Debug, Clone)]
pub struct UpdateThemeCommand {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub font: String,
}

#[derive(Debug, Clone)]
pub struct EditServiceCommand {
    pub index: usize,
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub icon: String,
}

#[derive(Debug, Clone)]
pub struct UpdateHoursCommand {
    pub published: bool,
    pub en: WeekSchedule,
    pub fr: WeekSchedule,
}

#[derive(Clone)]
pub struct AdminSettingsService {
    store: Arc<SettingsStore>,
    audit: AdminAuditService,
}

impl AdminSettingsService {
    pub fn new(store: Arc<SettingsStore>, audit: AdminAuditService) -> Self {
        Self { store, audit }
    }

    pub fn current(&self) -> SiteSettings {
        self.store.current()
    }

    pub fn last_saved_at(&self) -> Option<OffsetDateTime> {
        self.store.last_saved_at()
    }

    pub async fn update_brand(
        &self,
        actor: &str,
        command: UpdateBrandCommand,
    ) -> Result<SiteSettings, AdminSettingsError> {
        ensure_non_empty(&command.name, "name")?;
        ensure_non_empty(&command.tagline.en, "tagline.en")?;
        ensure_non_empty(&command.tagline.fr, "tagline.fr")?;
        ensure_non_empty(&command.logo, "logo")?;
        ensure_non_empty(&command.favicon, "favicon")?;

        let mut settings = self.store.current();
        settings.brand.name = command.name;
        settings.brand.tagline = command.tagline;
        settings.brand.description = command.description;
        settings.brand.logo = command.logo;
        settings.brand.favicon = command.favicon;

        self.apply(actor, "settings.brand.update", settings, |applied| {
            BrandPayload::from(applied)
        })
        .await
    }

    pub async fn update_contact(
        &self,
        actor: &str,
        command: UpdateContactCommand,
    ) -> Result<SiteSettings, AdminSettingsError> {
        ensure_email(&command.email, "email")?;
        ensure_phone(&command.whatsapp, "whatsapp")?;
        ensure_url_when_present(&command.instagram, "instagram")?;
        ensure_url_when_present(&command.linktree, "linktree")?;
        ensure_url_when_present(&command.tiktok, "tiktok")?;

        let mut settings = self.store.current();
        settings.contact.email = command.email;
        settings.contact.whatsapp = command.whatsapp;
        settings.contact.instagram = command.instagram;
        settings.contact.linktree = command.linktree;
        settings.contact.tiktok = command.tiktok;

        self.apply(actor, "settings.contact.update", settings, |applied| {
            ContactPayload::from(applied)
        })
        .await
    }

    pub async fn update_theme(
        &self,
        actor: &str,
        command: UpdateThemeCommand,
    ) -> Result<SiteSettings, AdminSettingsError> {
        ensure_non_empty(&command.primary, "colors.primary")?;
        ensure_non_empty(&command.secondary, "colors.secondary")?;
        ensure_non_empty(&command.background, "colors.background")?;
        ensure_non_empty(&command.text, "colors.text")?;
        ensure_non_empty(&command.font, "fonts.primary")?;

        let mut settings = self.store.current();
        settings.theme.colors.primary = command.primary;
        settings.theme.colors.secondary = command.secondary;
        settings.theme.colors.background = command.background;
        settings.theme.colors.text = command.text;
        settings.theme.fonts.primary = command.font;

        self.apply(actor, "settings.theme.update", settings, |applied| {
            ThemePayload::from(applied)
        })
        .await
    }

    pub async fn edit_service(
        &self,
        actor: &str,
        command: EditServiceCommand,
    ) -> Result<SiteSettings, AdminSettingsError> {
        ensure_non_empty(&command.title.en, "title.en")?;
        ensure_non_empty(&command.title.fr, "title.fr")?;
        ensure_non_empty(&command.description.en, "description.en")?;
        ensure_non_empty(&command.description.fr, "description.fr")?;

        let mut settings = self.store.current();
        let service = settings
            .services
            .get_mut(command.index)
            .ok_or(AdminSettingsError::ConstraintViolation(
                "service index out of range",
            ))?;
        service.title = command.title;
        service.description = command.description;
        service.icon = command.icon;
        let entity_id = service.id.clone();

        self.apply_with_entity(
            actor,
            "settings.service.update",
            Some(entity_id),
            settings,
            |applied| ServicesPayload::from(applied),
        )
        .await
    }

    /// Append the placeholder service with a fresh unique id.
    pub async fn add_service(&self, actor: &str) -> Result<SiteSettings, AdminSettingsError> {
        let mut settings = self.store.current();
        let mut service = Service::placeholder();
        // Uuids do not collide in practice; the retry guards imported ids.
        while settings.services.iter().any(|taken| taken.id == service.id) {
            service.id = Service::fresh_id();
        }
        let entity_id = service.id.clone();
        settings.services.push(service);

        self.apply_with_entity(
            actor,
            "settings.service.add",
            Some(entity_id),
            settings,
            |applied| ServicesPayload::from(applied),
        )
        .await
    }

    /// Remove the service at `index`, keeping the rest in order.
    pub async fn delete_service(
        &self,
        actor: &str,
        index: usize,
    ) -> Result<SiteSettings, AdminSettingsError> {
        let mut settings = self.store.current();
        if index >= settings.services.len() {
            return Err(AdminSettingsError::ConstraintViolation(
                "service index out of range",
            ));
        }
        let removed = settings.services.remove(index);

        self.apply_with_entity(
            actor,
            "settings.service.delete",
            Some(removed.id),
            settings,
            |applied| ServicesPayload::from(applied),
        )
        .await
    }

    pub async fn update_hours(
        &self,
        actor: &str,
        command: UpdateHoursCommand,
    ) -> Result<SiteSettings, AdminSettingsError> {
        let mut settings = self.store.current();
        settings.working_hours = command.published.then(|| WorkingHours {
            en: command.en,
            fr: command.fr,
        });

        self.apply(actor, "settings.hours.update", settings, |applied| {
            HoursPayload::from(applied)
        })
        .await
    }

    /// Swap in a complete replacement aggregate (import path). The caller has
    /// already parsed it; only the id invariant is re-checked here.
    pub async fn replace(
        &self,
        actor: &str,
        settings: SiteSettings,
    ) -> Result<SiteSettings, AdminSettingsError> {
        if settings.duplicate_service_id().is_some() {
            return Err(AdminSettingsError::ConstraintViolation(
                "duplicate service id",
            ));
        }

        self.store.update(settings.clone()).await?;
        self.audit
            .record(
                actor,
                "settings.import",
                "settings",
                None,
                Some(&ServicesPayload::from(&settings)),
            )
            .await?;
        Ok(settings)
    }

    /// Back to the seed, clearing the persisted snapshot.
    pub async fn reset(&self, actor: &str) -> Result<SiteSettings, AdminSettingsError> {
        let seed = self.store.reset().await?;
        self.audit
            .record(actor, "settings.reset", "settings", None, None::<&()>)
            .await?;
        Ok(seed)
    }

    async fn apply<P, F>(
        &self,
        actor: &str,
        action: &str,
        settings: SiteSettings,
        payload: F,
    ) -> Result<SiteSettings, AdminSettingsError>
    where
        P: Serialize,
        F: FnOnce(&SiteSettings) -> P,
    {
        self.apply_with_entity(actor, action, None, settings, payload)
            .await
    }

    async fn apply_with_entity<P, F>(
        &self,
        actor: &str,
        action: &str,
        entity_id: Option<String>,
        settings: SiteSettings,
        payload: F,
    ) -> Result<SiteSettings, AdminSettingsError>
    where
        P: Serialize,
        F: FnOnce(&SiteSettings) -> P,
    {
        self.store.update(settings.clone()).await?;
        let payload = payload(&settings);
        self.audit
            .record(
                actor,
                action,
                "settings",
                entity_id.as_deref(),
                Some(&payload),
            )
            .await?;
        Ok(settings)
    }
}

#[derive(Debug, Serialize)]
struct BrandPayload {
    name: String,
    tagline_en: String,
    tagline_fr: String,
    logo: String,
    favicon: String,
}

impl From<&SiteSettings> for BrandPayload {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            name: settings.brand.name.clone(),
            tagline_en: settings.brand.tagline.en.clone(),
            tagline_fr: settings.brand.tagline.fr.clone(),
            logo: settings.brand.logo.clone(),
            favicon: settings.brand.favicon.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ContactPayload {
    email: String,
    whatsapp: String,
    instagram: String,
    linktree: String,
    tiktok: String,
}

impl From<&SiteSettings> for ContactPayload {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            email: settings.contact.email.clone(),
            whatsapp: settings.contact.whatsapp.clone(),
            instagram: settings.contact.instagram.clone(),
            linktree: settings.contact.linktree.clone(),
            tiktok: settings.contact.tiktok.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ThemePayload {
    primary: String,
    secondary: String,
    background: String,
    text: String,
    font: String,
}

impl From<&SiteSettings> for ThemePayload {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            primary: settings.theme.colors.primary.clone(),
            secondary: settings.theme.colors.secondary.clone(),
            background: settings.theme.colors.background.clone(),
            text: settings.theme.colors.text.clone(),
            font: settings.theme.fonts.primary.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ServicesPayload {
    service_ids: Vec<String>,
    count: usize,
}

impl From<&SiteSettings> for ServicesPayload {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            service_ids: settings
                .services
                .iter()
                .map(|service| service.id.clone())
                .collect(),
            count: settings.services.len(),
        }
    }
}

#[derive(Debug, Serialize)]
struct HoursPayload {
    published: bool,
}

impl From<&SiteSettings> for HoursPayload {
    fn from(settings: &SiteSettings) -> Self {
        Self {
            published: settings.working_hours.is_some(),
        }
    }
}

fn ensure_non_empty(value: &str, field: &'static str) -> Result<(), AdminSettingsError> {
    if value.trim().is_empty() {
        return Err(AdminSettingsError::ConstraintViolation(field));
    }
    Ok(())
}

fn ensure_email(value: &str, field: &'static str) -> Result<(), AdminSettingsError> {
    ensure_non_empty(value, field)?;
    if !value.contains('@') {
        return Err(AdminSettingsError::ConstraintViolation(field));
    }
    Ok(())
}

fn ensure_phone(value: &str, field: &'static str) -> Result<(), AdminSettingsError> {
    ensure_non_empty(value, field)?;
    if !value.chars().any(|ch| ch.is_ascii_digit()) {
        return Err(AdminSettingsError::ConstraintViolation(field));
    }
    Ok(())
}

fn ensure_url_when_present(value: &str, field: &'static str) -> Result<(), AdminSettingsError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    Url::parse(value).map_err(|_| AdminSettingsError::ConstraintViolation(field))?;
    Ok(())
}
