use std::future::IntoFuture;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use orma::application::admin::audit::AdminAuditService;
use orma::application::admin::chrome::AdminChromeService;
use orma::application::admin::settings::AdminSettingsService;
use orma::application::repos::{AuditRepo, SettingsRepo};
use orma::application::site::{self, ArchiveError};
use orma::application::store::{SettingsStore, StoreError};
use orma::config::{
    self, Command, ConfigAction, LoadError, Settings, SettingsAction,
};
use orma::infra::db::SqliteRepositories;
use orma::infra::error::InfraError;
use orma::infra::http::{AdminState, PublicState, build_admin_router, build_public_router};
use orma::infra::telemetry;
use orma::infra::uploads::UploadStorage;

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("orma: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), RunError> {
    let (cli, settings) = config::load_with_cli()?;
    telemetry::init(&settings.logging)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(settings).await,
        Command::Config(command) => match command.action {
            ConfigAction::Check => {
                print_config_summary(&settings);
                Ok(())
            }
        },
        Command::Settings(command) => settings_command(settings, command.action).await,
    }
}

async fn init_repositories(settings: &Settings) -> Result<Arc<SqliteRepositories>, RunError> {
    let db = SqliteRepositories::connect(&settings.database).await?;
    db.run_migrations().await?;
    Ok(Arc::new(db))
}

async fn serve(settings: Settings) -> Result<(), RunError> {
    let db = init_repositories(&settings).await?;

    let settings_repo: Arc<dyn SettingsRepo> = db.clone();
    let store = Arc::new(SettingsStore::initialize(settings_repo).await);

    let audit_repo: Arc<dyn AuditRepo> = db.clone();
    let audit = AdminAuditService::new(audit_repo);
    let admin_settings = AdminSettingsService::new(store.clone(), audit.clone());
    let chrome = AdminChromeService::new(store.clone(), &settings.site.base_url);

    let upload_storage = Arc::new(UploadStorage::new(
        settings.uploads.directory.clone(),
        settings.uploads.max_upload_bytes,
    )?);

    let public_state = PublicState {
        store: store.clone(),
        db: db.clone(),
        upload_storage: upload_storage.clone(),
        default_locale: settings.site.default_locale,
        timezone: settings.site.timezone,
    };
    let admin_state = AdminState {
        db,
        store,
        settings: admin_settings,
        audit,
        chrome,
        upload_storage,
    };

    let public_router = build_public_router(public_state);
    let admin_router = build_admin_router(
        admin_state,
        settings.uploads.max_upload_bytes as usize,
    );

    let public_listener = TcpListener::bind(settings.server.public_addr).await?;
    let admin_listener = TcpListener::bind(settings.server.admin_addr).await?;
    info!(
        public = %settings.server.public_addr,
        admin = %settings.server.admin_addr,
        "Listening"
    );

    let grace = settings.server.graceful_shutdown;
    let public = axum::serve(public_listener, public_router)
        .with_graceful_shutdown(shutdown_signal(grace));
    let admin = axum::serve(admin_listener, admin_router)
        .with_graceful_shutdown(shutdown_signal(grace));

    tokio::try_join!(public.into_future(), admin.into_future())?;
    info!("Both listeners stopped");
    Ok(())
}

async fn shutdown_signal(grace: Duration) {
    if tokio::signal::ctrl_c().await.is_err() {
        return;
    }
    info!(
        grace_seconds = grace.as_secs(),
        "Shutdown signal received, draining connections"
    );
}

async fn settings_command(settings: Settings, action: SettingsAction) -> Result<(), RunError> {
    let db = init_repositories(&settings).await?;
    let repo: Arc<dyn SettingsRepo> = db;
    let store = SettingsStore::initialize(repo).await;

    match action {
        SettingsAction::Export { output } => {
            let text = site::export_archive(&store.current())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    info!(path = %path.display(), "Settings archive written");
                }
                None => print!("{text}"),
            }
        }
        SettingsAction::Import { input } => {
            let text = std::fs::read_to_string(&input)?;
            let parsed = site::parse_archive(&text)?;
            store.update(parsed).await?;
            info!(path = %input.display(), "Settings archive imported");
        }
        SettingsAction::Reset => {
            store.reset().await?;
            info!("Settings reset to seed defaults");
        }
    }

    Ok(())
}

fn print_config_summary(settings: &Settings) {
    println!("configuration ok");
    println!("  public listener: {}", settings.server.public_addr);
    println!("  admin listener:  {}", settings.server.admin_addr);
    println!("  database:        {}", settings.database.url);
    println!("  default locale:  {}", settings.site.default_locale);
    println!("  timezone:        {}", settings.site.timezone);
    println!(
        "  uploads:         {} (max {} bytes)",
        settings.uploads.directory.display(),
        settings.uploads.max_upload_bytes
    );
}
