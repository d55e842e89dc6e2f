//! Layered runtime configuration.
//!
//! Values are resolved file-first, then environment (`ORMA`-prefixed with
//! `__` as the section separator), then command-line flags. The raw layer is
//! all optional strings; validation happens once, in [`Settings::from_raw`],
//! so a bad value is reported with its section and field name instead of
//! surfacing later as a runtime panic.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::Level;
use url::Url;

use crate::domain::locale::Locale;

const ENV_PREFIX: &str = "ORMA";
const ENV_SEPARATOR: &str = "__";
const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "config/local";

#[derive(Debug, Parser)]
#[command(name = "orma", version, about = "Bilingual studio site and admin panel")]
pub struct CliArgs {
    /// Extra configuration file loaded on top of config/default and config/local.
    #[arg(long, env = "ORMA_CONFIG_FILE", value_name = "PATH", global = true)]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the public and admin HTTP listeners (the default).
    Serve,
    /// Configuration utilities.
    Config(ConfigCommand),
    /// Operate on the persisted settings snapshot without serving.
    Settings(SettingsCommand),
}

#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Validate the resolved configuration and print a summary.
    Check,
}

#[derive(Debug, Args)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Write the current settings aggregate as TOML.
    Export {
        /// Target file; stdout when omitted.
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Replace the settings aggregate from a TOML archive.
    Import {
        #[arg(long, value_name = "PATH")]
        input: PathBuf,
    },
    /// Clear the persisted snapshot so the seed applies again.
    Reset,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read configuration: {0}")]
    Read(#[from] config::ConfigError),
    #[error("invalid configuration value for `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

impl LoadError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    pub server: RawServerSettings,
    pub logging: RawLoggingSettings,
    pub database: RawDatabaseSettings,
    pub site: RawSiteSettings,
    pub uploads: RawUploadSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawServerSettings {
    pub host: Option<String>,
    pub public_port: Option<u16>,
    pub admin_port: Option<u16>,
    pub graceful_shutdown_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawLoggingSettings {
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawDatabaseSettings {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub acquire_timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawSiteSettings {
    pub base_url: Option<String>,
    pub default_locale: Option<String>,
    pub timezone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawUploadSettings {
    pub directory: Option<String>,
    pub max_upload_bytes: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub site: SiteSettings,
    pub uploads: UploadSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub public_addr: SocketAddr,
    pub admin_addr: SocketAddr,
    pub graceful_shutdown: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: Level,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct SiteSettings {
    pub base_url: Url,
    pub default_locale: Locale,
    pub timezone: Tz,
}

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub directory: PathBuf,
    pub max_upload_bytes: u64,
}

/// Parse the CLI and resolve the layered configuration in one step.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let cli = CliArgs::parse();
    let settings = load(cli.config_file.as_deref())?;
    Ok((cli, settings))
}

pub fn load(config_file: Option<&std::path::Path>) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    let resolved = builder
        .add_source(Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
        .build()?;

    let raw: RawSettings = resolved.try_deserialize()?;
    Settings::from_raw(raw)
}

impl Settings {
    pub fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        Ok(Self {
            server: build_server_settings(raw.server)?,
            logging: build_logging_settings(raw.logging)?,
            database: build_database_settings(raw.database)?,
            site: build_site_settings(raw.site)?,
            uploads: build_upload_settings(raw.uploads)?,
        })
    }
}

fn build_server_settings(raw: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = raw.host.unwrap_or_else(|| "127.0.0.1".to_string());
    let host: IpAddr = host
        .parse()
        .map_err(|err| LoadError::invalid("server.host", format!("{host}: {err}")))?;

    let public_port = raw.public_port.unwrap_or(8080);
    let admin_port = raw.admin_port.unwrap_or(8081);
    if public_port == admin_port {
        return Err(LoadError::invalid(
            "server.admin_port",
            format!("admin port {admin_port} collides with the public port"),
        ));
    }

    Ok(ServerSettings {
        public_addr: SocketAddr::new(host, public_port),
        admin_addr: SocketAddr::new(host, admin_port),
        graceful_shutdown: Duration::from_secs(raw.graceful_shutdown_seconds.unwrap_or(10)),
    })
}

fn build_logging_settings(raw: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match raw.level.as_deref() {
        None => Level::INFO,
        Some(value) => value
            .parse()
            .map_err(|_| LoadError::invalid("logging.level", format!("unknown level `{value}`")))?,
    };

    let format = match raw.format.as_deref() {
        None | Some("compact") => LogFormat::Compact,
        Some("json") => LogFormat::Json,
        Some(other) => {
            return Err(LoadError::invalid(
                "logging.format",
                format!("unknown format `{other}`, expected `compact` or `json`"),
            ));
        }
    };

    Ok(LoggingSettings { level, format })
}

fn build_database_settings(raw: RawDatabaseSettings) -> Result<DatabaseSettings, LoadError> {
    let url = raw
        .url
        .unwrap_or_else(|| "sqlite://orma.db?mode=rwc".to_string());
    if !url.starts_with("sqlite:") {
        return Err(LoadError::invalid(
            "database.url",
            format!("`{url}` is not a sqlite url"),
        ));
    }

    let max_connections = non_zero_u32("database.max_connections", raw.max_connections, 5)?;

    Ok(DatabaseSettings {
        url,
        max_connections,
        acquire_timeout: Duration::from_secs(raw.acquire_timeout_seconds.unwrap_or(5)),
    })
}

fn build_site_settings(raw: RawSiteSettings) -> Result<SiteSettings, LoadError> {
    let base_url = raw
        .base_url
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    let base_url = Url::parse(&base_url)
        .map_err(|err| LoadError::invalid("site.base_url", format!("{base_url}: {err}")))?;

    let default_locale = match raw.default_locale.as_deref() {
        None => Locale::En,
        Some(value) => Locale::try_from(value).map_err(|_| {
            LoadError::invalid("site.default_locale", format!("unknown locale `{value}`"))
        })?,
    };

    let timezone = raw
        .timezone
        .unwrap_or_else(|| "Europe/Brussels".to_string());
    let timezone: Tz = timezone.parse().map_err(|_| {
        LoadError::invalid("site.timezone", format!("unknown timezone `{timezone}`"))
    })?;

    Ok(SiteSettings {
        base_url,
        default_locale,
        timezone,
    })
}

fn build_upload_settings(raw: RawUploadSettings) -> Result<UploadSettings, LoadError> {
    let max_upload_bytes = raw.max_upload_bytes.unwrap_or(2 * 1024 * 1024);
    if max_upload_bytes == 0 {
        return Err(LoadError::invalid(
            "uploads.max_upload_bytes",
            "must be greater than zero",
        ));
    }

    Ok(UploadSettings {
        directory: PathBuf::from(raw.directory.unwrap_or_else(|| "uploads".to_string())),
        max_upload_bytes,
    })
}

fn non_zero_u32(field: &'static str, value: Option<u32>, default: u32) -> Result<u32, LoadError> {
    let value = value.unwrap_or(default);
    if value == 0 {
        return Err(LoadError::invalid(field, "must be greater than zero"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_local_listeners() {
        let settings = Settings::from_raw(RawSettings::default()).expect("defaults are valid");
        assert_eq!(settings.server.public_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(settings.server.admin_addr.to_string(), "127.0.0.1:8081");
        assert_eq!(settings.logging.level, Level::INFO);
        assert_eq!(settings.logging.format, LogFormat::Compact);
        assert_eq!(settings.site.default_locale, Locale::En);
        assert_eq!(settings.site.timezone, chrono_tz::Europe::Brussels);
        assert!(settings.database.url.starts_with("sqlite:"));
    }

    #[test]
    fn colliding_ports_are_rejected() {
        let raw = RawSettings {
            server: RawServerSettings {
                public_port: Some(9000),
                admin_port: Some(9000),
                ..RawServerSettings::default()
            },
            ..RawSettings::default()
        };
        let err = Settings::from_raw(raw).expect_err("identical ports must fail");
        assert!(matches!(
            err,
            LoadError::Invalid {
                field: "server.admin_port",
                ..
            }
        ));
    }

    #[test]
    fn bad_host_names_the_field() {
        let raw = RawSettings {
            server: RawServerSettings {
                host: Some("not-an-ip".to_string()),
                ..RawServerSettings::default()
            },
            ..RawSettings::default()
        };
        let err = Settings::from_raw(raw).expect_err("host must be an ip literal");
        assert!(matches!(
            err,
            LoadError::Invalid {
                field: "server.host",
                ..
            }
        ));
    }

    #[test]
    fn non_sqlite_database_urls_are_rejected() {
        let raw = RawSettings {
            database: RawDatabaseSettings {
                url: Some("postgres://localhost/orma".to_string()),
                ..RawDatabaseSettings::default()
            },
            ..RawSettings::default()
        };
        assert!(Settings::from_raw(raw).is_err());
    }

    #[test]
    fn locale_and_timezone_are_validated() {
        let raw = RawSettings {
            site: RawSiteSettings {
                default_locale: Some("fr".to_string()),
                timezone: Some("Europe/Paris".to_string()),
                ..RawSiteSettings::default()
            },
            ..RawSettings::default()
        };
        let settings = Settings::from_raw(raw).expect("fr/Paris are valid");
        assert_eq!(settings.site.default_locale, Locale::Fr);
        assert_eq!(settings.site.timezone, chrono_tz::Europe::Paris);

        let raw = RawSettings {
            site: RawSiteSettings {
                default_locale: Some("de".to_string()),
                ..RawSiteSettings::default()
            },
            ..RawSettings::default()
        };
        assert!(Settings::from_raw(raw).is_err());
    }
}
