use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "orma_settings_save_total",
            Unit::Count,
            "Total number of settings snapshots persisted."
        );
        describe_counter!(
            "orma_settings_save_failed_total",
            Unit::Count,
            "Total number of settings updates applied in memory whose persist failed."
        );
        describe_counter!(
            "orma_settings_reset_total",
            Unit::Count,
            "Total number of resets back to the seed configuration."
        );
        describe_counter!(
            "orma_settings_seed_boot_total",
            Unit::Count,
            "Total number of boots that fell back to the seed configuration."
        );
        describe_counter!(
            "orma_uploads_stored_total",
            Unit::Count,
            "Total number of brand asset uploads stored."
        );
        describe_counter!(
            "orma_http_responses_total",
            Unit::Count,
            "Total number of HTTP responses, labelled by surface and status class."
        );
    });
}
