// src/logging.rs
use anyhow::{Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

const DEFAULT_FILTER: &str = "vixia=info,rocket::server=off";

/// Log through `tracing` under the crate target.
///
/// `app_log!(info, "Loaded {} consultants", count)`
#[macro_export]
macro_rules! app_log {
    (trace, $($arg:tt)+) => { ::tracing::trace!(target: "vixia", $($arg)+) };
    (debug, $($arg:tt)+) => { ::tracing::debug!(target: "vixia", $($arg)+) };
    (info, $($arg:tt)+) => { ::tracing::info!(target: "vixia", $($arg)+) };
    (warn, $($arg:tt)+) => { ::tracing::warn!(target: "vixia", $($arg)+) };
    (error, $($arg:tt)+) => { ::tracing::error!(target: "vixia", $($arg)+) };
}

/// Install the global subscriber.
///
/// Production emits one JSON object per line; every other environment gets the
/// human-readable formatter. `RUST_LOG` overrides the default filter.
pub fn init(environment: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let production = environment == "production";

    let json_layer = production.then(|| {
        fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_list(false)
    });
    let text_layer = (!production).then(fmt::layer);

    Registry::default()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .context("Failed to install tracing subscriber")
}
