pub mod config;
pub mod models;
pub mod prediction; // Webhook fetch, mock fallback, alerts/feedback, refresh
pub mod risk_engine;
pub mod triage; // Patient-portal emergency classification and voice hand-off

#[cfg(test)]
pub(crate) mod test_support;

pub use prediction::{PredictionService, RefreshHandle};
pub use risk_engine::analyze_weather_risks;
pub use triage::classify;

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` wins over the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
