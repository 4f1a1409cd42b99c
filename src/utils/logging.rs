use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` wins over `default_level`.
pub fn init_tracing(default_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();
}

pub(crate) fn with_pretty_json_debug<T, F>(value: &T, log_action: F)
where
    T: Serialize,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    let pretty_json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|error| format!("<pretty serialize failed: {error}>"));
    log_action(pretty_json.as_str());
}
