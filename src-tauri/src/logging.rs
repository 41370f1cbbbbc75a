use crate::config::LoggingConfig;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured filter.
/// Calling this twice is harmless; the second call is ignored.
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let stdout_layer = fmt::layer()
        .with_timer(LocalTimer)
        .with_ansi(config.ansi)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stdout);

    if tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .try_init()
        .is_ok()
    {
        tracing::info!(filter = %config.filter, "Tracing initialized");
    }
}
