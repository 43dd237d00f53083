use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for a function binary.
///
/// Called once at cold start. ANSI colors are disabled so the output stays
/// readable in the execution environment's log streams.
pub fn init_telemetry() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "cadenza=info".into()))
        .with(tracing_subscriber::fmt::layer().with_ansi(false))
        .init();
}
