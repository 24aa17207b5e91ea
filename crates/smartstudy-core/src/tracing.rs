use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize structured stdout tracing. Call once from `main`.
/// JSON output, filtered through the `RUST_LOG` env var.
///
/// Safe to call more than once; later calls are silently ignored, which
/// keeps in-process test servers from panicking.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json())
        .try_init();
}
