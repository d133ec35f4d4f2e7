//! Tracing initialization.
//!
//! Sets up tracing-subscriber with console output and an `RUST_LOG`
//! compatible environment filter (default level: `info`).

use tracing_subscriber::EnvFilter;

pub fn init_telemetry() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init so tests and embedding callers can initialize their own
    // subscriber first without panicking here.
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
}
