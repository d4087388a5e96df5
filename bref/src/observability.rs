//! Tracing init for the CLI.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Initialize tracing. Call at process startup.
/// BREF_LOG_LEVEL controls verbosity; RUST_LOG takes precedence when set.
pub fn init_tracing() {
    let level = std::env::var("BREF_LOG_LEVEL").unwrap_or_else(|_| "bref=info".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false),
        )
        .try_init();
}
