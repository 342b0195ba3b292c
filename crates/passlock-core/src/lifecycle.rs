use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::presenter::PresentationState;

/// Initialize tracing with env filter support.
///
/// Set `RUST_LOG=debug` for verbose output, defaults to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Record which store a run is about to use.
pub fn log_startup(config: &AppConfig) {
    tracing::info!(
        backend = %config.store.backend,
        path = %config.store.path,
        secret_length = config.lock.secret_length,
        "passlock starting"
    );
}

/// Record the state a simulated session ended in.
pub fn log_shutdown(final_state: PresentationState) {
    tracing::info!(state = %final_state, "passlock session finished");
}
