use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "household_finance=debug,tower_http=debug";

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .init();
}
