use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over the default `trait_scan=info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("trait_scan=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
