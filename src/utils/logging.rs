use tracing_subscriber::EnvFilter;

/// Pick the filter directive: `RUST_LOG` wins, then `--debug`, then config.
pub fn filter_directive(debug: bool, configured_level: &str) -> String {
    if debug {
        "debug".to_string()
    } else {
        configured_level.to_string()
    }
}

/// Install the global subscriber, writing to stderr so stdout stays clean for JSON output.
pub fn init(debug: bool, configured_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(debug, configured_level)));

    // A subscriber may already be installed when embedded in another binary
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
