use tracing_subscriber::EnvFilter;

/// Initialise logging. The default level is `info`; `debug` can be enabled
/// via the settings file, in which case the `RUST_LOG` environment variable
/// may further refine the filter.
pub fn init(debug: bool) {
    // With debug logging disabled the level is pinned to `info` regardless
    // of `RUST_LOG`, so a stray environment variable cannot flood the
    // output.
    let level = if debug { "debug" } else { "info" };

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    } else {
        EnvFilter::new(level)
    };

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
