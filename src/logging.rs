//! Console logging.
//!
//! `RUST_LOG` wins when set; otherwise `info`, or `debug` for this crate when
//! verbose output is requested.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn default_filter(verbose: bool) -> &'static str {
    if verbose { "info,landgrid=debug" } else { "info" }
}

/// Install the global subscriber; later calls are ignored
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init();
}
