//! Shared plumbing for the `gpx2geojson` and `geojsonview` binaries.

pub mod input;
pub mod viewer;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a stderr logger filtered by `RUST_LOG`, or `default_filter` when unset.
///
/// Logs never go to stdout, which carries the converted output.
pub fn init_logging(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
