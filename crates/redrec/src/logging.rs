//! Diagnostics go to stderr so they never mix with the selector's drawing on stdout.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "warn";

/// Filter from `directives`, falling back to [`DEFAULT_FILTER`] when absent or invalid.
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(directives: Option<&str>) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        if let Some(directives) = directives {
            if EnvFilter::try_new(directives).is_err() {
                tracing::warn!(directives, "ignoring invalid log filter");
            }
        }
    }
}
