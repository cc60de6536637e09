//! Logging - tracing subscriber for native hosts

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "ordmint=info,warn";

/// Install the global subscriber. `RUST_LOG` wins over the default directive;
/// `ORDMINT_LOG_JSON=1` switches to JSON lines on stderr.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    let json = std::env::var("ORDMINT_LOG_JSON").map(|v| v == "1").unwrap_or(false);
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = if json { builder.json().try_init() } else { builder.compact().try_init() };
}

/// Subscriber routed through the test harness capture. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::new("ordmint=debug"))
        .with_test_writer()
        .try_init();
}
