//! Logging setup
//!
//! Tracing-based logging with an env-filter override. Embedding applications
//! can skip this and install their own subscriber instead.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
///
/// Safe to call more than once; only the first call installs the subscriber.
/// The `RUST_LOG` environment variable overrides the default filter.
pub fn init() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("tallybook=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
