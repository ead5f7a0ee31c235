//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Honour `RUST_LOG`, falling back to the configured level
//! - Write to stderr so stdout stays machine-readable
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Library code only emits events; installing a subscriber is the binary's job

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a level name such as `info` or `debug`.
pub fn default_filter(level: &str) -> String {
    format!("backend_config={level},tower_http={level}")
}

/// Install the global subscriber. Events go to stderr; stdout carries the
/// CLI's JSON output.
pub fn init(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        let directive = default_filter("debug");
        assert_eq!(directive, "backend_config=debug,tower_http=debug");
        assert!(EnvFilter::try_new(directive).is_ok());
    }
}
