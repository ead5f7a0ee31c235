//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! loader / watcher / http / net
//!     → tracing events with structured fields
//!     → logging.rs (fmt subscriber, EnvFilter)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - Extraction in `options` stays silent; only I/O-facing code logs
//! - Log level configurable via CLI flag and environment

pub mod logging;
