//! HTTP layer glue.
//!
//! # Data Flow
//! ```text
//! CorsOptions (extracted)
//!     → cors.rs (validate entries, map "*" to Any)
//!     → tower_http CorsLayer, ready to attach to a Router
//! ```

pub mod cors;

pub use cors::{cors_layer, CorsError};
