//! Network layer glue.
//!
//! # Data Flow
//! ```text
//! HttpsSettings (extracted)
//!     → certificate_options() (file vs signing)
//!     → tls.rs (read PEM data, or generate a self-signed certificate)
//!     → RustlsConfig for axum-server
//! ```
//!
//! # Design Decisions
//! - Certificate shape is only validated here, not during extraction
//! - TLS config loading is async; extraction stays synchronous

pub mod tls;

pub use tls::{generate_self_signed, load_tls_config, SelfSignedCertificate, TlsError};
