//! Typed settings extracted from a backend config.
//!
//! # Data Flow
//! ```text
//! ConfigReader (any implementation)
//!     → base.rs   (listen, baseUrl)       → BaseOptions
//!     → cors.rs   (cors section)          → Option<CorsOptions>
//!     → https.rs  (https section)         → Option<HttpsSettings>
//!     → ServerSettings (all three)
//! ```
//!
//! # Design Decisions
//! - Extraction is pure: no I/O, no logging, no caching
//! - Every field is an `Option`; `None` is skipped when serialized
//! - An absent section yields `None`, never an empty struct
//! - A malformed section fails the whole read for that section

pub mod base;
pub mod cors;
pub mod https;

use serde::{Serialize, Serializer};

use crate::config::reader::{ConfigReader, Result};

pub use base::{read_base_options, AddressError, BaseOptions};
pub use cors::{read_cors_options, CorsOptions, StringOrStringList};
pub use https::{
    read_https_settings, CertificateAttributes, CertificateFileOptions, CertificateOptions,
    CertificateSigningOptions, HttpsSettings,
};

/// All settings a server bootstrapper needs, read in one go.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServerSettings {
    #[serde(flatten)]
    pub base: BaseOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cors: Option<CorsOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub https: Option<HttpsSettings>,
}

impl ServerSettings {
    pub fn from_reader<R: ConfigReader>(config: &R) -> Result<Self> {
        Ok(Self {
            base: read_base_options(config)?,
            cors: read_cors_options(config)?,
            https: read_https_settings(config)?,
        })
    }
}

/// Largest magnitude an `f64` holds with every integer below it exact.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Serialize a number read as `f64` the way it was written when it is whole:
/// `600` stays `600`, not `600.0`.
fn serialize_number<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(n) if n.fract() == 0.0 && n.abs() <= MAX_EXACT_INTEGER => {
            serializer.serialize_i64(*n as i64)
        }
        Some(n) => serializer.serialize_f64(*n),
        None => serializer.serialize_none(),
    }
}
