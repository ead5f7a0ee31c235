//! Backend configuration reader.
//!
//! Extracts typed server settings (listen address, CORS, HTTPS) from a
//! hierarchical config tree, and converts them into values a server
//! bootstrapper can use directly.

pub mod config;
pub mod http;
pub mod net;
pub mod observability;
pub mod options;

pub use config::{ConfigReader, ConfigTree, ConfigValue};
pub use options::{
    read_base_options, read_cors_options, read_https_settings, BaseOptions, CorsOptions,
    HttpsSettings, ServerSettings,
};
