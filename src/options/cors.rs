//! CORS options.

use serde::Serialize;

use crate::config::reader::{ConfigError, ConfigReader, Result};
use crate::config::value::ConfigValue;

/// A field that accepts either one string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StringOrStringList {
    Single(String),
    List(Vec<String>),
}

impl StringOrStringList {
    /// Shape guard: a string, or a list whose every item is a string.
    pub fn from_value(value: &ConfigValue) -> Option<Self> {
        match value {
            ConfigValue::String(s) => Some(Self::Single(s.clone())),
            ConfigValue::List(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .map(Self::List),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            Self::Single(s) => std::slice::from_ref(s),
            Self::List(items) => items,
        }
    }

    /// Entries with comma-separated single strings split apart, trimmed.
    /// `"GET, POST"` yields `["GET", "POST"]`.
    pub fn split_entries(&self) -> Vec<&str> {
        self.as_slice()
            .iter()
            .flat_map(|s| s.split(','))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Whether any whole entry is `"*"`. Used for origins, which are never
    /// split.
    pub fn is_wildcard(&self) -> bool {
        self.as_slice().iter().any(|s| s.trim() == "*")
    }

    /// Whether any comma-separated entry is `"*"`, so `"GET,*"` counts.
    pub fn has_wildcard_entry(&self) -> bool {
        self.split_entries().contains(&"*")
    }
}

/// CORS options for the backend's HTTP layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<StringOrStringList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub methods: Option<StringOrStringList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_headers: Option<StringOrStringList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exposed_headers: Option<StringOrStringList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::serialize_number"
    )]
    pub max_age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preflight_continue: Option<bool>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "super::serialize_number"
    )]
    pub options_success_status: Option<f64>,
}

/// Read CORS options from the `cors` section of a backend config.
///
/// Returns `Ok(None)` when there is no `cors` section at all, which is
/// distinct from a section with every field left out.
pub fn read_cors_options<R: ConfigReader>(config: &R) -> Result<Option<CorsOptions>> {
    let Some(cc) = config.get_optional_config("cors")? else {
        return Ok(None);
    };

    Ok(Some(CorsOptions {
        origin: get_optional_string_or_strings(&cc, "origin")?,
        methods: get_optional_string_or_strings(&cc, "methods")?,
        allowed_headers: get_optional_string_or_strings(&cc, "allowedHeaders")?,
        exposed_headers: get_optional_string_or_strings(&cc, "exposedHeaders")?,
        credentials: cc.get_optional_bool("credentials")?,
        max_age: cc.get_optional_number("maxAge")?,
        preflight_continue: cc.get_optional_bool("preflightContinue")?,
        options_success_status: cc.get_optional_number("optionsSuccessStatus")?,
    }))
}

fn get_optional_string_or_strings<R: ConfigReader>(
    config: &R,
    key: &str,
) -> Result<Option<StringOrStringList>> {
    match config.get_optional(key) {
        None => Ok(None),
        Some(value) => StringOrStringList::from_value(value).map(Some).ok_or_else(|| {
            ConfigError::type_mismatch(config.full_key(key), "string or array of strings", value)
        }),
    }
}
