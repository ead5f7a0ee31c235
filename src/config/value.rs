//! Configuration values.
//!
//! A `ConfigValue` is one node of the configuration tree. Leaves are strings,
//! numbers or booleans; sections nest to arbitrary depth; lists hold any value.
//! Null does not exist here: a null in the source document means "not set",
//! so it is dropped during conversion.

use std::collections::BTreeMap;

use serde::Serialize;

/// A single node of a configuration tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Section(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// Human-readable name of the value's shape, used in type errors.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) | ConfigValue::Float(_) => "number",
            ConfigValue::String(_) => "string",
            ConfigValue::List(_) => "array",
            ConfigValue::Section(_) => "section",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric value of either number variant.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Integer(i) => Some(*i as f64),
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&BTreeMap<String, ConfigValue>> {
        match self {
            ConfigValue::Section(map) => Some(map),
            _ => None,
        }
    }

    /// Convert a JSON document node. Returns `None` for `null`; nulls inside
    /// sections and lists are dropped.
    pub fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Null => None,
            serde_json::Value::Bool(b) => Some(ConfigValue::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(ConfigValue::Integer(i)),
                None => n.as_f64().map(ConfigValue::Float),
            },
            serde_json::Value::String(s) => Some(ConfigValue::String(s)),
            serde_json::Value::Array(items) => Some(ConfigValue::List(
                items.into_iter().filter_map(ConfigValue::from_json).collect(),
            )),
            serde_json::Value::Object(map) => Some(ConfigValue::Section(
                map.into_iter()
                    .filter_map(|(k, v)| ConfigValue::from_json(v).map(|v| (k, v)))
                    .collect(),
            )),
        }
    }

    /// Convert a TOML document node. Datetimes become their RFC 3339 string.
    pub fn from_toml(value: toml::Value) -> Self {
        match value {
            toml::Value::Boolean(b) => ConfigValue::Bool(b),
            toml::Value::Integer(i) => ConfigValue::Integer(i),
            toml::Value::Float(f) => ConfigValue::Float(f),
            toml::Value::String(s) => ConfigValue::String(s),
            toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
            toml::Value::Array(items) => {
                ConfigValue::List(items.into_iter().map(ConfigValue::from_toml).collect())
            }
            toml::Value::Table(table) => ConfigValue::Section(
                table
                    .into_iter()
                    .map(|(k, v)| (k, ConfigValue::from_toml(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Float(value)
    }
}
