//! In-memory config tree.

use std::collections::BTreeMap;

use crate::config::reader::{ConfigError, ConfigReader, Result};
use crate::config::value::ConfigValue;

/// Immutable snapshot of a configuration section.
///
/// Keys may be dotted paths (`"cors.origin"`) that descend through nested
/// sections. A tree obtained through [`ConfigReader::get_optional_config`]
/// remembers where it came from, so errors report the full key path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigTree {
    data: BTreeMap<String, ConfigValue>,
    prefix: String,
}

impl ConfigTree {
    pub fn new(data: BTreeMap<String, ConfigValue>) -> Self {
        Self {
            data,
            prefix: String::new(),
        }
    }

    /// A tree rooted at `prefix` of some larger document.
    pub fn with_prefix(data: BTreeMap<String, ConfigValue>, prefix: impl Into<String>) -> Self {
        Self {
            data,
            prefix: prefix.into(),
        }
    }

    /// Build a tree from a root value, which must be a section.
    pub fn from_value(value: ConfigValue) -> Result<Self> {
        match value {
            ConfigValue::Section(data) => Ok(Self::new(data)),
            other => Err(ConfigError::type_mismatch("<root>".into(), "section", &other)),
        }
    }

    /// Build a tree from a JSON document. A `null` document is an empty tree.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match ConfigValue::from_json(value) {
            Some(value) => Self::from_value(value),
            None => Ok(Self::default()),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn lookup(&self, key: &str) -> Option<&ConfigValue> {
        let mut parts = key.split('.');
        let mut current = self.data.get(parts.next()?)?;
        for part in parts {
            current = current.as_section()?.get(part)?;
        }
        Some(current)
    }
}

impl ConfigReader for ConfigTree {
    fn get_optional(&self, key: &str) -> Option<&ConfigValue> {
        self.lookup(key)
    }

    fn get_optional_config(&self, key: &str) -> Result<Option<Self>> {
        match self.lookup(key) {
            None => Ok(None),
            Some(ConfigValue::Section(data)) => {
                Ok(Some(Self::with_prefix(data.clone(), self.full_key(key))))
            }
            Some(other) => Err(ConfigError::type_mismatch(self.full_key(key), "section", other)),
        }
    }

    fn full_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }
}
