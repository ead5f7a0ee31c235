//! The config reader capability.
//!
//! Extractors never touch a concrete config backend; they are written against
//! [`ConfigReader`]. An implementation only has to provide raw lookups, the
//! typed accessors are derived from them.

use thiserror::Error;

use crate::config::value::ConfigValue;

/// Errors raised while reading values out of a config tree.
///
/// Every variant carries the full dotted key path of the offending value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A required key is absent.
    #[error("Missing required config value at '{key}'")]
    MissingRequiredKey { key: String },

    /// A value is present with the right type but does not match its grammar.
    #[error("Unable to parse '{value}' at '{key}', {expected}")]
    InvalidFormat {
        key: String,
        value: String,
        expected: &'static str,
    },

    /// A value is present with the wrong shape.
    #[error("Invalid type at '{key}', expected {expected}, got {actual}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },
}

impl ConfigError {
    pub fn type_mismatch(key: String, expected: &'static str, value: &ConfigValue) -> Self {
        ConfigError::TypeMismatch {
            key,
            expected,
            actual: value.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Read access to a hierarchical configuration snapshot.
pub trait ConfigReader: Sized {
    /// Look up a raw value, `None` if absent.
    fn get_optional(&self, key: &str) -> Option<&ConfigValue>;

    /// Look up a nested section. Fails if the key holds a non-section value.
    fn get_optional_config(&self, key: &str) -> Result<Option<Self>>;

    /// Full key path of `key` relative to the root, for error messages.
    fn full_key(&self, key: &str) -> String;

    fn get(&self, key: &str) -> Result<&ConfigValue> {
        self.get_optional(key)
            .ok_or_else(|| ConfigError::MissingRequiredKey {
                key: self.full_key(key),
            })
    }

    fn get_string(&self, key: &str) -> Result<String> {
        self.get_optional_string(key)?
            .ok_or_else(|| ConfigError::MissingRequiredKey {
                key: self.full_key(key),
            })
    }

    fn get_optional_string(&self, key: &str) -> Result<Option<String>> {
        match self.get_optional(key) {
            None => Ok(None),
            Some(ConfigValue::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(ConfigError::type_mismatch(self.full_key(key), "string", other)),
        }
    }

    fn get_optional_number(&self, key: &str) -> Result<Option<f64>> {
        match self.get_optional(key) {
            None => Ok(None),
            Some(ConfigValue::Integer(i)) => Ok(Some(*i as f64)),
            Some(ConfigValue::Float(f)) => Ok(Some(*f)),
            Some(other) => Err(ConfigError::type_mismatch(self.full_key(key), "number", other)),
        }
    }

    fn get_optional_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get_optional(key) {
            None => Ok(None),
            Some(ConfigValue::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(ConfigError::type_mismatch(self.full_key(key), "boolean", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Flat map reader, no sections.
    struct FlatReader(HashMap<&'static str, ConfigValue>);

    impl ConfigReader for FlatReader {
        fn get_optional(&self, key: &str) -> Option<&ConfigValue> {
            self.0.get(key)
        }

        fn get_optional_config(&self, _key: &str) -> Result<Option<Self>> {
            Ok(None)
        }

        fn full_key(&self, key: &str) -> String {
            key.to_string()
        }
    }

    fn reader() -> FlatReader {
        FlatReader(HashMap::from([
            ("name", ConfigValue::from("svc")),
            ("port", ConfigValue::from(80i64)),
            ("on", ConfigValue::from(true)),
        ]))
    }

    #[test]
    fn typed_accessors_read_matching_types() {
        let r = reader();
        assert_eq!(r.get_string("name").unwrap(), "svc");
        assert_eq!(r.get_optional_number("port").unwrap(), Some(80.0));
        assert_eq!(r.get_optional_bool("on").unwrap(), Some(true));
        assert_eq!(r.get_optional_string("missing").unwrap(), None);
    }

    #[test]
    fn required_accessors_report_missing_key() {
        let r = reader();
        assert_eq!(
            r.get_string("listen"),
            Err(ConfigError::MissingRequiredKey { key: "listen".into() })
        );
        assert!(matches!(
            r.get("listen"),
            Err(ConfigError::MissingRequiredKey { .. })
        ));
    }

    #[test]
    fn wrong_type_is_a_mismatch() {
        let r = reader();
        assert_eq!(
            r.get_optional_string("port"),
            Err(ConfigError::TypeMismatch {
                key: "port".into(),
                expected: "string",
                actual: "number",
            })
        );
        assert!(r.get_optional_bool("name").is_err());
        assert!(r.get_string("on").is_err());
    }

    #[test]
    fn error_messages_name_the_key() {
        let err = ConfigError::InvalidFormat {
            key: "listen".into(),
            value: "a:b:c".into(),
            expected: "expected <port> or <host>:<port>",
        };
        let msg = err.to_string();
        assert!(msg.contains("listen"));
        assert!(msg.contains("a:b:c"));
    }
}
