//! End-to-end extraction tests over in-memory and on-disk configs.

use std::collections::HashMap;

use backend_config::config::reader::{ConfigError, ConfigReader, Result};
use backend_config::config::{load_settings, ConfigValue};
use backend_config::options::StringOrStringList;
use backend_config::{
    read_base_options, read_cors_options, read_https_settings, ServerSettings,
};
use serde_json::json;

mod common;

#[test]
fn full_document() {
    let config = common::tree(json!({
        "listen": "0.0.0.0:7000",
        "baseUrl": "http://localhost:7000",
        "cors": {"origin": "http://localhost:3000", "credentials": true},
        "https": {"certificate": {"key": "...", "cert": "..."}}
    }));

    let settings = ServerSettings::from_reader(&config).unwrap();
    assert_eq!(
        serde_json::to_value(&settings).unwrap(),
        json!({
            "listenPort": 7000,
            "listenHost": "0.0.0.0",
            "baseUrl": "http://localhost:7000",
            "cors": {"origin": "http://localhost:3000", "credentials": true},
            "https": {"certificate": {"key": "...", "cert": "..."}}
        })
    );
}

#[test]
fn port_only_listen_for_many_ports() {
    for port in [1, 80, 443, 3000, 7007, 65535] {
        let config = common::tree(json!({"listen": port.to_string()}));
        let opts = read_base_options(&config).unwrap();
        assert_eq!(opts.listen_port, Some(port));
        assert!(opts.listen_host.is_none());
    }
}

#[test]
fn host_and_port_listen_for_many_hosts() {
    for host in ["localhost", "127.0.0.1", "0.0.0.0", "backend.internal"] {
        let config = common::tree(json!({"listen": format!("{host}:8080")}));
        let opts = read_base_options(&config).unwrap();
        assert_eq!(opts.listen_host.as_deref(), Some(host));
        assert_eq!(opts.listen_port, Some(8080));
    }
}

#[test]
fn sections_are_read_independently() {
    let config = common::tree(json!({
        "listen": "7000",
        "cors": {"origin": ["http://a", "http://b"]},
        "https": {}
    }));

    assert!(read_https_settings(&config).is_err());
    let cors = read_cors_options(&config).unwrap().unwrap();
    assert_eq!(
        cors.origin,
        Some(StringOrStringList::List(vec!["http://a".into(), "http://b".into()]))
    );
    assert!(ServerSettings::from_reader(&config).is_err());
}

#[test]
fn reads_are_idempotent() {
    let config = common::tree(json!({
        "listen": "host:1234",
        "cors": {"methods": ["GET"], "maxAge": 5},
        "https": {"certificate": {"days": 2}}
    }));

    let first = ServerSettings::from_reader(&config).unwrap();
    let second = ServerSettings::from_reader(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn serialized_settings_never_contain_absent_keys() {
    let docs = [
        json!({"listen": "7000"}),
        json!({"listen": "7000", "cors": {}}),
        json!({"listen": "h:x", "cors": {"exposedHeaders": "X-A"}}),
        json!({"listen": "7000", "https": {"certificate": {"key": "k"}}}),
    ];
    for doc in docs {
        let settings = ServerSettings::from_reader(&common::tree(doc)).unwrap();
        common::assert_no_nulls(&serde_json::to_value(&settings).unwrap());
    }

    let settings = ServerSettings::from_reader(&common::tree(json!({"listen": "7000"}))).unwrap();
    assert_eq!(serde_json::to_value(&settings).unwrap(), json!({"listenPort": 7000}));
}

/// A reader backed by a flat map of dotted keys, with no real sections.
struct FakeReader {
    prefix: String,
    values: HashMap<String, ConfigValue>,
}

impl FakeReader {
    fn new(values: &[(&str, ConfigValue)]) -> Self {
        Self {
            prefix: String::new(),
            values: values
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }
}

impl ConfigReader for FakeReader {
    fn get_optional(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(&self.full_key(key))
    }

    fn get_optional_config(&self, key: &str) -> Result<Option<Self>> {
        let prefix = self.full_key(key);
        let nested = format!("{prefix}.");
        if !self.values.keys().any(|k| k.starts_with(&nested)) {
            return Ok(None);
        }
        Ok(Some(Self {
            prefix,
            values: self.values.clone(),
        }))
    }

    fn full_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.prefix, key)
        }
    }
}

#[test]
fn extractors_work_against_any_reader() {
    let fake = FakeReader::new(&[
        ("listen", ConfigValue::from("9000")),
        ("cors.origin", ConfigValue::from("http://x")),
        ("cors.credentials", ConfigValue::from(true)),
    ]);

    let base = read_base_options(&fake).unwrap();
    assert_eq!(base.listen_port, Some(9000));

    let cors = read_cors_options(&fake).unwrap().unwrap();
    assert_eq!(cors.origin, Some(StringOrStringList::Single("http://x".into())));
    assert_eq!(cors.credentials, Some(true));
    assert_eq!(read_https_settings(&fake).unwrap(), None);

    let bad = FakeReader::new(&[("cors.origin", ConfigValue::from(42.0))]);
    assert_eq!(
        read_cors_options(&bad),
        Err(ConfigError::TypeMismatch {
            key: "cors.origin".into(),
            expected: "string or array of strings",
            actual: "number",
        })
    );
}

#[test]
fn settings_from_toml_file() {
    let (_dir, path) = common::write_config(
        "app-config.toml",
        r#"
listen = "0.0.0.0:7000"
baseUrl = "http://localhost:7000"

[cors]
origin = "http://localhost:3000"
credentials = true

[https.certificate]
key = "k"
cert = "c"
"#,
    );

    let settings = load_settings(&path, None).unwrap();
    assert_eq!(settings.base.listen_port, Some(7000));
    assert_eq!(settings.cors.as_ref().and_then(|c| c.credentials), Some(true));
    assert_eq!(
        serde_json::to_value(&settings.https).unwrap(),
        json!({"certificate": {"key": "k", "cert": "c"}})
    );
}

#[test]
fn settings_from_json_file() {
    let (_dir, path) = common::write_config(
        "app-config.json",
        r#"{"listen": "8080", "cors": {"methods": "GET,POST"}}"#,
    );

    let settings = load_settings(&path, None).unwrap();
    assert_eq!(settings.base.listen_port, Some(8080));
    assert!(settings.https.is_none());
}
