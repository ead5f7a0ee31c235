//! Shared utilities for integration tests.

use std::path::PathBuf;

use backend_config::ConfigTree;
use tempfile::TempDir;

/// Build a tree from a JSON literal.
pub fn tree(doc: serde_json::Value) -> ConfigTree {
    ConfigTree::from_json(doc).expect("test document root must be an object")
}

/// Write a config file into a fresh temp dir. Keep the dir alive while the
/// file is in use.
#[allow(dead_code)]
pub fn write_config(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    (dir, path)
}

/// Recursively check a serialized value contains no nulls.
#[allow(dead_code)]
pub fn assert_no_nulls(value: &serde_json::Value) {
    match value {
        serde_json::Value::Null => panic!("serialized settings contain a null"),
        serde_json::Value::Array(items) => items.iter().for_each(assert_no_nulls),
        serde_json::Value::Object(map) => map.values().for_each(assert_no_nulls),
        _ => {}
    }
}
