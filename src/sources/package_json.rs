use std::path::Path;

use serde_json::Value;

use super::VersionFormat;
use crate::error::{BumprError, Result};

/// Node `package.json`
///
/// Only a top-level string `version` counts. Rewriting re-encodes the whole
/// document with two-space indentation; key order is kept.
pub struct PackageJson;

fn decode(content: &str, path: &Path) -> Result<Value> {
    serde_json::from_str(content)
        .map_err(|e| BumprError::parse(path, format!("invalid JSON: {}", e)))
}

impl VersionFormat for PackageJson {
    const FILE_NAME: &'static str = "package.json";
    const DISPLAY_NAME: &'static str = "Node package (package.json)";

    fn extract(content: &str, path: &Path) -> Result<String> {
        decode(content, path)?
            .get("version")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| BumprError::VersionNotFound(path.to_path_buf()))
    }

    fn replace(content: &str, new_version: &str, path: &Path) -> Result<String> {
        let mut document = decode(content, path)?;
        let fields = document
            .as_object_mut()
            .ok_or_else(|| BumprError::parse(path, "top-level value is not an object"))?;

        match fields.get_mut("version") {
            Some(version) => *version = Value::String(new_version.to_string()),
            None => return Err(BumprError::VersionNotFound(path.to_path_buf())),
        }

        let mut encoded = serde_json::to_string_pretty(&document)
            .map_err(|e| BumprError::parse(path, format!("cannot encode JSON: {}", e)))?;
        encoded.push('\n');
        Ok(encoded)
    }
}
