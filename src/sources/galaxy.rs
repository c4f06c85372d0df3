use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_yaml::Value;

use super::VersionFormat;
use crate::error::{BumprError, Result};

/// Top-level `version:` scalar, quoted or bare, with an optional comment
static VERSION_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^version:[ \t]*(?:"(?P<dq>[^"\r\n]+)"|'(?P<sq>[^'\r\n]+)'|(?P<bare>[^"'\s#>|!&*][^"'\s#]*))[ \t]*(?:#[^\r\n]*)?\r?$"#,
    )
    .expect("galaxy version pattern is valid")
});

static NUMERIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(?:\.[0-9]+)?$").expect("numeric pattern is valid"));

/// Ansible collection manifest `galaxy.yml`
pub struct Galaxy;

/// A bare YAML scalar such as `1.0` or `2` is a number to a YAML parser;
/// pad it to three components.
fn normalize_bare(value: &str) -> String {
    if !NUMERIC_RE.is_match(value) {
        return value.to_string();
    }
    match value.matches('.').count() {
        0 => format!("{}.0.0", value),
        _ => format!("{}.0", value),
    }
}

fn value_of<'c>(caps: &Captures<'c>) -> Option<(regex::Match<'c>, bool)> {
    caps.name("dq")
        .or_else(|| caps.name("sq"))
        .map(|m| (m, false))
        .or_else(|| caps.name("bare").map(|m| (m, true)))
}

/// Structural fallback used when no top-level version line matched
fn lookup_parsed(content: &str, path: &Path) -> Result<String> {
    let document: Value = serde_yaml::from_str(content)
        .map_err(|e| BumprError::parse(path, format!("invalid YAML: {}", e)))?;

    match document.get("version") {
        Some(Value::String(version)) => Ok(version.clone()),
        Some(Value::Number(number)) => {
            let text = match (number.as_u64(), number.as_f64()) {
                (Some(int), _) => int.to_string(),
                (None, Some(float)) => float.to_string(),
                (None, None) => number.to_string(),
            };
            Ok(normalize_bare(&text))
        }
        Some(other) => Err(BumprError::parse(
            path,
            format!("version field is not a scalar: {:?}", other),
        )),
        None => Err(BumprError::VersionNotFound(path.to_path_buf())),
    }
}

impl VersionFormat for Galaxy {
    const FILE_NAME: &'static str = "galaxy.yml";
    const DISPLAY_NAME: &'static str = "Ansible collection (galaxy.yml)";

    fn extract(content: &str, path: &Path) -> Result<String> {
        let matched = VERSION_LINE_RE
            .captures(content)
            .and_then(|caps| value_of(&caps).map(|(m, bare)| (m.as_str(), bare)));

        match matched {
            Some((value, true)) => Ok(normalize_bare(value)),
            Some((value, false)) => Ok(value.to_string()),
            None => lookup_parsed(content, path),
        }
    }

    fn replace(content: &str, new_version: &str, path: &Path) -> Result<String> {
        let span = VERSION_LINE_RE
            .captures(content)
            .and_then(|caps| value_of(&caps).map(|(m, _)| m.range()))
            .ok_or_else(|| BumprError::PatternNotFound(path.to_path_buf()))?;

        Ok(format!(
            "{}{}{}",
            &content[..span.start],
            new_version,
            &content[span.end..]
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &str) -> Result<String> {
        Galaxy::extract(content, Path::new("galaxy.yml"))
    }

    fn replace(content: &str, version: &str) -> String {
        Galaxy::replace(content, version, Path::new("galaxy.yml")).unwrap()
    }

    const MANIFEST: &str = "namespace: my_namespace\nname: my_collection\nversion: {}\nreadme: README.md\nauthors:\n  - Your Name\n";

    fn manifest(version: &str) -> String {
        MANIFEST.replace("{}", version)
    }

    #[test]
    fn test_extract_quoted_and_bare() {
        assert_eq!(extract(&manifest("\"1.2.3\"")).unwrap(), "1.2.3");
        assert_eq!(extract(&manifest("'2.0.0'")).unwrap(), "2.0.0");
        assert_eq!(extract(&manifest("0.1.0")).unwrap(), "0.1.0");
        assert_eq!(extract(&manifest("\"v1.0.0\"")).unwrap(), "v1.0.0");
    }

    #[test]
    fn test_extract_normalizes_numeric_looking_values() {
        assert_eq!(extract(&manifest("1.0")).unwrap(), "1.0.0");
        assert_eq!(extract(&manifest("3")).unwrap(), "3.0.0");
        // quoted values are strings, never numbers
        assert_eq!(extract(&manifest("\"1.0\"")).unwrap(), "1.0");
    }

    #[test]
    fn test_extract_with_trailing_comment() {
        assert_eq!(extract(&manifest("1.2.3  # release")).unwrap(), "1.2.3");
    }

    #[test]
    fn test_nested_version_keys_are_ignored() {
        let content = "dependencies:\n  version: 9.9.9\nversion: 1.0.0\n";
        assert_eq!(extract(content).unwrap(), "1.0.0");
    }

    #[test]
    fn test_missing_version() {
        let content = "namespace: my_namespace\nname: my_collection\n";
        assert!(matches!(
            extract(content),
            Err(BumprError::VersionNotFound(_))
        ));
    }

    #[test]
    fn test_pattern_tolerates_invalid_yaml() {
        let content = "namespace: [unclosed\nversion: \"1.0.0\"\n";
        assert_eq!(extract(content).unwrap(), "1.0.0");
    }

    #[test]
    fn test_falls_back_to_yaml_parser() {
        let content = "namespace: ns\nversion: >-\n  4.5.6\n";
        assert_eq!(extract(content).unwrap(), "4.5.6");
    }

    #[test]
    fn test_yaml_fallback_normalizes_numbers() {
        assert_eq!(extract("version: &v 2.5\n").unwrap(), "2.5.0");
        assert_eq!(extract("version: &v 7\n").unwrap(), "7.0.0");
    }

    #[test]
    fn test_replace_preserves_quote_style() {
        assert_eq!(
            replace(&manifest("\"1.2.3\""), "2.0.0"),
            manifest("\"2.0.0\"")
        );
        assert_eq!(replace(&manifest("'1.2.3'"), "2.0.0"), manifest("'2.0.0'"));
        assert_eq!(replace(&manifest("1.2.3"), "2.0.0"), manifest("2.0.0"));
    }

    #[test]
    fn test_replace_preserves_spacing_and_comment() {
        let content = "version:   \"1.2.3\"  # keep\nreadme: README.md\n";
        assert_eq!(
            replace(content, "2.0.0"),
            "version:   \"2.0.0\"  # keep\nreadme: README.md\n"
        );
    }

    #[test]
    fn test_replace_then_extract() {
        let updated = replace(&manifest("1.0"), "2.0.0");
        assert_eq!(extract(&updated).unwrap(), "2.0.0");
    }

    #[test]
    fn test_replace_without_pattern_fails() {
        let err = Galaxy::replace("name: x\n", "1.0.0", Path::new("galaxy.yml")).unwrap_err();
        assert!(matches!(err, BumprError::PatternNotFound(_)));
    }
}
