use std::ops::Range;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::VersionFormat;
use crate::error::{BumprError, Result};

static TABLE_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[\s*([^\[\]]+?)\s*\]\s*(?:#.*)?$").expect("table header pattern is valid")
});

static VERSION_ASSIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*version\s*=\s*(?:"(?P<dq>[^"\r\n]+)"|'(?P<sq>[^'\r\n]+)')"#)
        .expect("version assignment pattern is valid")
});

/// `version = { attr = "pkg.__version__", default = "1.2.3" }`
static VERSION_INLINE_DEFAULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*version\s*=\s*\{[^}\r\n]*?\bdefault\s*=\s*(?:"(?P<dq>[^"\r\n]+)"|'(?P<sq>[^'\r\n]+)')"#,
    )
    .expect("inline version table pattern is valid")
});

/// `default = "1.2.3"` inside a `[project.version]` style table
static DEFAULT_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*default\s*=\s*(?:"(?P<dq>[^"\r\n]+)"|'(?P<sq>[^'\r\n]+)')"#)
        .expect("default key pattern is valid")
});

/// Python `pyproject.toml`
///
/// The version may live at the top level, in `[project]` or in
/// `[tool.poetry]`; the first of those that declares one wins. Besides a
/// plain string, the version may be a table whose `default` key holds it.
pub struct PyProject;

/// Tables a version is looked up in, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Location {
    TopLevel,
    Project,
    Poetry,
}

/// Table the line scan is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Scope {
    location: Location,
    /// Inside `[<location>.version]`, where the value is the `default` key
    version_table: bool,
}

impl Scope {
    fn from_table(name: &str) -> Option<Scope> {
        let normalized: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '"' && *c != '\'')
            .collect();
        let (location, version_table) = match normalized.as_str() {
            "project" => (Location::Project, false),
            "tool.poetry" => (Location::Poetry, false),
            "version" => (Location::TopLevel, true),
            "project.version" => (Location::Project, true),
            "tool.poetry.version" => (Location::Poetry, true),
            _ => return None,
        };
        Some(Scope {
            location,
            version_table,
        })
    }

    fn captures<'l>(&self, line: &'l str) -> Option<Captures<'l>> {
        if self.version_table {
            DEFAULT_KEY_RE.captures(line)
        } else {
            VERSION_ASSIGN_RE
                .captures(line)
                .or_else(|| VERSION_INLINE_DEFAULT_RE.captures(line))
        }
    }
}

/// Net change in array nesting on one line.
///
/// Brackets inside quoted strings and after a comment do not count.
fn bracket_delta(line: &str) -> i32 {
    let mut delta = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in line.chars() {
        match quote {
            Some('"') if escaped => escaped = false,
            Some('"') if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '#' => break,
                '[' => delta += 1,
                ']' => delta -= 1,
                _ => {}
            },
        }
    }
    delta
}

/// Byte range of the highest-priority version value, quotes excluded.
///
/// Tracks `[table]` headers line by line so that `version` keys of other
/// tables (`[tool.black]`, dependency tables, ...) are never picked up.
/// Lines inside a multi-line array are array items, never headers.
fn locate_version(content: &str) -> Option<Range<usize>> {
    let top_level = Scope {
        location: Location::TopLevel,
        version_table: false,
    };
    let mut current = Some(top_level);
    let mut best: Option<(Location, Range<usize>)> = None;
    let mut depth = 0;
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if depth > 0 {
            depth = (depth + bracket_delta(line)).max(0);
            continue;
        }

        let trimmed = line.trim_start();
        if trimmed.starts_with("[[") {
            current = None;
            continue;
        }
        if let Some(caps) = TABLE_HEADER_RE.captures(line.trim_end_matches(['\r', '\n'])) {
            current = Scope::from_table(&caps[1]);
            continue;
        }
        depth = bracket_delta(line).max(0);

        let Some(scope) = current else { continue };
        if best
            .as_ref()
            .is_some_and(|(found, _)| *found <= scope.location)
        {
            continue;
        }
        let value = scope
            .captures(line)
            .and_then(|caps| caps.name("dq").or_else(|| caps.name("sq")));
        if let Some(value) = value {
            let span = line_start + value.start()..line_start + value.end();
            best = Some((scope.location, span));
        }
    }

    best.map(|(_, span)| span)
}

/// Structural fallback used when no version line matched the pattern
fn lookup_parsed(content: &str, path: &Path) -> Result<String> {
    let table: toml::Table = toml::from_str(content)
        .map_err(|e| BumprError::parse(path, format!("invalid TOML: {}", e.message())))?;

    let top_level = table.get("version");
    let project = table
        .get("project")
        .and_then(|project| project.get("version"));
    let poetry = table
        .get("tool")
        .and_then(|tool| tool.get("poetry"))
        .and_then(|poetry| poetry.get("version"));

    let found = [top_level, project, poetry]
        .into_iter()
        .flatten()
        .find_map(|value| {
            value
                .as_str()
                .or_else(|| value.get("default").and_then(toml::Value::as_str))
        })
        .map(str::to_string);
    found.ok_or_else(|| BumprError::VersionNotFound(path.to_path_buf()))
}

impl VersionFormat for PyProject {
    const FILE_NAME: &'static str = "pyproject.toml";
    const DISPLAY_NAME: &'static str = "Python project (pyproject.toml)";

    fn extract(content: &str, path: &Path) -> Result<String> {
        match locate_version(content) {
            Some(span) => Ok(content[span].to_string()),
            None => lookup_parsed(content, path),
        }
    }

    fn replace(content: &str, new_version: &str, path: &Path) -> Result<String> {
        let span =
            locate_version(content).ok_or_else(|| BumprError::PatternNotFound(path.to_path_buf()))?;

        let mut updated = String::with_capacity(content.len() + new_version.len());
        updated.push_str(&content[..span.start]);
        updated.push_str(new_version);
        updated.push_str(&content[span.end..]);
        Ok(updated)
    }
}
