use std::ops::Range;
use std::path::Path;

use super::VersionFormat;
use crate::error::{BumprError, Result};

/// Plain `.version` file: the first non-blank line, trimmed, is the version
///
/// Also the fallback for explicitly supplied files with an unknown name.
pub struct VersionFile;

fn locate_version(content: &str) -> Option<Range<usize>> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            let start = offset + (line.len() - line.trim_start().len());
            return Some(start..start + trimmed.len());
        }
        offset += line.len();
    }
    None
}

impl VersionFormat for VersionFile {
    const FILE_NAME: &'static str = ".version";
    const DISPLAY_NAME: &'static str = "Version file (.version)";

    fn extract(content: &str, path: &Path) -> Result<String> {
        locate_version(content)
            .map(|span| content[span].to_string())
            .ok_or_else(|| BumprError::parse(path, "version file is empty"))
    }

    fn replace(content: &str, new_version: &str, path: &Path) -> Result<String> {
        let span = locate_version(content)
            .ok_or_else(|| BumprError::PatternNotFound(path.to_path_buf()))?;
        Ok(format!(
            "{}{}{}",
            &content[..span.start],
            new_version,
            &content[span.end..]
        ))
    }
}
