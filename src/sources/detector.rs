use std::path::{Path, PathBuf};

use super::VersionSource;
use crate::error::{BumprError, Result};

/// Picks the version source of a project
///
/// Holds the registered variants in a fixed priority order; that order is the
/// tie-break when a project contains more than one recognized file.
#[derive(Debug, Clone)]
pub struct Detector {
    sources: Vec<VersionSource>,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector {
    pub fn new() -> Self {
        Detector {
            sources: VersionSource::ALL.to_vec(),
        }
    }

    /// Check `project_dir` and return the first registered source found,
    /// with the absolute path of its file.
    pub fn detect_source(&self, project_dir: &Path) -> Result<(VersionSource, PathBuf)> {
        let source = self
            .sources
            .iter()
            .copied()
            .find(|source| source.detect(project_dir))
            .ok_or_else(|| BumprError::SourceNotFound {
                supported: self.list_available_names(),
            })?;

        let path = absolute(&project_dir.join(source.canonical_filename()))?;
        tracing::debug!(source = source.display_name(), path = %path.display(), "detected version source");
        Ok((source, path))
    }

    /// Match an explicitly supplied file to a source.
    ///
    /// Unknown file names never fail: `.toml` and `.json` files are inferred
    /// from the extension and anything else is read as a plain version file.
    pub fn resolve_by_path(&self, file_path: &Path) -> Result<VersionSource> {
        if !file_path.is_file() {
            return Err(BumprError::FileMissing(file_path.to_path_buf()));
        }

        let file_name = file_path.file_name().and_then(|name| name.to_str());
        if let Some(source) = self
            .sources
            .iter()
            .copied()
            .find(|source| Some(source.canonical_filename()) == file_name)
        {
            return Ok(source);
        }

        let inferred = match file_path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => VersionSource::PyProject,
            Some("json") => VersionSource::PackageJson,
            _ => VersionSource::VersionFile,
        };
        tracing::debug!(
            path = %file_path.display(),
            source = inferred.display_name(),
            "inferred version source from file name"
        );
        Ok(inferred)
    }

    /// Canonical file names of the registered sources, in priority order
    pub fn list_available_names(&self) -> Vec<String> {
        self.sources
            .iter()
            .map(|source| source.canonical_filename().to_string())
            .collect()
    }
}

/// Absolute form of `path` without touching the file system
pub fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| BumprError::read(path, e))
}
