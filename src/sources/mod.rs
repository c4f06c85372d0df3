//! Version sources: the files a project declares its version in
//!
//! Each supported format is a unit struct implementing [VersionFormat], which
//! works purely on text. [VersionSource] is the closed set of those formats and
//! adds the file-system side: detection, reading and rewriting in place.
//!
//! Rewrites substitute only the version value (quotes and everything around it
//! are kept byte for byte). `package.json` is the exception: it is decoded,
//! updated and re-encoded with two-space indentation.

pub mod detector;
pub mod galaxy;
pub mod package_json;
pub mod pyproject;
pub mod version_file;

pub use detector::Detector;
pub use galaxy::Galaxy;
pub use package_json::PackageJson;
pub use pyproject::PyProject;
pub use version_file::VersionFile;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{BumprError, Result};

/// Text-level capabilities of one version file format
pub trait VersionFormat {
    /// File name the format is detected by
    const FILE_NAME: &'static str;

    /// Human readable name for diagnostics
    const DISPLAY_NAME: &'static str;

    /// Extract the raw version string from the file content
    ///
    /// `path` is only used for error messages.
    fn extract(content: &str, path: &Path) -> Result<String>;

    /// Return `content` with the version value replaced by `new_version`
    fn replace(content: &str, new_version: &str, path: &Path) -> Result<String>;
}

/// Supported version file formats, in detection priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionSource {
    PyProject,
    PackageJson,
    VersionFile,
    Galaxy,
}

impl VersionSource {
    /// All variants in the order auto-detection checks them
    pub const ALL: [VersionSource; 4] = [
        VersionSource::PyProject,
        VersionSource::PackageJson,
        VersionSource::VersionFile,
        VersionSource::Galaxy,
    ];

    pub fn canonical_filename(&self) -> &'static str {
        match self {
            VersionSource::PyProject => PyProject::FILE_NAME,
            VersionSource::PackageJson => PackageJson::FILE_NAME,
            VersionSource::VersionFile => VersionFile::FILE_NAME,
            VersionSource::Galaxy => Galaxy::FILE_NAME,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            VersionSource::PyProject => PyProject::DISPLAY_NAME,
            VersionSource::PackageJson => PackageJson::DISPLAY_NAME,
            VersionSource::VersionFile => VersionFile::DISPLAY_NAME,
            VersionSource::Galaxy => Galaxy::DISPLAY_NAME,
        }
    }

    /// True iff the canonical file exists directly under `project_dir`.
    /// The content is not inspected.
    pub fn detect(&self, project_dir: &Path) -> bool {
        project_dir.join(self.canonical_filename()).is_file()
    }

    /// Read the raw version string from `path`
    pub fn read(&self, path: &Path) -> Result<String> {
        let content = read_source(path)?;
        self.extract(&content, path)
    }

    /// Rewrite the version declared in `path` to `new_version`
    pub fn write(&self, path: &Path, new_version: &str) -> Result<()> {
        let content = read_source(path)?;
        let updated = self.replace(&content, new_version, path)?;
        fs::write(path, updated).map_err(|e| BumprError::write(path, e))?;
        tracing::debug!(path = %path.display(), version = new_version, "version source rewritten");
        Ok(())
    }

    pub fn extract(&self, content: &str, path: &Path) -> Result<String> {
        match self {
            VersionSource::PyProject => PyProject::extract(content, path),
            VersionSource::PackageJson => PackageJson::extract(content, path),
            VersionSource::VersionFile => VersionFile::extract(content, path),
            VersionSource::Galaxy => Galaxy::extract(content, path),
        }
    }

    pub fn replace(&self, content: &str, new_version: &str, path: &Path) -> Result<String> {
        match self {
            VersionSource::PyProject => PyProject::replace(content, new_version, path),
            VersionSource::PackageJson => PackageJson::replace(content, new_version, path),
            VersionSource::VersionFile => VersionFile::replace(content, new_version, path),
            VersionSource::Galaxy => Galaxy::replace(content, new_version, path),
        }
    }
}

impl std::fmt::Display for VersionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => BumprError::FileMissing(path.to_path_buf()),
        _ => BumprError::read(path, e),
    })
}
