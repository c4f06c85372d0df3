use std::path::{Path, PathBuf};

use thiserror::Error;

/// Unified error type for bumpr operations
///
/// Every variant aborts the release run. Non-fatal conditions are reported
/// through [crate::release::ReleaseWarning] instead.
#[derive(Error, Debug)]
pub enum BumprError {
    #[error("{0}")]
    ConfigConflict(String),

    #[error("pre-flight check failed: {0}")]
    Preflight(String),

    #[error("no version source file found. Supported files: {}", .supported.join(", "))]
    SourceNotFound { supported: Vec<String> },

    #[error("file does not exist: {}", .0.display())]
    FileMissing(PathBuf),

    #[error("invalid version format: '{0}'")]
    InvalidFormat(String),

    #[error("failed to parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("version not found in {}", .0.display())]
    VersionNotFound(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not find version pattern to replace in {}", .0.display())]
    PatternNotFound(PathBuf),

    #[error("command failed: {command} (exit code {exit_code}){}", stderr_suffix(.stderr))]
    CommandFailure {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("could not run {program}: {source}")]
    CommandSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Results in bumpr
pub type Result<T> = std::result::Result<T, BumprError>;

fn stderr_suffix(stderr: &str) -> String {
    match stderr.lines().map(str::trim).find(|line| !line.is_empty()) {
        Some(line) => format!(": {}", line),
        None => String::new(),
    }
}

impl BumprError {
    /// Create a pre-flight error with context
    pub fn preflight(msg: impl Into<String>) -> Self {
        BumprError::Preflight(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumprError::Config(msg.into())
    }

    /// Create a parse error for a version source file
    pub fn parse(path: &Path, reason: impl Into<String>) -> Self {
        BumprError::Parse {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn read(path: &Path, source: std::io::Error) -> Self {
        BumprError::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        BumprError::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}
