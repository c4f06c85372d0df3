use std::path::PathBuf;

use super::ReleaseWarning;
use crate::domain::BumpKind;
use crate::sources::VersionSource;

/// Outcome of one release run
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseReport {
    /// Version read from the source before the run
    pub previous: String,
    /// Version that was (or would be) released
    pub version: String,
    pub kind: BumpKind,
    pub source: VersionSource,
    pub source_file: PathBuf,
    pub committed: bool,
    /// The tag reached the remote
    pub pushed: bool,
    pub release_created: bool,
    pub dry_run: bool,
    pub warnings: Vec<ReleaseWarning>,
    /// Every applicable stage ran; false for a dry run
    pub completed: bool,
    /// Manual commands left to run because push or commit was skipped
    pub next_steps: Vec<String>,
}
