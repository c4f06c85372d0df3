use std::path::PathBuf;

use crate::domain::BumpKind;
use crate::error::{BumprError, Result};

/// Run-level choices for one release, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOptions {
    pub kind: BumpKind,

    /// Version file given with `--source`; auto-detected when absent
    pub source: Option<PathBuf>,

    /// Print the command sequence without running it
    pub dry_run: bool,

    pub verbose: bool,

    pub skip_push: bool,

    pub skip_commit: bool,

    pub quiet: bool,

    /// Skip pre-flight checks
    pub force: bool,
}

impl ReleaseOptions {
    /// Options for `kind` with every flag off
    pub fn new(kind: BumpKind) -> Self {
        ReleaseOptions {
            kind,
            source: None,
            dry_run: false,
            verbose: false,
            skip_push: false,
            skip_commit: false,
            quiet: false,
            force: false,
        }
    }

    /// Reject flag combinations that cannot be honoured
    pub fn validate(&self) -> Result<()> {
        if self.quiet && self.verbose {
            return Err(BumprError::ConfigConflict(
                "cannot use --quiet and --verbose together".to_string(),
            ));
        }
        Ok(())
    }

    pub fn pushes(&self) -> bool {
        !self.skip_push
    }

    /// Republish never commits; there is nothing new to commit
    pub fn commits(&self) -> bool {
        !self.skip_commit && !self.kind.is_republish()
    }
}
