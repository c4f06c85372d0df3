use std::fmt;

use super::ReleaseOptions;

/// What happens to the run when a stage fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the run with the error
    Fatal,
    /// Record a [super::ReleaseWarning] and continue
    Warn,
}

/// States of a release run, in execution order.
///
/// Transitions are strictly forward. A stage that does not apply to the
/// current options is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Preflight,
    ResolveSource,
    ReadVersion,
    ComputeVersion,
    Preview,
    RewriteFile,
    Commit,
    CleanupTags,
    CreateTag,
    PublishRelease,
    Report,
}

impl Stage {
    pub const ALL: [Stage; 11] = [
        Stage::Preflight,
        Stage::ResolveSource,
        Stage::ReadVersion,
        Stage::ComputeVersion,
        Stage::Preview,
        Stage::RewriteFile,
        Stage::Commit,
        Stage::CleanupTags,
        Stage::CreateTag,
        Stage::PublishRelease,
        Stage::Report,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Preflight => "preflight",
            Stage::ResolveSource => "resolve-source",
            Stage::ReadVersion => "read-version",
            Stage::ComputeVersion => "compute-version",
            Stage::Preview => "preview",
            Stage::RewriteFile => "rewrite-file",
            Stage::Commit => "commit",
            Stage::CleanupTags => "cleanup-tags",
            Stage::CreateTag => "create-tag",
            Stage::PublishRelease => "publish-release",
            Stage::Report => "report",
        }
    }

    /// Whether the stage runs at all for `options`.
    ///
    /// A dry run stops at [Stage::Preview]; the later stages only appear in
    /// the printed plan.
    pub fn applies(&self, options: &ReleaseOptions) -> bool {
        if options.dry_run && *self > Stage::Preview {
            return false;
        }
        match self {
            Stage::Preflight => !options.force,
            Stage::Preview => options.dry_run,
            Stage::RewriteFile => !options.kind.is_republish(),
            Stage::Commit => options.commits(),
            Stage::PublishRelease => options.pushes(),
            _ => true,
        }
    }

    pub fn policy(&self) -> FailurePolicy {
        match self {
            Stage::CleanupTags | Stage::PublishRelease => FailurePolicy::Warn,
            _ => FailurePolicy::Fatal,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
