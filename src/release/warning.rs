use std::fmt;

use crate::error::BumprError;

/// Non-fatal problems hit during a release.
///
/// These never change the outcome of the run; they are collected in the
/// report and shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// An existing local tag could not be removed before recreating it
    LocalTagCleanupFailed { tag: String, reason: String },
    /// An existing remote tag could not be removed before recreating it
    RemoteTagCleanupFailed {
        tag: String,
        remote: String,
        reason: String,
    },
    /// The previous release could not be removed during republish
    ReleaseDeletionFailed { tag: String, reason: String },
    /// The tag is pushed but the hosted release was not created
    ReleaseCreationFailed { tag: String, reason: String },
}

impl ReleaseWarning {
    pub fn local_tag_cleanup(tag: &str, err: &BumprError) -> Self {
        ReleaseWarning::LocalTagCleanupFailed {
            tag: tag.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn remote_tag_cleanup(tag: &str, remote: &str, err: &BumprError) -> Self {
        ReleaseWarning::RemoteTagCleanupFailed {
            tag: tag.to_string(),
            remote: remote.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn release_deletion(tag: &str, err: &BumprError) -> Self {
        ReleaseWarning::ReleaseDeletionFailed {
            tag: tag.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn release_creation(tag: &str, err: &BumprError) -> Self {
        ReleaseWarning::ReleaseCreationFailed {
            tag: tag.to_string(),
            reason: err.to_string(),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            ReleaseWarning::LocalTagCleanupFailed { tag, .. }
            | ReleaseWarning::RemoteTagCleanupFailed { tag, .. }
            | ReleaseWarning::ReleaseDeletionFailed { tag, .. }
            | ReleaseWarning::ReleaseCreationFailed { tag, .. } => tag,
        }
    }
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::LocalTagCleanupFailed { tag, reason } => {
                write!(f, "failed to delete existing local tag '{}': {}", tag, reason)
            }
            ReleaseWarning::RemoteTagCleanupFailed {
                tag,
                remote,
                reason,
            } => {
                write!(
                    f,
                    "failed to delete existing tag '{}' on remote '{}': {}",
                    tag, remote, reason
                )
            }
            ReleaseWarning::ReleaseDeletionFailed { tag, reason } => {
                write!(f, "failed to delete existing release '{}': {}", tag, reason)
            }
            ReleaseWarning::ReleaseCreationFailed { tag, reason } => {
                write!(
                    f,
                    "failed to create release '{}': {}. The tag has been pushed, so tag-triggered automation will still run",
                    tag, reason
                )
            }
        }
    }
}
