//! Dry-run preview
//!
//! The plan is built from the same command builders that execution uses, so
//! every printed command is exactly what a real run would issue.

use std::fmt;
use std::path::{Path, PathBuf};

use super::ReleaseOptions;
use crate::config::Config;
use crate::external::{CommandRunner, GitCommands, Invocation, ReleaseHost};

/// Shown in place of the branch name when it cannot be determined
pub const CURRENT_BRANCH_PLACEHOLDER: &str = "<current-branch>";

/// One step a real run would perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannedStep {
    /// Rewrite the version source
    UpdateFile { file: PathBuf, version: String },
    /// Run an external command; `only_if_exists` marks cleanup that is
    /// skipped when there is nothing to remove
    Run {
        invocation: Invocation,
        only_if_exists: bool,
    },
}

impl PlannedStep {
    fn run(invocation: Invocation) -> Self {
        PlannedStep::Run {
            invocation,
            only_if_exists: false,
        }
    }

    fn run_if_exists(invocation: Invocation) -> Self {
        PlannedStep::Run {
            invocation,
            only_if_exists: true,
        }
    }

    pub fn invocation(&self) -> Option<&Invocation> {
        match self {
            PlannedStep::Run { invocation, .. } => Some(invocation),
            PlannedStep::UpdateFile { .. } => None,
        }
    }
}

impl fmt::Display for PlannedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannedStep::UpdateFile { file, version } => {
                let name = file
                    .file_name()
                    .map(|name| name.to_string_lossy())
                    .unwrap_or_else(|| file.to_string_lossy());
                write!(f, "Update {} with version {}", name, version)
            }
            PlannedStep::Run {
                invocation,
                only_if_exists,
            } => {
                write!(f, "{}", invocation)?;
                if *only_if_exists {
                    f.write_str(" (if exists)")?;
                }
                Ok(())
            }
        }
    }
}

/// What the release is about: the file, the target version and the branch
#[derive(Debug, Clone, Copy)]
pub struct PlanTarget<'a> {
    pub source_file: &'a Path,
    pub version: &'a str,
    pub branch: &'a str,
}

/// Steps a real run with `options` would perform after the version is computed
pub fn build<R: CommandRunner>(
    git: &GitCommands<'_, R>,
    host: &ReleaseHost<'_, R>,
    config: &Config,
    options: &ReleaseOptions,
    target: &PlanTarget<'_>,
) -> Vec<PlannedStep> {
    let tag = target.version;
    let republish = options.kind.is_republish();
    let host_available = options.pushes() && host.is_available();
    let mut steps = Vec::new();

    if republish {
        if host_available {
            steps.push(PlannedStep::run_if_exists(host.delete_release_cmd(tag)));
        }
    } else {
        steps.push(PlannedStep::UpdateFile {
            file: target.source_file.to_path_buf(),
            version: target.version.to_string(),
        });
    }

    if options.commits() {
        steps.push(PlannedStep::run(git.add_cmd(target.source_file)));
        steps.push(PlannedStep::run(
            git.commit_cmd(&config.commit_message(target.version)),
        ));
        if options.pushes() {
            steps.push(PlannedStep::run(git.push_branch_cmd(target.branch)));
        }
    }

    steps.push(PlannedStep::run_if_exists(git.delete_local_tag_cmd(tag)));
    if options.pushes() {
        steps.push(PlannedStep::run_if_exists(git.delete_remote_tag_cmd(tag)));
    }

    steps.push(PlannedStep::run(
        git.create_tag_cmd(tag, &config.tag_message(tag)),
    ));

    if options.pushes() {
        steps.push(PlannedStep::run(git.push_tag_cmd(tag, republish)));
        if host_available {
            steps.push(PlannedStep::run(host.create_release_cmd(
                tag,
                &config.release_title(tag),
                &config.release_notes(tag),
            )));
        }
    }

    steps
}
