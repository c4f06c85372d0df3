use std::path::{Path, PathBuf};

use super::plan::{self, PlanTarget, PlannedStep, CURRENT_BRANCH_PLACEHOLDER};
use super::{FailurePolicy, ReleaseOptions, ReleaseReport, ReleaseWarning, Stage};
use crate::config::Config;
use crate::domain::{BumpKind, Version};
use crate::error::{BumprError, Result};
use crate::external::{CommandRunner, DependencyChecker, GitCommands, ReleaseHost};
use crate::sources::detector::absolute;
use crate::sources::{Detector, VersionSource};
use crate::ui::Reporter;

/// Drives one release from pre-flight checks to the success report.
///
/// Stages run in the fixed order of [Stage::ALL]. A failing [FailurePolicy::Fatal]
/// stage aborts the run; [FailurePolicy::Warn] stages record a
/// [ReleaseWarning] and the run continues. Nothing is rolled back.
pub struct Orchestrator<'r, R: CommandRunner> {
    git: GitCommands<'r, R>,
    host: ReleaseHost<'r, R>,
    detector: Detector,
    config: Config,
    reporter: Reporter,
    project_dir: PathBuf,
}

impl<'r, R: CommandRunner> Orchestrator<'r, R> {
    pub fn new(
        runner: &'r R,
        config: Config,
        reporter: Reporter,
        project_dir: impl Into<PathBuf>,
    ) -> Self {
        Orchestrator {
            git: GitCommands::new(runner, config.git_program.clone(), config.remote.clone()),
            host: ReleaseHost::new(runner, config.release_program.clone()),
            detector: Detector::new(),
            config,
            reporter,
            project_dir: project_dir.into(),
        }
    }

    pub fn execute(&self, options: &ReleaseOptions) -> Result<ReleaseReport> {
        options.validate()?;
        tracing::debug!(kind = %options.kind, dry_run = options.dry_run, "starting release");
        self.reporter.status("🚀 Starting release process...\n");

        if self.enter(Stage::Preflight, options) {
            self.reporter.status("🔍 Running pre-flight checks...");
            DependencyChecker::new(&self.git).run_preflight_checks(!options.skip_commit)?;
            self.reporter.success("Pre-flight checks passed\n");
        }

        self.enter(Stage::ResolveSource, options);
        let (source, source_file) = self.resolve_source(options)?;
        self.reporter
            .status(&format!("📄 Using version source: {}", source_file.display()));

        self.enter(Stage::ReadVersion, options);
        let previous = source.read(&source_file)?;

        self.enter(Stage::ComputeVersion, options);
        let version = compute_version(&previous, options.kind, &source_file)?;
        if options.kind.is_republish() {
            self.reporter
                .status(&format!("🔄 Republishing version: {}\n", version));
        } else {
            self.reporter
                .status(&format!("📊 Current version: {}", previous));
            self.reporter.status(&format!("📈 New version: {}\n", version));
        }

        let mut report = ReleaseReport {
            previous,
            version,
            kind: options.kind,
            source,
            source_file,
            committed: false,
            pushed: false,
            release_created: false,
            dry_run: options.dry_run,
            warnings: Vec::new(),
            completed: false,
            next_steps: Vec::new(),
        };

        if self.enter(Stage::Preview, options) {
            let steps = self.plan(options, &report.source_file, &report.version);
            self.reporter.plan(&steps);
            return Ok(report);
        }

        let tag = report.version.clone();

        if self.enter(Stage::RewriteFile, options) {
            report.source.write(&report.source_file, &tag)?;
            self.reporter.success(&format!(
                "Updated {} with new version",
                file_name(&report.source_file)
            ));
        }

        if self.enter(Stage::Commit, options) {
            self.commit(&report.source_file, &tag, options)?;
            report.committed = true;
        }

        self.enter(Stage::CleanupTags, options);
        for warning in self.cleanup_tags(&tag, options) {
            self.warn(&mut report, Stage::CleanupTags, warning);
        }

        self.enter(Stage::CreateTag, options);
        self.git.create_tag(&tag, &self.config.tag_message(&tag))?;
        self.reporter.status(&format!("🏷️  Created tag: {}", tag));
        if options.pushes() {
            let force = options.kind.is_republish();
            self.git.push_tag(&tag, force)?;
            report.pushed = true;
            let suffix = if force { " (forced)" } else { "" };
            self.reporter
                .status(&format!("📤 Pushed tag: {}{}", tag, suffix));
        }

        if self.enter(Stage::PublishRelease, options) {
            if self.host.is_available() {
                match self.host.create_release(
                    &tag,
                    &self.config.release_title(&tag),
                    &self.config.release_notes(&tag),
                ) {
                    Ok(()) => {
                        report.release_created = true;
                        self.reporter
                            .status(&format!("🎉 Created release for {}", tag));
                    }
                    Err(e) => {
                        let warning = ReleaseWarning::release_creation(&tag, &e);
                        self.warn(&mut report, Stage::PublishRelease, warning);
                    }
                }
            } else {
                self.reporter.info(&format!(
                    "{} not found. Skipping release creation.",
                    self.host.program()
                ));
            }
        }

        self.enter(Stage::Report, options);
        report.next_steps = self.next_steps(&report, options);
        report.completed = true;
        self.reporter.status("");
        self.reporter
            .success(&format!("Successfully released {}\n", tag));
        if report.next_steps.is_empty() {
            self.reporter.status("The release process is complete!");
        } else {
            self.reporter.next_steps(&report.next_steps);
        }

        tracing::info!(
            version = %report.version,
            warnings = report.warnings.len(),
            "release finished"
        );
        Ok(report)
    }

    /// Log the transition and report whether `stage` runs for `options`
    fn enter(&self, stage: Stage, options: &ReleaseOptions) -> bool {
        let applies = stage.applies(options);
        tracing::debug!(stage = %stage, applies, "stage");
        applies
    }

    fn warn(&self, report: &mut ReleaseReport, stage: Stage, warning: ReleaseWarning) {
        debug_assert_eq!(stage.policy(), FailurePolicy::Warn);
        self.reporter.warning(&warning);
        report.warnings.push(warning);
    }

    fn resolve_source(&self, options: &ReleaseOptions) -> Result<(VersionSource, PathBuf)> {
        match &options.source {
            Some(path) => {
                let path = absolute(&self.project_dir.join(path))?;
                let source = self.detector.resolve_by_path(&path)?;
                Ok((source, path))
            }
            None => self.detector.detect_source(&self.project_dir),
        }
    }

    /// Branch name for display, without failing the run
    fn branch_or_placeholder(&self) -> String {
        self.git
            .current_branch()
            .ok()
            .filter(|branch| !branch.is_empty())
            .unwrap_or_else(|| CURRENT_BRANCH_PLACEHOLDER.to_string())
    }

    fn plan(&self, options: &ReleaseOptions, source_file: &Path, version: &str) -> Vec<PlannedStep> {
        let branch = if options.commits() && options.pushes() {
            self.branch_or_placeholder()
        } else {
            CURRENT_BRANCH_PLACEHOLDER.to_string()
        };
        let target = PlanTarget {
            source_file,
            version,
            branch: &branch,
        };
        plan::build(&self.git, &self.host, &self.config, options, &target)
    }

    fn commit(&self, source_file: &Path, version: &str, options: &ReleaseOptions) -> Result<()> {
        self.git.add(source_file)?;
        let message = self.config.commit_message(version);
        self.git.commit(&message)?;
        self.reporter.status(&format!("💾 Committed: {}", message));

        if options.pushes() {
            let branch = self.git.current_branch()?;
            self.git.push_branch(&branch)?;
            self.reporter.status(&format!(
                "📤 Pushed commit to {}/{}",
                self.git.remote(),
                branch
            ));
        }
        Ok(())
    }

    /// Remove a previous tag (and, for republish, release) with this version.
    ///
    /// Failures are returned as warnings. A failure to delete something that
    /// did not exist is expected and only logged.
    fn cleanup_tags(&self, tag: &str, options: &ReleaseOptions) -> Vec<ReleaseWarning> {
        let mut warnings = Vec::new();
        let republish = options.kind.is_republish();

        if republish && options.pushes() && self.host.is_available() {
            if self.host.release_exists(tag) {
                match self.host.delete_release(tag) {
                    Ok(()) => self
                        .reporter
                        .status(&format!("🗑️  Deleted release {}", tag)),
                    Err(e) => warnings.push(ReleaseWarning::release_deletion(tag, &e)),
                }
            } else {
                tracing::debug!(tag, "no existing release to delete");
            }
        }

        let exists = self.git.tag_exists(tag);
        if exists {
            self.reporter
                .detail(&format!("🧹 Cleaning up existing tag {}...", tag));
            if let Err(e) = self.git.delete_local_tag(tag) {
                warnings.push(ReleaseWarning::local_tag_cleanup(tag, &e));
            }
        }

        // The remote may still hold a tag that was deleted locally, so republish
        // always tries.
        if options.pushes() && (exists || republish) {
            if let Err(e) = self.git.delete_remote_tag(tag) {
                if exists {
                    warnings.push(ReleaseWarning::remote_tag_cleanup(
                        tag,
                        self.git.remote(),
                        &e,
                    ));
                } else {
                    tracing::debug!(tag, error = %e, "remote tag was not present");
                }
            }
        }

        warnings
    }

    fn next_steps(&self, report: &ReleaseReport, options: &ReleaseOptions) -> Vec<String> {
        let mut steps = Vec::new();
        let tag = report.version.as_str();

        if !report.committed && !options.kind.is_republish() {
            steps.push(format!(
                "Commit the version change when ready: {} && {}",
                self.git.add_cmd(&report.source_file),
                self.git.commit_cmd(&self.config.commit_message(tag))
            ));
        }

        if !options.pushes() {
            if report.committed {
                let branch = self.branch_or_placeholder();
                steps.push(format!(
                    "Push the commit when ready: {}",
                    self.git.push_branch_cmd(&branch)
                ));
            }
            steps.push(format!(
                "Push the tag when ready: {}",
                self.git.push_tag_cmd(tag, options.kind.is_republish())
            ));
            steps.push(format!(
                "Create a release manually or run: {} release create {}",
                self.host.program(),
                tag
            ));
        }

        steps
    }
}

/// Target version for `kind`, given the raw text read from the source
fn compute_version(current: &str, kind: BumpKind, source_file: &Path) -> Result<String> {
    match kind {
        BumpKind::Republish => {
            if current.trim().is_empty() {
                return Err(BumprError::parse(source_file, "version is empty"));
            }
            Ok(current.to_string())
        }
        _ => Ok(Version::parse(current)?.bump(kind)?.to_string()),
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
