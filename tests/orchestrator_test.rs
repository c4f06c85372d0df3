// tests/orchestrator_test.rs
use std::fs;
use std::path::Path;

use bumpr::config::Config;
use bumpr::domain::BumpKind;
use bumpr::external::{GitCommands, Invocation, MockRunner, ReleaseHost};
use bumpr::release::plan::{self, PlanTarget};
use bumpr::release::{Orchestrator, ReleaseOptions, ReleaseWarning};
use bumpr::sources::VersionSource;
use bumpr::ui::Reporter;
use bumpr::BumprError;
use tempfile::TempDir;

const RELEASE_NOTES: &str = "\"## Release {v}\\n\\nAutomated release created by bumpr.\"";

fn project(file: &str, content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(file), content).unwrap();
    dir
}

fn orchestrator<'r>(mock: &'r MockRunner, dir: &Path) -> Orchestrator<'r, MockRunner> {
    Orchestrator::new(mock, Config::default(), Reporter::silent(), dir)
}

fn release_create_line(version: &str) -> String {
    format!(
        "gh release create {v} --title \"Release {v}\" --notes {notes}",
        v = version,
        notes = RELEASE_NOTES.replace("{v}", version)
    )
}

/// Commands that only read state; everything else changes something
fn is_readiness_check(inv: &Invocation) -> bool {
    inv.starts_with(&["--version"])
        || inv.starts_with(&["rev-parse"])
        || inv.starts_with(&["status"])
        || inv.starts_with(&["release", "view"])
}

#[test]
fn test_patch_release_of_plain_version_file() {
    let dir = project(".version", "1.4.2\n");
    let file = dir.path().join(".version");
    let mock = MockRunner::new()
        .respond("git", &["rev-parse", "--abbrev-ref", "HEAD"], "main\n")
        .fail("git", &["rev-parse", "1.4.3"]);

    let report = orchestrator(&mock, dir.path())
        .execute(&ReleaseOptions::new(BumpKind::Patch))
        .unwrap();

    assert_eq!(fs::read_to_string(&file).unwrap(), "1.4.3\n");
    assert_eq!(report.previous, "1.4.2");
    assert_eq!(report.version, "1.4.3");
    assert_eq!(report.source, VersionSource::VersionFile);
    assert!(report.completed && report.committed && report.pushed && report.release_created);
    assert!(report.warnings.is_empty());
    assert!(report.next_steps.is_empty());

    assert_eq!(
        mock.command_lines(),
        vec![
            "git --version".to_string(),
            "git rev-parse --git-dir".to_string(),
            "git status --porcelain".to_string(),
            format!("git add {}", file.display()),
            "git commit -m \"releasing 1.4.3\"".to_string(),
            "git rev-parse --abbrev-ref HEAD".to_string(),
            "git push origin main".to_string(),
            "git rev-parse 1.4.3".to_string(),
            "git tag -a 1.4.3 -m \"Release: 1.4.3\"".to_string(),
            "git push origin 1.4.3".to_string(),
            "gh --version".to_string(),
            release_create_line("1.4.3"),
        ]
    );
}

#[test]
fn test_major_release_without_push_or_commit_reencodes_package_json() {
    let dir = project("package.json", r#"{"name":"x","version":"0.9.0"}"#);
    let mock = MockRunner::new().fail("git", &["rev-parse", "1.0.0"]);
    let mut options = ReleaseOptions::new(BumpKind::Major);
    options.skip_push = true;
    options.skip_commit = true;
    options.force = true;

    let report = orchestrator(&mock, dir.path()).execute(&options).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("package.json")).unwrap(),
        "{\n  \"name\": \"x\",\n  \"version\": \"1.0.0\"\n}\n"
    );
    assert!(!report.committed && !report.pushed && !report.release_created);
    for prefix in [&["add"][..], &["commit"][..], &["push"][..]] {
        assert!(!mock.called("git", prefix), "unexpected git {:?}", prefix);
    }
    assert!(mock.calls().iter().all(|inv| inv.program == "git"));

    assert_eq!(report.next_steps.len(), 3);
    assert!(report.next_steps[0].starts_with("Commit the version change when ready: git add"));
    assert_eq!(report.next_steps[1], "Push the tag when ready: git push origin 1.0.0");
    assert_eq!(
        report.next_steps[2],
        "Create a release manually or run: gh release create 1.0.0"
    );
}

#[test]
fn test_republish_without_previous_tag_or_release() {
    let dir = project(".version", "2.1.0\n");
    let mock = MockRunner::new()
        .fail("gh", &["release", "view"])
        .fail("git", &["rev-parse", "2.1.0"])
        .fail("git", &["push", "origin", "--delete"]);
    let mut options = ReleaseOptions::new(BumpKind::Republish);
    options.force = true;

    let report = orchestrator(&mock, dir.path()).execute(&options).unwrap();

    assert_eq!(fs::read_to_string(dir.path().join(".version")).unwrap(), "2.1.0\n");
    assert_eq!(report.version, "2.1.0");
    assert!(report.warnings.is_empty());
    assert!(report.pushed && report.release_created);
    assert!(!report.committed);
    assert_eq!(
        mock.command_lines(),
        vec![
            "gh --version".to_string(),
            "gh release view 2.1.0".to_string(),
            "git rev-parse 2.1.0".to_string(),
            "git push origin --delete 2.1.0".to_string(),
            "git tag -a 2.1.0 -m \"Release: 2.1.0\"".to_string(),
            "git push origin 2.1.0 --force".to_string(),
            release_create_line("2.1.0"),
        ]
    );
}

#[test]
fn test_republish_replaces_existing_tag_and_release() {
    let dir = project(".version", "v0.3.0\n");
    let mock = MockRunner::new();
    let mut options = ReleaseOptions::new(BumpKind::Republish);
    options.force = true;

    let report = orchestrator(&mock, dir.path()).execute(&options).unwrap();

    assert!(report.warnings.is_empty());
    assert!(mock.called("gh", &["release", "delete", "v0.3.0", "--yes"]));
    assert!(mock.called("git", &["tag", "-d", "v0.3.0"]));
    assert!(mock.called("git", &["push", "origin", "--delete", "v0.3.0"]));
    assert!(mock.called("git", &["push", "origin", "v0.3.0", "--force"]));
}

#[test]
fn test_release_deletion_failure_is_a_warning() {
    let dir = project(".version", "1.0.0\n");
    let mock = MockRunner::new().fail("gh", &["release", "delete"]);
    let mut options = ReleaseOptions::new(BumpKind::Republish);
    options.force = true;

    let report = orchestrator(&mock, dir.path()).execute(&options).unwrap();

    assert!(report.completed);
    assert!(matches!(
        report.warnings.as_slice(),
        [ReleaseWarning::ReleaseDeletionFailed { tag, .. }] if tag == "1.0.0"
    ));
}

#[test]
fn test_dry_run_changes_nothing() {
    let content = "[project]\nname = \"demo\"\nversion = \"0.4.9\" # current\n";
    let dir = project("pyproject.toml", content);
    let mock = MockRunner::new().respond("git", &["rev-parse", "--abbrev-ref"], "main\n");
    let mut options = ReleaseOptions::new(BumpKind::Patch);
    options.dry_run = true;

    let report = orchestrator(&mock, dir.path()).execute(&options).unwrap();

    assert!(report.dry_run);
    assert!(!report.completed);
    assert_eq!(report.version, "0.4.10");
    assert_eq!(
        fs::read_to_string(dir.path().join("pyproject.toml")).unwrap(),
        content
    );
    let mutations: Vec<String> = mock
        .calls()
        .iter()
        .filter(|inv| !is_readiness_check(inv))
        .map(ToString::to_string)
        .collect();
    assert!(mutations.is_empty(), "dry run ran {:?}", mutations);
}

#[test]
fn test_dry_run_plan_matches_execution() {
    let dir = project("galaxy.yml", "namespace: acme\nversion: \"1.9.0\"\n");
    let mock = MockRunner::new().respond("git", &["rev-parse", "--abbrev-ref"], "main\n");
    let options = ReleaseOptions::new(BumpKind::Minor);

    let report = orchestrator(&mock, dir.path()).execute(&options).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("galaxy.yml")).unwrap(),
        "namespace: acme\nversion: \"1.10.0\"\n"
    );

    let plan_mock = MockRunner::new();
    let config = Config::default();
    let git = GitCommands::new(&plan_mock, &config.git_program, &config.remote);
    let host = ReleaseHost::new(&plan_mock, &config.release_program);
    let target = PlanTarget {
        source_file: &report.source_file,
        version: &report.version,
        branch: "main",
    };
    let planned: Vec<Invocation> = plan::build(&git, &host, &config, &options, &target)
        .iter()
        .filter_map(|step| step.invocation().cloned())
        .collect();
    let executed: Vec<Invocation> = mock
        .calls()
        .into_iter()
        .filter(|inv| !is_readiness_check(inv))
        .collect();

    assert_eq!(planned, executed);
}

#[test]
fn test_unrecognized_source_name_falls_back_to_plain_text() {
    let dir = project("VERSION.txt", "3.2.1\n");
    let mock = MockRunner::new().fail("git", &["rev-parse", "3.2.2"]);
    let mut options = ReleaseOptions::new(BumpKind::Patch);
    options.source = Some("VERSION.txt".into());
    options.force = true;
    options.skip_push = true;

    let report = orchestrator(&mock, dir.path()).execute(&options).unwrap();

    assert_eq!(report.source, VersionSource::VersionFile);
    assert!(report.source_file.is_absolute());
    assert_eq!(
        fs::read_to_string(dir.path().join("VERSION.txt")).unwrap(),
        "3.2.2\n"
    );
    assert!(mock.called("git", &["add"]));
    assert!(mock.called("git", &["commit", "-m", "releasing 3.2.2"]));
}

#[test]
fn test_missing_explicit_source_is_fatal() {
    let dir = TempDir::new().unwrap();
    let mock = MockRunner::new();
    let mut options = ReleaseOptions::new(BumpKind::Patch);
    options.source = Some("nope.txt".into());
    options.force = true;

    let err = orchestrator(&mock, dir.path()).execute(&options).unwrap_err();
    assert!(matches!(err, BumprError::FileMissing(_)));
    assert!(mock.calls().is_empty());
}

#[test]
fn test_no_source_lists_supported_files() {
    let dir = TempDir::new().unwrap();
    let mock = MockRunner::new();
    let mut options = ReleaseOptions::new(BumpKind::Patch);
    options.force = true;

    let err = orchestrator(&mock, dir.path()).execute(&options).unwrap_err();
    assert_eq!(
        err.to_string(),
        "no version source file found. Supported files: pyproject.toml, package.json, .version, galaxy.yml"
    );
}

#[test]
fn test_malformed_version_is_fatal() {
    let dir = project(".version", "1.4\n");
    let mock = MockRunner::new();
    let mut options = ReleaseOptions::new(BumpKind::Patch);
    options.force = true;

    let err = orchestrator(&mock, dir.path()).execute(&options).unwrap_err();
    assert_eq!(err.to_string(), "invalid version format: '1.4'");
    assert!(mock.calls().is_empty());
}

#[test]
fn test_dirty_tree_aborts_before_rewrite() {
    let dir = project(".version", "1.0.0\n");
    let mock = MockRunner::new().respond("git", &["status", "--porcelain"], "?? notes.txt\n");

    let err = orchestrator(&mock, dir.path())
        .execute(&ReleaseOptions::new(BumpKind::Minor))
        .unwrap_err();

    assert!(matches!(err, BumprError::Preflight(_)));
    assert_eq!(fs::read_to_string(dir.path().join(".version")).unwrap(), "1.0.0\n");
}

#[test]
fn test_dirty_tree_allowed_when_not_committing() {
    let dir = project(".version", "1.0.0\n");
    let mock = MockRunner::new().respond("git", &["status", "--porcelain"], "?? notes.txt\n");
    let mut options = ReleaseOptions::new(BumpKind::Minor);
    options.skip_commit = true;

    let report = orchestrator(&mock, dir.path()).execute(&options).unwrap();
    assert_eq!(report.version, "1.1.0");
    assert!(!mock.called("git", &["status"]));
}

#[test]
fn test_conflicting_flags_rejected_before_any_call() {
    let dir = project(".version", "1.0.0\n");
    let mock = MockRunner::new();
    let mut options = ReleaseOptions::new(BumpKind::Patch);
    options.quiet = true;
    options.verbose = true;

    let err = orchestrator(&mock, dir.path()).execute(&options).unwrap_err();
    assert!(matches!(err, BumprError::ConfigConflict(_)));
    assert!(mock.calls().is_empty());
}

#[test]
fn test_tag_push_failure_is_fatal_and_not_rolled_back() {
    let dir = project(".version", "1.4.2\n");
    let mock = MockRunner::new()
        .respond("git", &["rev-parse", "--abbrev-ref"], "main\n")
        .fail("git", &["push", "origin", "1.4.3"]);
    let mut options = ReleaseOptions::new(BumpKind::Patch);
    options.force = true;

    let err = orchestrator(&mock, dir.path()).execute(&options).unwrap_err();

    match err {
        BumprError::CommandFailure { command, .. } => {
            assert_eq!(command, "git push origin 1.4.3")
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(fs::read_to_string(dir.path().join(".version")).unwrap(), "1.4.3\n");
    assert!(!mock.called("gh", &["release", "create"]));
}

#[test]
fn test_tag_creation_failure_is_fatal() {
    let dir = project(".version", "1.4.2\n");
    let mock = MockRunner::new().fail("git", &["tag", "-a"]);
    let mut options = ReleaseOptions::new(BumpKind::Patch);
    options.force = true;
    options.skip_push = true;

    let err = orchestrator(&mock, dir.path()).execute(&options).unwrap_err();
    assert!(err.to_string().starts_with("command failed: git tag -a 1.4.3"));
}

#[test]
fn test_commit_failure_is_fatal() {
    let dir = project(".version", "1.4.2\n");
    let mock = MockRunner::new().fail("git", &["commit"]);
    let mut options = ReleaseOptions::new(BumpKind::Patch);
    options.force = true;

    let err = orchestrator(&mock, dir.path()).execute(&options).unwrap_err();
    assert!(matches!(err, BumprError::CommandFailure { .. }));
    assert!(!mock.called("git", &["tag"]));
}

#[test]
fn test_existing_tag_cleanup_failures_are_warnings() {
    let dir = project(".version", "1.4.2\n");
    let mock = MockRunner::new()
        .respond("git", &["rev-parse", "--abbrev-ref"], "main\n")
        .fail("git", &["tag", "-d"])
        .fail("git", &["push", "origin", "--delete"]);
    let mut options = ReleaseOptions::new(BumpKind::Patch);
    options.force = true;

    let report = orchestrator(&mock, dir.path()).execute(&options).unwrap();

    assert!(report.completed);
    assert_eq!(report.warnings.len(), 2);
    assert!(matches!(
        report.warnings[0],
        ReleaseWarning::LocalTagCleanupFailed { .. }
    ));
    assert!(matches!(
        report.warnings[1],
        ReleaseWarning::RemoteTagCleanupFailed { ref remote, .. } if remote == "origin"
    ));
    assert!(mock.called("git", &["tag", "-a", "1.4.3"]));
}

#[test]
fn test_release_creation_failure_is_a_warning() {
    let dir = project(".version", "1.4.2\n");
    let mock = MockRunner::new()
        .respond("git", &["rev-parse", "--abbrev-ref"], "main\n")
        .fail("gh", &["release", "create"]);
    let mut options = ReleaseOptions::new(BumpKind::Patch);
    options.force = true;

    let report = orchestrator(&mock, dir.path()).execute(&options).unwrap();

    assert!(report.completed && report.pushed);
    assert!(!report.release_created);
    assert!(matches!(
        report.warnings.as_slice(),
        [ReleaseWarning::ReleaseCreationFailed { .. }]
    ));
}

#[test]
fn test_missing_release_host_skips_release() {
    let dir = project(".version", "1.4.2\n");
    let mock = MockRunner::new()
        .respond("git", &["rev-parse", "--abbrev-ref"], "main\n")
        .not_installed("gh");
    let mut options = ReleaseOptions::new(BumpKind::Patch);
    options.force = true;

    let report = orchestrator(&mock, dir.path()).execute(&options).unwrap();

    assert!(report.completed && report.pushed);
    assert!(!report.release_created);
    assert!(report.warnings.is_empty());
    assert_eq!(mock.calls().iter().filter(|inv| inv.program == "gh").count(), 1);
}

#[test]
fn test_configured_remote_and_messages_are_used() {
    let dir = project(".version", "0.1.0\n");
    let mock = MockRunner::new()
        .respond("git", &["rev-parse", "--abbrev-ref"], "trunk\n")
        .fail("git", &["rev-parse", "0.2.0"]);
    let config = Config {
        remote: "upstream".to_string(),
        commit_message: "chore: release {version}".to_string(),
        ..Config::default()
    };
    let mut options = ReleaseOptions::new(BumpKind::Minor);
    options.force = true;

    Orchestrator::new(&mock, config, Reporter::silent(), dir.path())
        .execute(&options)
        .unwrap();

    assert!(mock.called("git", &["commit", "-m", "chore: release 0.2.0"]));
    assert!(mock.called("git", &["push", "upstream", "trunk"]));
    assert!(mock.called("git", &["push", "upstream", "0.2.0"]));
}
