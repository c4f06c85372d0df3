//! Release orchestration
//!
//! [Orchestrator] sequences a release through the [Stage] state machine:
//! pre-flight checks, source resolution, version read and compute, then
//! either the dry-run [plan] or the rewrite, commit, tag and publish steps.

pub mod options;
pub mod orchestrator;
pub mod plan;
pub mod report;
pub mod stage;
pub mod warning;

pub use options::ReleaseOptions;
pub use orchestrator::Orchestrator;
pub use plan::PlannedStep;
pub use report::ReleaseReport;
pub use stage::{FailurePolicy, Stage};
pub use warning::ReleaseWarning;
