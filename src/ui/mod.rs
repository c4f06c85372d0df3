//! User interface module - progress reporting and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - [Reporter], which decides what is shown for `--quiet`
//!   and `--verbose`

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_command, display_command_output, display_error, display_info, display_next_steps,
    display_plan, display_status, display_success, display_warning,
};

use crate::release::{PlannedStep, ReleaseWarning};

/// Progress output for one release run
///
/// `quiet` hides everything except the dry-run plan and errors; `verbose`
/// adds detail lines. The two are never both set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reporter {
    quiet: bool,
    verbose: bool,
}

impl Reporter {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Reporter { quiet, verbose }
    }

    /// A reporter that prints nothing but the dry-run plan
    pub fn silent() -> Self {
        Reporter::new(true, false)
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn status(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Only shown with `--verbose`
    pub fn detail(&self, message: &str) {
        if self.verbose && !self.quiet {
            display_status(message);
        }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            display_success(message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            display_info(message);
        }
    }

    pub fn warning(&self, warning: &ReleaseWarning) {
        tracing::warn!(%warning, "release warning");
        if !self.quiet {
            display_warning(warning);
        }
    }

    /// The plan is the whole point of a dry run, so it is shown even when quiet
    pub fn plan(&self, steps: &[PlannedStep]) {
        display_plan(steps);
    }

    pub fn next_steps(&self, steps: &[String]) {
        if !self.quiet {
            display_next_steps(steps);
        }
    }
}
