use std::cell::OnceCell;

use super::{CommandRunner, Invocation};
use crate::error::Result;

/// Release-hosting commands issued through the `gh` executable
///
/// The host is optional: when the program is missing, release steps are
/// skipped. Availability is checked once and cached for the run.
pub struct ReleaseHost<'r, R: CommandRunner> {
    runner: &'r R,
    program: String,
    available: OnceCell<bool>,
}

impl<'r, R: CommandRunner> ReleaseHost<'r, R> {
    pub fn new(runner: &'r R, program: impl Into<String>) -> Self {
        ReleaseHost {
            runner,
            program: program.into(),
            available: OnceCell::new(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn cmd<const N: usize>(&self, args: [&str; N]) -> Invocation {
        Invocation::new(self.program.as_str(), args)
    }

    pub fn version_cmd(&self) -> Invocation {
        self.cmd(["--version"])
    }

    pub fn create_release_cmd(&self, tag: &str, title: &str, notes: &str) -> Invocation {
        self.cmd(["release", "create", tag, "--title", title, "--notes", notes])
    }

    pub fn view_release_cmd(&self, tag: &str) -> Invocation {
        self.cmd(["release", "view", tag])
    }

    pub fn delete_release_cmd(&self, tag: &str) -> Invocation {
        self.cmd(["release", "delete", tag, "--yes"])
    }

    pub fn is_available(&self) -> bool {
        *self.available.get_or_init(|| {
            let available = self.runner.succeeds(&self.version_cmd());
            tracing::debug!(program = %self.program, available, "checked release host");
            available
        })
    }

    pub fn release_exists(&self, tag: &str) -> bool {
        self.runner
            .run_capturing(&self.view_release_cmd(tag))
            .is_ok_and(|result| result.success())
    }

    pub fn create_release(&self, tag: &str, title: &str, notes: &str) -> Result<()> {
        self.runner
            .run_checked(&self.create_release_cmd(tag, title, notes))?;
        Ok(())
    }

    pub fn delete_release(&self, tag: &str) -> Result<()> {
        self.runner.run_checked(&self.delete_release_cmd(tag))?;
        Ok(())
    }
}
