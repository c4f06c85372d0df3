use super::{CommandRunner, GitCommands};
use crate::error::{BumprError, Result};

/// Environment checks run before anything is modified
pub struct DependencyChecker<'g, 'r, R: CommandRunner> {
    git: &'g GitCommands<'r, R>,
}

impl<'g, 'r, R: CommandRunner> DependencyChecker<'g, 'r, R> {
    pub fn new(git: &'g GitCommands<'r, R>) -> Self {
        DependencyChecker { git }
    }

    pub fn check_git(&self) -> Result<()> {
        if self.git.is_available() {
            Ok(())
        } else {
            Err(BumprError::preflight(format!(
                "{} is not available in PATH. Please install git",
                self.git.program()
            )))
        }
    }

    pub fn check_repository(&self) -> Result<()> {
        if self.git.is_repository() {
            Ok(())
        } else {
            Err(BumprError::preflight("not in a git repository"))
        }
    }

    pub fn check_working_directory(&self) -> Result<()> {
        let status = self
            .git
            .status()
            .map_err(|e| BumprError::preflight(format!("could not read working tree status: {}", e)))?;

        if status.trim().is_empty() {
            Ok(())
        } else {
            Err(BumprError::preflight(
                "working directory is not clean. Please commit or stash changes",
            ))
        }
    }

    /// Run all checks in order, stopping at the first failure.
    ///
    /// The clean-tree check is skipped when nothing will be committed.
    pub fn run_preflight_checks(&self, check_clean: bool) -> Result<()> {
        self.check_git()?;
        self.check_repository()?;
        if check_clean {
            self.check_working_directory()?;
        }
        Ok(())
    }
}
