use std::path::Path;

use super::{CommandRunner, Invocation};
use crate::error::Result;

/// Source-control commands issued through the `git` executable
///
/// The `*_cmd` builders return the exact invocation; the other methods run it.
pub struct GitCommands<'r, R: CommandRunner> {
    runner: &'r R,
    program: String,
    remote: String,
}

impl<'r, R: CommandRunner> GitCommands<'r, R> {
    pub fn new(runner: &'r R, program: impl Into<String>, remote: impl Into<String>) -> Self {
        GitCommands {
            runner,
            program: program.into(),
            remote: remote.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    fn cmd<const N: usize>(&self, args: [&str; N]) -> Invocation {
        Invocation::new(self.program.as_str(), args)
    }

    pub fn version_cmd(&self) -> Invocation {
        self.cmd(["--version"])
    }

    pub fn repository_cmd(&self) -> Invocation {
        self.cmd(["rev-parse", "--git-dir"])
    }

    pub fn status_cmd(&self) -> Invocation {
        self.cmd(["status", "--porcelain"])
    }

    pub fn add_cmd(&self, file: &Path) -> Invocation {
        let file = file.to_string_lossy();
        self.cmd(["add", file.as_ref()])
    }

    pub fn commit_cmd(&self, message: &str) -> Invocation {
        self.cmd(["commit", "-m", message])
    }

    pub fn current_branch_cmd(&self) -> Invocation {
        self.cmd(["rev-parse", "--abbrev-ref", "HEAD"])
    }

    pub fn push_branch_cmd(&self, branch: &str) -> Invocation {
        self.cmd(["push", self.remote.as_str(), branch])
    }

    pub fn tag_exists_cmd(&self, tag: &str) -> Invocation {
        self.cmd(["rev-parse", tag])
    }

    pub fn delete_local_tag_cmd(&self, tag: &str) -> Invocation {
        self.cmd(["tag", "-d", tag])
    }

    pub fn delete_remote_tag_cmd(&self, tag: &str) -> Invocation {
        self.cmd(["push", self.remote.as_str(), "--delete", tag])
    }

    pub fn create_tag_cmd(&self, tag: &str, message: &str) -> Invocation {
        self.cmd(["tag", "-a", tag, "-m", message])
    }

    /// `--force` is appended when the tag was just recreated
    pub fn push_tag_cmd(&self, tag: &str, force: bool) -> Invocation {
        if force {
            self.cmd(["push", self.remote.as_str(), tag, "--force"])
        } else {
            self.cmd(["push", self.remote.as_str(), tag])
        }
    }

    /// Whether the git executable can be started
    pub fn is_available(&self) -> bool {
        self.runner.succeeds(&self.version_cmd())
    }

    /// Whether the working directory is inside a repository
    pub fn is_repository(&self) -> bool {
        self.runner.succeeds(&self.repository_cmd())
    }

    /// Porcelain status output; empty when the working tree is clean
    pub fn status(&self) -> Result<String> {
        let result = self.runner.run_capturing_checked(&self.status_cmd())?;
        Ok(result.stdout)
    }

    pub fn add(&self, file: &Path) -> Result<()> {
        self.runner.run_checked(&self.add_cmd(file))?;
        Ok(())
    }

    pub fn commit(&self, message: &str) -> Result<()> {
        self.runner.run_checked(&self.commit_cmd(message))?;
        Ok(())
    }

    pub fn current_branch(&self) -> Result<String> {
        let result = self
            .runner
            .run_capturing_checked(&self.current_branch_cmd())?;
        Ok(result.stdout.trim().to_string())
    }

    pub fn push_branch(&self, branch: &str) -> Result<()> {
        self.runner.run_checked(&self.push_branch_cmd(branch))?;
        Ok(())
    }

    pub fn tag_exists(&self, tag: &str) -> bool {
        self.runner.succeeds(&self.tag_exists_cmd(tag))
    }

    pub fn delete_local_tag(&self, tag: &str) -> Result<()> {
        self.runner.run_checked(&self.delete_local_tag_cmd(tag))?;
        Ok(())
    }

    pub fn delete_remote_tag(&self, tag: &str) -> Result<()> {
        self.runner.run_checked(&self.delete_remote_tag_cmd(tag))?;
        Ok(())
    }

    pub fn create_tag(&self, tag: &str, message: &str) -> Result<()> {
        self.runner
            .run_checked(&self.create_tag_cmd(tag, message))?;
        Ok(())
    }

    pub fn push_tag(&self, tag: &str, force: bool) -> Result<()> {
        self.runner.run_checked(&self.push_tag_cmd(tag, force))?;
        Ok(())
    }
}
