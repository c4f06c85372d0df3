//! External command layer
//!
//! Everything bumpr does to a repository or release host goes through the
//! [CommandRunner] trait, which runs one [Invocation] and reports a
//! [CommandResult]. The concrete implementations are:
//!
//! - [runner::SystemRunner]: spawns real processes with `std::process`
//! - [mock::MockRunner]: records invocations and returns scripted results
//!
//! [git::GitCommands] and [release_host::ReleaseHost] build the exact argument
//! vectors on top of it. The same builders feed the dry-run preview, so the
//! preview always shows what execution would run.

pub mod checker;
pub mod git;
pub mod mock;
pub mod release_host;
pub mod runner;

pub use checker::DependencyChecker;
pub use git::GitCommands;
pub use mock::MockRunner;
pub use release_host::ReleaseHost;
pub use runner::SystemRunner;

use std::fmt;
use std::time::Duration;

use crate::error::{BumprError, Result};

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether the argument vector starts with `prefix`
    pub fn starts_with(&self, prefix: &[&str]) -> bool {
        prefix.len() <= self.args.len() && self.args.iter().zip(prefix).all(|(a, p)| a == p)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Quote an argument for display when it would not survive a shell as is
fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@+,%^~".contains(c));
    if plain {
        return arg.to_string();
    }
    let escaped = arg
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n");
    format!("\"{}\"", escaped)
}

/// Outcome of one external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Turn a non-zero exit into [BumprError::CommandFailure]
    pub fn check(self, invocation: &Invocation) -> Result<CommandResult> {
        if self.success() {
            Ok(self)
        } else {
            Err(BumprError::CommandFailure {
                command: invocation.to_string(),
                exit_code: self.exit_code,
                stderr: self.stderr,
            })
        }
    }
}

/// Runs external programs
///
/// An `Err` means the program could not be started at all; a program that
/// ran and failed is reported through [CommandResult::exit_code].
pub trait CommandRunner {
    /// Run a command; stdout is discarded (or streamed when verbose),
    /// stderr is captured.
    fn run(&self, invocation: &Invocation) -> Result<CommandResult>;

    /// Run a command capturing both stdout and stderr as text
    fn run_capturing(&self, invocation: &Invocation) -> Result<CommandResult>;

    /// Run and require a zero exit status
    fn run_checked(&self, invocation: &Invocation) -> Result<CommandResult> {
        self.run(invocation)?.check(invocation)
    }

    /// Run capturing output and require a zero exit status
    fn run_capturing_checked(&self, invocation: &Invocation) -> Result<CommandResult> {
        self.run_capturing(invocation)?.check(invocation)
    }

    /// True when the command could be started and exited with status 0
    fn succeeds(&self, invocation: &Invocation) -> bool {
        self.run(invocation).is_ok_and(|result| result.success())
    }
}
