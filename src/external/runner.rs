use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::Instant;

use super::{CommandResult, CommandRunner, Invocation};
use crate::error::{BumprError, Result};
use crate::ui;

/// Runs commands as real child processes
///
/// Every call blocks until the child exits; there is no timeout.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    verbose: bool,
    working_dir: Option<PathBuf>,
}

impl SystemRunner {
    /// Create a runner; in verbose mode every command is echoed and its
    /// stdout streamed to the terminal.
    pub fn new(verbose: bool) -> Self {
        SystemRunner {
            verbose,
            working_dir: None,
        }
    }

    /// Run every command from `dir` instead of the process working directory
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    fn execute(&self, invocation: &Invocation, capture_stdout: bool) -> Result<CommandResult> {
        if self.verbose {
            ui::display_command(invocation);
        }

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args).stdin(Stdio::null()).stderr(Stdio::piped());
        if capture_stdout {
            command.stdout(Stdio::piped());
        } else if self.verbose {
            command.stdout(Stdio::inherit());
        } else {
            command.stdout(Stdio::null());
        }
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let start = Instant::now();
        let output = command.output().map_err(|source| BumprError::CommandSpawn {
            program: invocation.program.clone(),
            source,
        })?;
        let duration = start.elapsed();

        let result = CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration,
        };

        tracing::debug!(
            command = %invocation,
            exit_code = result.exit_code,
            elapsed_ms = duration.as_millis() as u64,
            "command finished"
        );
        if self.verbose && !capture_stdout && !result.stderr.trim().is_empty() {
            ui::display_command_output(&result.stderr);
        }

        Ok(result)
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        self.execute(invocation, false)
    }

    fn run_capturing(&self, invocation: &Invocation) -> Result<CommandResult> {
        self.execute(invocation, true)
    }
}
