use std::cell::RefCell;
use std::io;
use std::time::Duration;

use super::{CommandResult, CommandRunner, Invocation};
use crate::error::{BumprError, Result};

/// Scripted outcome for matching invocations
#[derive(Debug, Clone)]
enum Response {
    Exit {
        code: i32,
        stdout: String,
        stderr: String,
    },
    NotInstalled,
}

#[derive(Debug, Clone)]
struct Rule {
    program: String,
    prefix: Vec<String>,
    response: Response,
}

impl Rule {
    fn matches(&self, invocation: &Invocation) -> bool {
        let prefix: Vec<&str> = self.prefix.iter().map(String::as_str).collect();
        self.program == invocation.program && invocation.starts_with(&prefix)
    }
}

/// Command runner for tests without spawning processes
///
/// Every invocation is recorded. Unless a rule says otherwise a command
/// succeeds with empty output; the most recently added matching rule wins.
#[derive(Debug, Default)]
pub struct MockRunner {
    rules: Vec<Rule>,
    calls: RefCell<Vec<Invocation>>,
}

impl MockRunner {
    /// Create a runner where every command succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands starting with `program prefix...` exit 0 printing `stdout`
    pub fn respond(self, program: &str, prefix: &[&str], stdout: &str) -> Self {
        self.rule(
            program,
            prefix,
            Response::Exit {
                code: 0,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        )
    }

    /// Commands starting with `program prefix...` exit 1
    pub fn fail(self, program: &str, prefix: &[&str]) -> Self {
        let stderr = format!("mock: {} {} failed", program, prefix.join(" "));
        self.rule(
            program,
            prefix,
            Response::Exit {
                code: 1,
                stdout: String::new(),
                stderr,
            },
        )
    }

    /// `program` cannot be started at all
    pub fn not_installed(self, program: &str) -> Self {
        self.rule(program, &[], Response::NotInstalled)
    }

    fn rule(mut self, program: &str, prefix: &[&str], response: Response) -> Self {
        self.rules.push(Rule {
            program: program.to_string(),
            prefix: prefix.iter().map(|s| s.to_string()).collect(),
            response,
        });
        self
    }

    /// Every invocation made so far, in order
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    /// Recorded invocations rendered as command lines
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|c| c.to_string()).collect()
    }

    /// Whether any recorded invocation of `program` starts with `prefix`
    pub fn called(&self, program: &str, prefix: &[&str]) -> bool {
        self.calls
            .borrow()
            .iter()
            .any(|c| c.program == program && c.starts_with(prefix))
    }

    fn respond_to(&self, invocation: &Invocation) -> Result<CommandResult> {
        self.calls.borrow_mut().push(invocation.clone());

        let response = self
            .rules
            .iter()
            .rev()
            .find(|rule| rule.matches(invocation))
            .map(|rule| rule.response.clone())
            .unwrap_or(Response::Exit {
                code: 0,
                stdout: String::new(),
                stderr: String::new(),
            });

        match response {
            Response::Exit {
                code,
                stdout,
                stderr,
            } => Ok(CommandResult {
                exit_code: code,
                stdout,
                stderr,
                duration: Duration::ZERO,
            }),
            Response::NotInstalled => Err(BumprError::CommandSpawn {
                program: invocation.program.clone(),
                source: io::Error::new(io::ErrorKind::NotFound, "program not found"),
            }),
        }
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        self.respond_to(invocation).map(|mut result| {
            result.stdout.clear();
            result
        })
    }

    fn run_capturing(&self, invocation: &Invocation) -> Result<CommandResult> {
        self.respond_to(invocation)
    }
}
