//! External command execution
//!
//! Commands are held as a program plus argument vector and never passed
//! through a shell, so project names cannot inject extra commands.

use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// A program and its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) || arg.contains('*') {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Turn a non-zero exit into a [`ScaffoldError::Process`] carrying stderr
    pub fn into_result(self, command: &CommandLine) -> Result<ProcessOutput> {
        if self.success() {
            Ok(self)
        } else {
            Err(ScaffoldError::Process {
                command: command.to_string(),
                // Killed by a signal reports no code; keep it distinguishable from spawn failures
                exit_code: Some(self.exit_code.unwrap_or(-1)),
                stderr: self.stderr,
            })
        }
    }
}

/// Runs external commands to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command` in `working_dir` and wait for it.
    ///
    /// Only a failure to start the process is an error here; the exit code
    /// is reported in [`ProcessOutput`].
    async fn run(&self, command: &CommandLine, working_dir: &Path) -> Result<ProcessOutput>;
}

/// Runner backed by real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

/// Node tooling ships as `.cmd` shims on Windows, which `CreateProcess` won't resolve
pub(crate) fn platform_program(program: &str) -> String {
    if cfg!(windows) && matches!(program, "npm" | "npx" | "yarn" | "pnpm") {
        format!("{}.cmd", program)
    } else {
        program.to_string()
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &CommandLine, working_dir: &Path) -> Result<ProcessOutput> {
        log::debug!("Running `{}` in {}", command, working_dir.display());

        let output = TokioCommand::new(platform_program(&command.program))
            .args(&command.args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| ScaffoldError::Process {
                command: command.to_string(),
                exit_code: None,
                stderr: e.to_string(),
            })?;

        let result = ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        log::debug!("`{}` finished with {:?}", command, result.exit_code);
        Ok(result)
    }
}
