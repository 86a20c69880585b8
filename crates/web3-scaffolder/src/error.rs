//! Error taxonomy for option resolution and project generation

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors produced while resolving options or applying generation steps
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Missing or malformed user input
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The user cancelled an interactive prompt
    #[error("Setup cancelled.")]
    Aborted,

    /// A filesystem operation failed
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An external command could not be spawned or exited unsuccessfully
    #[error("`{command}` {}{}", exit_description(*exit_code), stderr_suffix(stderr))]
    Process {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// A JSON manifest targeted by a merge could not be understood
    #[error("{} is not a valid manifest: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    /// Invalid environment configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A generation step failed; wraps the underlying error with its position in the plan
    #[error("Step {} of {total} ({step}) failed: {source}", index + 1)]
    Step {
        index: usize,
        total: usize,
        step: String,
        #[source]
        source: Box<ScaffoldError>,
    },
}

impl ScaffoldError {
    pub(crate) fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// True when the user cancelled, looking through step context
    pub fn is_aborted(&self) -> bool {
        match self {
            Self::Aborted => true,
            Self::Step { source, .. } => source.is_aborted(),
            _ => false,
        }
    }

    /// Index of the failed step, if the error came from plan execution
    pub fn step_index(&self) -> Option<usize> {
        match self {
            Self::Step { index, .. } => Some(*index),
            _ => None,
        }
    }
}

fn exit_description(exit_code: Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exited with code {}", code),
        None => "could not be run".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{}", trimmed)
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
