//! Generation steps and plan validation

use crate::error::{Result, ScaffoldError};
use crate::process::CommandLine;
use serde_json::{Map, Value};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// One atomic filesystem or process action
///
/// Paths are produced by the template registry under the project
/// directory and checked by [`validate_plan`] before anything runs.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationStep {
    MakeDirectory {
        path: PathBuf,
        recursive: bool,
    },
    WriteFile {
        path: PathBuf,
        content: String,
    },
    RunCommand {
        command: CommandLine,
        working_dir: PathBuf,
    },
    /// Read-modify-write merge of `patch` into the object at `key`
    MergeJson {
        path: PathBuf,
        key: String,
        patch: Map<String, Value>,
    },
    /// Delete something an earlier step of the same plan created
    RemovePath {
        path: PathBuf,
    },
}

impl GenerationStep {
    /// Short name of the step kind
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationStep::MakeDirectory { .. } => "mkdir",
            GenerationStep::WriteFile { .. } => "write",
            GenerationStep::RunCommand { .. } => "run",
            GenerationStep::MergeJson { .. } => "merge",
            GenerationStep::RemovePath { .. } => "remove",
        }
    }

    /// The path this step creates, changes, removes, or runs in
    pub fn path(&self) -> &Path {
        match self {
            GenerationStep::MakeDirectory { path, .. }
            | GenerationStep::WriteFile { path, .. }
            | GenerationStep::MergeJson { path, .. }
            | GenerationStep::RemovePath { path } => path,
            GenerationStep::RunCommand { working_dir, .. } => working_dir,
        }
    }

    /// Human-readable summary with paths shown relative to `root`
    pub fn describe(&self, root: &Path) -> String {
        let rel = |p: &Path| -> String {
            match p.strip_prefix(root) {
                Ok(r) if r.as_os_str().is_empty() => ".".to_string(),
                Ok(r) => r.display().to_string(),
                Err(_) => p.display().to_string(),
            }
        };
        match self {
            GenerationStep::MakeDirectory { path, .. } => format!("create {}/", rel(path)),
            GenerationStep::WriteFile { path, .. } => format!("write {}", rel(path)),
            GenerationStep::RunCommand {
                command,
                working_dir,
            } => format!("run `{}` in {}", command, rel(working_dir)),
            GenerationStep::MergeJson { path, key, .. } => {
                format!("merge `{}` into {}", key, rel(path))
            }
            GenerationStep::RemovePath { path } => format!("remove {}", rel(path)),
        }
    }
}

impl fmt::Display for GenerationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe(Path::new("")))
    }
}

/// True when `path` is `root` or below it, with no `..` anywhere
pub fn is_contained(path: &Path, root: &Path) -> bool {
    !path.components().any(|c| matches!(c, Component::ParentDir)) && path.starts_with(root)
}

/// Check the guarantees a plan must hold before it is executed
///
/// - every step works inside `root`
/// - a removal only targets something below a directory the plan itself
///   created earlier
pub fn validate_plan(steps: &[GenerationStep], root: &Path) -> Result<()> {
    if root.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ScaffoldError::Validation(format!(
            "project directory {} must not contain '..'",
            root.display()
        )));
    }

    let mut created: Vec<&Path> = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        let path = step.path();
        if !is_contained(path, root) {
            return Err(ScaffoldError::Validation(format!(
                "step {} ({}) targets {} outside {}",
                index + 1,
                step.kind(),
                path.display(),
                root.display()
            )));
        }
        match step {
            GenerationStep::MakeDirectory { path, .. } => created.push(path),
            GenerationStep::RemovePath { path } => {
                let owned = created.iter().any(|dir| path.starts_with(dir) && path.as_path() != *dir);
                if !owned {
                    return Err(ScaffoldError::Validation(format!(
                        "step {} removes {} which this run did not create",
                        index + 1,
                        path.display()
                    )));
                }
            }
            _ => {}
        }
    }
    Ok(())
}
