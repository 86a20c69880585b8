//! Pipeline orchestration
//!
//! Drives one run from option resolution to the last generation step:
//!
//! ```text
//! Idle -> ResolvingOptions -> Dispatching -> Executing(0) .. Executing(n-1) -> Succeeded
//!                 \               \               \
//!                  +---------------+---------------+-> Failed { step }
//! ```
//!
//! Steps run strictly one after another. The first failing step ends the
//! run; nothing it or earlier steps produced is rolled back.

use crate::error::{Result, ScaffoldError};
use crate::fs::{FileSystem, FsWriter};
use crate::options::{self, ProjectOptions, Prompter};
use crate::process::CommandRunner;
use crate::registry::TemplateRegistry;
use crate::steps::{validate_plan, GenerationStep};
use std::fmt;
use std::path::{Path, PathBuf};

/// Where a run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    ResolvingOptions,
    Dispatching,
    /// Running the step at this index
    Executing(usize),
    Succeeded,
    /// `step` is the index of the failed step, or `None` when the run
    /// failed before any step started
    Failed { step: Option<usize> },
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed { .. })
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::ResolvingOptions => write!(f, "resolving options"),
            PipelineState::Dispatching => write!(f, "dispatching"),
            PipelineState::Executing(index) => write!(f, "executing step {}", index + 1),
            PipelineState::Succeeded => write!(f, "succeeded"),
            PipelineState::Failed { step: Some(index) } => write!(f, "failed at step {}", index + 1),
            PipelineState::Failed { step: None } => write!(f, "failed"),
        }
    }
}

/// Progress notifications during execution
///
/// All methods default to doing nothing.
pub trait Reporter {
    fn step_started(&mut self, _index: usize, _total: usize, _step: &GenerationStep) {}

    fn step_finished(&mut self, _index: usize, _total: usize, _step: &GenerationStep) {}

    fn step_failed(&mut self, _index: usize, _total: usize, _error: &ScaffoldError) {}
}

impl Reporter for () {}

/// Outcome of a successful run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub options: ProjectOptions,
    pub project_dir: PathBuf,
    pub steps_run: usize,
}

/// Runs generation plans against a filesystem and a command runner
pub struct Pipeline<F, R> {
    registry: TemplateRegistry,
    writer: FsWriter<F>,
    runner: R,
    base_dir: PathBuf,
    state: PipelineState,
}

impl<F: FileSystem, R: CommandRunner> Pipeline<F, R> {
    /// Projects are created as `base_dir/<project name>`
    pub fn new(registry: TemplateRegistry, fs: F, runner: R, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            writer: FsWriter::new(fs),
            runner,
            base_dir: base_dir.into(),
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    pub fn writer(&self) -> &FsWriter<F> {
        &self.writer
    }

    /// Directory the project named in `options` is created in
    pub fn project_dir(&self, options: &ProjectOptions) -> PathBuf {
        self.base_dir.join(options.project_name())
    }

    /// Resolve options from the positional argument and `prompter`
    pub fn resolve<P: Prompter>(
        &mut self,
        raw_arg: Option<&str>,
        prompter: &mut P,
    ) -> Result<ProjectOptions> {
        self.state = PipelineState::ResolvingOptions;
        options::resolve(raw_arg, prompter).map_err(|e| self.fail(None, e))
    }

    /// The validated steps for `options`, without running any of them
    pub fn plan(&self, options: &ProjectOptions) -> Result<Vec<GenerationStep>> {
        let project_dir = self.project_dir(options);
        let steps = self.registry.steps_for(options, &project_dir);
        validate_plan(&steps, &project_dir)?;
        Ok(steps)
    }

    /// Resolve, dispatch and execute in one go
    pub async fn create_project<P: Prompter, Rep: Reporter + ?Sized>(
        &mut self,
        raw_arg: Option<&str>,
        prompter: &mut P,
        reporter: &mut Rep,
    ) -> Result<RunReport> {
        let options = self.resolve(raw_arg, prompter)?;

        self.state = PipelineState::Dispatching;
        let project_dir = self.project_dir(&options);
        let steps = self.plan(&options).map_err(|e| self.fail(None, e))?;
        log::info!(
            "Creating {} ({} steps) in {}",
            options.project_name(),
            steps.len(),
            project_dir.display()
        );

        self.execute(&steps, &project_dir, reporter).await?;

        Ok(RunReport {
            options,
            project_dir,
            steps_run: steps.len(),
        })
    }

    /// Run a pre-built plan rooted at `root`, stopping at the first failure
    pub async fn execute<Rep: Reporter + ?Sized>(
        &mut self,
        steps: &[GenerationStep],
        root: &Path,
        reporter: &mut Rep,
    ) -> Result<()> {
        validate_plan(steps, root).map_err(|e| self.fail(None, e))?;

        let total = steps.len();
        for (index, step) in steps.iter().enumerate() {
            self.state = PipelineState::Executing(index);
            log::debug!("[{}/{}] {}", index + 1, total, step.describe(root));
            reporter.step_started(index, total, step);

            if let Err(source) = self.apply(step).await {
                let error = ScaffoldError::Step {
                    index,
                    total,
                    step: step.describe(root),
                    source: Box::new(source),
                };
                reporter.step_failed(index, total, &error);
                return Err(self.fail(Some(index), error));
            }

            reporter.step_finished(index, total, step);
        }

        self.state = PipelineState::Succeeded;
        log::info!("All {} steps completed", total);
        Ok(())
    }

    async fn apply(&self, step: &GenerationStep) -> Result<()> {
        match step {
            GenerationStep::MakeDirectory { path, recursive } => {
                self.writer.make_directory(path, *recursive).await
            }
            GenerationStep::WriteFile { path, content } => {
                self.writer.write_file(path, content).await
            }
            GenerationStep::RunCommand {
                command,
                working_dir,
            } => {
                let output = self.runner.run(command, working_dir).await?;
                output.into_result(command).map(|_| ())
            }
            GenerationStep::MergeJson { path, key, patch } => {
                self.writer.merge_json(path, key, patch).await
            }
            GenerationStep::RemovePath { path } => self.writer.remove_path(path).await,
        }
    }

    fn fail(&mut self, step: Option<usize>, error: ScaffoldError) -> ScaffoldError {
        log::debug!("Pipeline failed in state {}: {}", self.state, error);
        self.state = PipelineState::Failed { step };
        error
    }
}
