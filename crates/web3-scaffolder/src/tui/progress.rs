//! Spinner-based progress for plan execution

use crate::error::ScaffoldError;
use crate::pipeline::Reporter;
use crate::steps::GenerationStep;
use cliclack::ProgressBar;
use colored::Colorize;
use std::path::PathBuf;

enum Active {
    Command(ProgressBar),
    /// Consecutive filesystem steps share one spinner
    Files { spinner: ProgressBar, count: usize },
}

/// Shows a spinner per external command and one per run of file steps
pub struct SpinnerReporter {
    root: PathBuf,
    active: Option<Active>,
}

impl SpinnerReporter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            active: None,
        }
    }

    /// Close whatever spinner is still open; call after execution succeeds
    pub fn finish(&mut self) {
        if let Some(Active::Files { spinner, count }) = self.active.take() {
            spinner.stop(format!("Applied {} file changes", count));
        }
    }
}

impl Reporter for SpinnerReporter {
    fn step_started(&mut self, index: usize, total: usize, step: &GenerationStep) {
        let label = format!("[{}/{}] {}", index + 1, total, step.describe(&self.root));
        match step {
            GenerationStep::RunCommand { command, .. } => {
                self.finish();
                let spinner = cliclack::spinner();
                spinner.start(format!("Running {}", command.to_string().cyan()));
                self.active = Some(Active::Command(spinner));
            }
            _ => match &self.active {
                Some(Active::Files { spinner, .. }) => spinner.set_message(label),
                _ => {
                    let spinner = cliclack::spinner();
                    spinner.start(label);
                    self.active = Some(Active::Files { spinner, count: 0 });
                }
            },
        }
    }

    fn step_finished(&mut self, _index: usize, _total: usize, step: &GenerationStep) {
        match self.active.take() {
            Some(Active::Command(spinner)) => {
                if let GenerationStep::RunCommand { command, .. } = step {
                    spinner.stop(format!("Ran {}", command.to_string().cyan()));
                }
            }
            Some(Active::Files { spinner, count }) => {
                self.active = Some(Active::Files {
                    spinner,
                    count: count + 1,
                });
            }
            None => {}
        }
    }

    fn step_failed(&mut self, index: usize, total: usize, _error: &ScaffoldError) {
        let message = format!("Step {} of {} failed", index + 1, total).red().to_string();
        match self.active.take() {
            Some(Active::Command(spinner)) | Some(Active::Files { spinner, .. }) => {
                spinner.stop(message)
            }
            None => {}
        }
    }
}
