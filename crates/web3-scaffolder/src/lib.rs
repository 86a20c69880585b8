//! Web3 Scaffolder - Core library behind `create-web3-template`
//!
//! Turns a handful of answers (project name, framework, package manager and
//! optional contract tooling) into a ready-to-install dapp project by
//! driving the ecosystem scaffolders and writing the wallet-connected
//! starter files on top.
//!
//! # Architecture
//!
//! - **Options** - [`options::resolve`] collects [`ProjectOptions`] from the
//!   command line and a [`Prompter`]
//! - **Registry** - [`TemplateRegistry`] maps options to an ordered list of
//!   [`GenerationStep`]s without doing any I/O
//! - **Execution** - [`Pipeline`] validates the plan and applies it step by
//!   step through an [`FsWriter`] and a [`CommandRunner`], stopping at the
//!   first failure
//! - **TUI** - optional cliclack front end (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts and progress output
//! - `blockchain-tooling`: Asks whether to add a Hardhat or Foundry package
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use web3_scaffolder::{Answers, DiskFs, Pipeline, SystemRunner, TemplateRegistry};
//! use web3_scaffolder::options::{Framework, PackageManager};
//!
//! let mut answers = Answers {
//!     framework: Some(Framework::NextJs),
//!     package_manager: Some(PackageManager::Pnpm),
//!     ..Answers::default()
//! };
//! let mut pipeline = Pipeline::new(TemplateRegistry::default(), DiskFs::new(), SystemRunner::new(), ".");
//! let report = pipeline.create_project(Some("my-dapp"), &mut answers, &mut ()).await?;
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod options;
pub mod pipeline;
pub mod process;
pub mod registry;
pub mod runtime;
pub mod steps;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::ScaffoldConfig;
pub use error::{Result, ScaffoldError};
pub use fs::{DiskFs, FileSystem, FsWriter, MemoryFs};
pub use options::{Answers, ProjectOptions, Prompter};
pub use pipeline::{Pipeline, PipelineState, Reporter, RunReport};
pub use process::{CommandLine, CommandRunner, ProcessOutput, SystemRunner};
pub use registry::TemplateRegistry;
pub use steps::GenerationStep;

#[cfg(feature = "tui")]
pub use tui::run;
