//! Interactive front end using cliclack
//!
//! This module is optional and only available when the `tui` feature is enabled.

mod progress;
mod prompts;

pub use progress::SpinnerReporter;
pub use prompts::{run, CliclackPrompter, CreateArgs};
