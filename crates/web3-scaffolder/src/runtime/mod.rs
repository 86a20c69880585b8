//! Preflight checks for the external tools a plan invokes
//!
//! This module provides:
//! - Tool detection by running `<tool> --version`
//! - Node.js version checking against the minimum create-next-app supports

pub mod check;

pub use check::{check_tool, preflight, required_tools, Preflight, ToolInfo, MIN_NODE_VERSION};
