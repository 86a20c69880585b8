//! Tool detection for Node.js, package managers, git and Foundry

use crate::options::{BlockchainTooling, Framework, ProjectOptions};
use crate::process::platform_program;
use semver::Version;
use std::process::Command;

/// Oldest Node.js release current create-next-app accepts
pub const MIN_NODE_VERSION: &str = "18.18.0";

/// Tool detection result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
    pub name: &'static str,
    pub program: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

impl ToolInfo {
    fn missing(name: &'static str, program: &'static str) -> Self {
        Self {
            name,
            program,
            version: None,
            available: false,
        }
    }
}

/// Check whether `program` runs, capturing the first line of `--version`
pub fn check_tool(name: &'static str, program: &'static str) -> ToolInfo {
    let output = Command::new(platform_program(program))
        .arg("--version")
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let stdout = String::from_utf8_lossy(&out.stdout);
            let version = stdout.lines().next().unwrap_or("").trim().to_string();
            ToolInfo {
                name,
                program,
                version: Some(version),
                available: true,
            }
        }
        _ => ToolInfo::missing(name, program),
    }
}

/// `(display name, program)` for every tool the plan for `options` runs
pub fn required_tools(options: &ProjectOptions) -> Vec<(&'static str, &'static str)> {
    let pm = options.package_manager().command();
    let mut tools = vec![("Node.js", "node"), (pm, pm)];

    match options.blockchain_tooling() {
        BlockchainTooling::None => {}
        BlockchainTooling::Hardhat => tools.push(("git", "git")),
        BlockchainTooling::Foundry => tools.push(("Foundry", "forge")),
    }
    // `npx create-next-app` and `npm init -w` need npm whatever the choice
    let needs_npm = options.framework() == Framework::NextJs
        || options.blockchain_tooling() != BlockchainTooling::None;
    if pm != "npm" && needs_npm {
        tools.push(("npm", "npm"));
    }

    tools
}

/// First whitespace-separated token that reads as a semantic version
pub fn parse_version(output: &str) -> Option<Version> {
    output.split_whitespace().find_map(|token| {
        let cleaned = token.strip_prefix('v').unwrap_or(token);
        Version::parse(cleaned).ok()
    })
}

/// Detected tools plus anything worth warning about
#[derive(Debug, Clone, Default)]
pub struct Preflight {
    pub tools: Vec<ToolInfo>,
    pub warnings: Vec<String>,
}

impl Preflight {
    /// Derive warnings from detection results
    pub fn from_tools(tools: Vec<ToolInfo>) -> Self {
        let mut warnings = Vec::new();

        for tool in &tools {
            if !tool.available {
                warnings.push(format!("{} (`{}`) was not found on PATH", tool.name, tool.program));
                continue;
            }
            if tool.program == "node" {
                if let Some(warning) = node_version_warning(tool.version.as_deref().unwrap_or("")) {
                    warnings.push(warning);
                }
            }
        }

        Self { tools, warnings }
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

fn node_version_warning(reported: &str) -> Option<String> {
    let minimum = Version::parse(MIN_NODE_VERSION).ok()?;
    match parse_version(reported) {
        Some(found) if found < minimum => Some(format!(
            "Node.js {} is older than the required {}",
            found, minimum
        )),
        Some(_) => None,
        None => Some(format!(
            "Could not read the Node.js version from '{}'",
            reported
        )),
    }
}

/// Detect every tool `options` needs; missing tools become warnings
pub fn preflight(options: &ProjectOptions) -> Preflight {
    let tools = required_tools(options)
        .into_iter()
        .map(|(name, program)| check_tool(name, program))
        .collect();
    let report = Preflight::from_tools(tools);
    for warning in &report.warnings {
        log::warn!("{}", warning);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::PackageManager;

    fn found(name: &'static str, program: &'static str, version: &str) -> ToolInfo {
        ToolInfo {
            name,
            program,
            version: Some(version.to_string()),
            available: true,
        }
    }

    #[test]
    fn test_parse_version_formats() {
        assert_eq!(parse_version("v20.11.1"), Some(Version::new(20, 11, 1)));
        assert_eq!(parse_version("10.2.4"), Some(Version::new(10, 2, 4)));
        assert_eq!(parse_version("git version 2.43.0"), Some(Version::new(2, 43, 0)));
        assert_eq!(parse_version("unknown"), None);
    }

    #[test]
    fn test_old_node_warns() {
        let report = Preflight::from_tools(vec![found("Node.js", "node", "v16.20.0")]);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("16.20.0"));

        let report = Preflight::from_tools(vec![found("Node.js", "node", "v18.18.0")]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_missing_tool_warns_without_failing() {
        let report = Preflight::from_tools(vec![
            found("Node.js", "node", "v22.0.0"),
            ToolInfo::missing("Foundry", "forge"),
        ]);
        assert_eq!(report.tools.len(), 2);
        assert_eq!(
            report.warnings,
            vec!["Foundry (`forge`) was not found on PATH".to_string()]
        );
    }

    #[test]
    fn test_required_tools_follow_options() {
        let standalone = ProjectOptions::new(
            "demo",
            Framework::NextJs,
            PackageManager::Pnpm,
            BlockchainTooling::None,
        )
        .unwrap();
        assert_eq!(
            required_tools(&standalone),
            vec![("Node.js", "node"), ("pnpm", "pnpm"), ("npm", "npm")]
        );

        let hardhat = ProjectOptions::new(
            "demo",
            Framework::React,
            PackageManager::Yarn,
            BlockchainTooling::Hardhat,
        )
        .unwrap();
        let programs: Vec<_> = required_tools(&hardhat).into_iter().map(|(_, p)| p).collect();
        assert_eq!(programs, vec!["node", "yarn", "git", "npm"]);
    }
}
