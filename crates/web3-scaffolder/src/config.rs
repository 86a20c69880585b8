//! Product configuration
//!
//! Values are read once at start-up (defaults plus environment overrides)
//! and never change afterwards.

use crate::error::{Result, ScaffoldError};
use crate::options::{BlockchainTooling, PackageManager, ProjectOptions};
use std::path::Path;
use url::Url;

/// Environment variable overriding the Hardhat template repository
pub const HARDHAT_TEMPLATE_URL_ENV: &str = "CREATE_WEB3_HARDHAT_TEMPLATE_URL";

/// Environment variable pinning the create-next-app version
pub const NEXT_VERSION_ENV: &str = "CREATE_WEB3_NEXT_VERSION";

const DEFAULT_HARDHAT_TEMPLATE_URL: &str = "https://github.com/Consensys/hardhat-template.git";

/// Settings that shape the generated commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldConfig {
    /// Git URL cloned into `packages/blockchain` for Hardhat projects
    pub hardhat_template_url: Url,
    /// Version tag passed to `create-next-app@`
    pub next_app_version: String,
    /// Version tag passed to `create vite@`
    pub vite_version: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            hardhat_template_url: Url::parse(DEFAULT_HARDHAT_TEMPLATE_URL)
                .expect("default Hardhat template URL is valid"),
            next_app_version: "latest".to_string(),
            vite_version: "latest".to_string(),
        }
    }
}

impl ScaffoldConfig {
    /// Defaults with overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Defaults with overrides from `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url_str) = lookup(HARDHAT_TEMPLATE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.hardhat_template_url = Url::parse(url_str.trim()).map_err(|e| {
                ScaffoldError::Config(format!(
                    "{} is not a valid URL ({}): {}",
                    HARDHAT_TEMPLATE_URL_ENV, url_str, e
                ))
            })?;
            log::debug!("Hardhat template overridden: {}", config.hardhat_template_url);
        }

        if let Some(version) = lookup(NEXT_VERSION_ENV).filter(|v| !v.trim().is_empty()) {
            let version = version.trim();
            if version.contains(char::is_whitespace) {
                return Err(ScaffoldError::Config(format!(
                    "{} must be a single version tag, got '{}'",
                    NEXT_VERSION_ENV, version
                )));
            }
            config.next_app_version = version.to_string();
        }

        Ok(config)
    }
}

/// Commands to show once the project exists
pub fn next_steps(options: &ProjectOptions, dir: &Path) -> Vec<String> {
    let mut steps = Vec::new();
    let current = std::env::current_dir().ok();

    if current.as_deref() != Some(dir) {
        steps.push(format!("cd {}", dir.display()));
    }

    let pm = options.package_manager();
    steps.push(format!("{} install", pm.command()));

    let run_dev = match pm {
        PackageManager::Npm => "npm run dev".to_string(),
        other => format!("{} dev", other.command()),
    };
    match options.blockchain_tooling() {
        BlockchainTooling::None => steps.push(run_dev),
        BlockchainTooling::Hardhat | BlockchainTooling::Foundry => {
            steps.push(format!("cd packages/site && {}", run_dev));
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Framework;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = ScaffoldConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ScaffoldConfig::default());
        assert_eq!(config.next_app_version, "latest");
        assert_eq!(
            config.hardhat_template_url.as_str(),
            "https://github.com/Consensys/hardhat-template.git"
        );
    }

    #[test]
    fn test_environment_overrides() {
        let config = ScaffoldConfig::from_lookup(lookup(&[
            (HARDHAT_TEMPLATE_URL_ENV, "https://example.com/fork.git"),
            (NEXT_VERSION_ENV, "15.1.0"),
        ]))
        .unwrap();
        assert_eq!(config.hardhat_template_url.as_str(), "https://example.com/fork.git");
        assert_eq!(config.next_app_version, "15.1.0");
    }

    #[test]
    fn test_invalid_override_is_config_error() {
        let err = ScaffoldConfig::from_lookup(lookup(&[(HARDHAT_TEMPLATE_URL_ENV, "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Config(_)));

        let err = ScaffoldConfig::from_lookup(lookup(&[(NEXT_VERSION_ENV, "15 --evil")]))
            .unwrap_err();
        assert!(matches!(err, ScaffoldError::Config(_)));
    }

    #[test]
    fn test_next_steps_use_package_manager() {
        let options = ProjectOptions::new(
            "demo",
            Framework::NextJs,
            PackageManager::Pnpm,
            BlockchainTooling::None,
        )
        .unwrap();
        let steps = next_steps(&options, Path::new("/nonexistent/demo"));
        assert_eq!(
            steps,
            vec!["cd /nonexistent/demo", "pnpm install", "pnpm dev"]
        );
    }

    #[test]
    fn test_next_steps_for_monorepo_enter_site() {
        let options = ProjectOptions::new(
            "demo",
            Framework::React,
            PackageManager::Npm,
            BlockchainTooling::Hardhat,
        )
        .unwrap();
        let steps = next_steps(&options, Path::new("/nonexistent/demo"));
        assert_eq!(steps.last().unwrap(), "cd packages/site && npm run dev");
    }
}
