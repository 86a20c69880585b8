//! Project options and their resolution from CLI input and prompts
//!
//! The resolver never talks to the terminal directly: it asks a [`Prompter`]
//! for anything the command line did not supply, so the same logic runs
//! against live prompts or pre-recorded [`Answers`].

use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the Hardhat/Foundry question is part of the interactive flow
pub const BLOCKCHAIN_TOOLING_PROMPT: bool = cfg!(feature = "blockchain-tooling");

/// Frontend framework for the generated site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    NextJs,
    React,
}

/// Package manager the generated project is set up for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
}

/// Smart contract toolchain placed next to the site in a monorepo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockchainTooling {
    #[default]
    None,
    Hardhat,
    Foundry,
}

/// One entry of a choice table: what the user sees and what it resolves to
#[derive(Debug, Clone, Copy)]
pub struct Choice<T: 'static> {
    pub name: &'static str,
    pub value: T,
}

/// Frameworks offered in the interactive flow
pub static FRAMEWORK_CHOICES: &[Choice<Framework>] = &[
    Choice {
        name: "Next.js",
        value: Framework::NextJs,
    },
    Choice {
        name: "React",
        value: Framework::React,
    },
];

pub static PACKAGE_MANAGER_CHOICES: &[Choice<PackageManager>] = &[
    Choice {
        name: "npm",
        value: PackageManager::Npm,
    },
    Choice {
        name: "Yarn",
        value: PackageManager::Yarn,
    },
    Choice {
        name: "pnpm",
        value: PackageManager::Pnpm,
    },
];

pub static BLOCKCHAIN_TOOLING_CHOICES: &[Choice<BlockchainTooling>] = &[
    Choice {
        name: "HardHat",
        value: BlockchainTooling::Hardhat,
    },
    Choice {
        name: "Foundry",
        value: BlockchainTooling::Foundry,
    },
    Choice {
        name: "None",
        value: BlockchainTooling::None,
    },
];

impl Framework {
    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::NextJs => "Next.js",
            Framework::React => "React",
        }
    }

    /// Parse a framework identifier as typed on the command line
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "nextjs" | "next" | "next.js" => Some(Framework::NextJs),
            "react" | "vite" => Some(Framework::React),
            _ => None,
        }
    }
}

impl PackageManager {
    /// Executable name
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Flag understood by create-next-app
    pub fn create_next_app_flag(&self) -> &'static str {
        match self {
            PackageManager::Npm => "--use-npm",
            PackageManager::Yarn => "--use-yarn",
            PackageManager::Pnpm => "--use-pnpm",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "npm" => Some(PackageManager::Npm),
            "yarn" => Some(PackageManager::Yarn),
            "pnpm" => Some(PackageManager::Pnpm),
            _ => None,
        }
    }
}

impl BlockchainTooling {
    pub fn display_name(&self) -> &'static str {
        match self {
            BlockchainTooling::None => "None",
            BlockchainTooling::Hardhat => "HardHat",
            BlockchainTooling::Foundry => "Foundry",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

impl fmt::Display for BlockchainTooling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resolved, validated choices for a single scaffolding run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectOptions {
    project_name: String,
    framework: Framework,
    package_manager: PackageManager,
    blockchain_tooling: BlockchainTooling,
}

impl ProjectOptions {
    /// Build options from already-known values, validating the project name
    pub fn new(
        project_name: &str,
        framework: Framework,
        package_manager: PackageManager,
        blockchain_tooling: BlockchainTooling,
    ) -> Result<Self> {
        Ok(Self {
            project_name: validate_project_name(project_name)?,
            framework,
            package_manager,
            blockchain_tooling,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn framework(&self) -> Framework {
        self.framework
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    pub fn blockchain_tooling(&self) -> BlockchainTooling {
        self.blockchain_tooling
    }
}

/// Source of answers for everything the command line did not provide
///
/// Implementations return [`ScaffoldError::Aborted`] when the user cancels.
pub trait Prompter {
    fn project_name(&mut self) -> Result<String>;

    fn framework(&mut self, choices: &[Choice<Framework>]) -> Result<Framework>;

    fn package_manager(&mut self, choices: &[Choice<PackageManager>]) -> Result<PackageManager>;

    fn blockchain_tooling(
        &mut self,
        choices: &[Choice<BlockchainTooling>],
    ) -> Result<BlockchainTooling>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn project_name(&mut self) -> Result<String> {
        (**self).project_name()
    }

    fn framework(&mut self, choices: &[Choice<Framework>]) -> Result<Framework> {
        (**self).framework(choices)
    }

    fn package_manager(&mut self, choices: &[Choice<PackageManager>]) -> Result<PackageManager> {
        (**self).package_manager(choices)
    }

    fn blockchain_tooling(
        &mut self,
        choices: &[Choice<BlockchainTooling>],
    ) -> Result<BlockchainTooling> {
        (**self).blockchain_tooling(choices)
    }
}

/// Pre-recorded answers; a missing answer is a validation error
#[derive(Debug, Clone, Default)]
pub struct Answers {
    pub project_name: Option<String>,
    pub framework: Option<Framework>,
    pub package_manager: Option<PackageManager>,
    pub blockchain_tooling: Option<BlockchainTooling>,
}

impl Answers {
    /// Use these answers first and ask `fallback` for the rest
    pub fn or_ask<P: Prompter>(self, fallback: P) -> Prefilled<P> {
        Prefilled {
            answers: self,
            fallback,
        }
    }
}

fn missing(what: &str) -> ScaffoldError {
    ScaffoldError::Validation(format!("no {} was provided", what))
}

impl Prompter for Answers {
    fn project_name(&mut self) -> Result<String> {
        self.project_name.clone().ok_or_else(|| missing("project name"))
    }

    fn framework(&mut self, _choices: &[Choice<Framework>]) -> Result<Framework> {
        self.framework.ok_or_else(|| missing("framework"))
    }

    fn package_manager(&mut self, _choices: &[Choice<PackageManager>]) -> Result<PackageManager> {
        self.package_manager.ok_or_else(|| missing("package manager"))
    }

    fn blockchain_tooling(
        &mut self,
        _choices: &[Choice<BlockchainTooling>],
    ) -> Result<BlockchainTooling> {
        Ok(self.blockchain_tooling.unwrap_or_default())
    }
}

/// Answers backed by a live prompter for the gaps
#[derive(Debug)]
pub struct Prefilled<P> {
    answers: Answers,
    fallback: P,
}

impl<P: Prompter> Prompter for Prefilled<P> {
    fn project_name(&mut self) -> Result<String> {
        match &self.answers.project_name {
            Some(name) => Ok(name.clone()),
            None => self.fallback.project_name(),
        }
    }

    fn framework(&mut self, choices: &[Choice<Framework>]) -> Result<Framework> {
        match self.answers.framework {
            Some(framework) => Ok(framework),
            None => self.fallback.framework(choices),
        }
    }

    fn package_manager(&mut self, choices: &[Choice<PackageManager>]) -> Result<PackageManager> {
        match self.answers.package_manager {
            Some(pm) => Ok(pm),
            None => self.fallback.package_manager(choices),
        }
    }

    fn blockchain_tooling(
        &mut self,
        choices: &[Choice<BlockchainTooling>],
    ) -> Result<BlockchainTooling> {
        match self.answers.blockchain_tooling {
            Some(tooling) => Ok(tooling),
            None => self.fallback.blockchain_tooling(choices),
        }
    }
}

/// Trim and check a project name; it becomes a single directory name
pub fn validate_project_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ScaffoldError::Validation(
            "Project name cannot be empty".to_string(),
        ));
    }
    if name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ScaffoldError::Validation(format!(
            "Project name '{}' must be a plain directory name",
            name
        )));
    }
    Ok(name.to_string())
}

/// Resolve options from the optional positional argument plus prompts
///
/// Questions are asked in a fixed order: project name (only when no
/// argument was given), framework, blockchain tooling (only when
/// [`BLOCKCHAIN_TOOLING_PROMPT`] is set), package manager.
pub fn resolve<P: Prompter>(raw_arg: Option<&str>, prompter: &mut P) -> Result<ProjectOptions> {
    resolve_with(raw_arg, prompter, BLOCKCHAIN_TOOLING_PROMPT)
}

pub(crate) fn resolve_with<P: Prompter>(
    raw_arg: Option<&str>,
    prompter: &mut P,
    ask_tooling: bool,
) -> Result<ProjectOptions> {
    let raw_name = match raw_arg {
        Some(arg) => arg.to_string(),
        None => prompter.project_name()?,
    };
    let project_name = validate_project_name(&raw_name)?;

    let framework = prompter.framework(FRAMEWORK_CHOICES)?;

    let blockchain_tooling = if ask_tooling {
        prompter.blockchain_tooling(BLOCKCHAIN_TOOLING_CHOICES)?
    } else {
        BlockchainTooling::None
    };

    let package_manager = prompter.package_manager(PACKAGE_MANAGER_CHOICES)?;

    log::debug!(
        "Resolved options: name={}, framework={}, package_manager={}, tooling={}",
        project_name,
        framework,
        package_manager,
        blockchain_tooling
    );

    Ok(ProjectOptions {
        project_name,
        framework,
        package_manager,
        blockchain_tooling,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> Answers {
        Answers {
            project_name: Some("prompted-app".to_string()),
            framework: Some(Framework::NextJs),
            package_manager: Some(PackageManager::Npm),
            blockchain_tooling: Some(BlockchainTooling::Hardhat),
        }
    }

    /// Prompter that cancels on a chosen question
    struct CancelOn(&'static str);

    impl Prompter for CancelOn {
        fn project_name(&mut self) -> Result<String> {
            if self.0 == "name" {
                return Err(ScaffoldError::Aborted);
            }
            Ok("app".to_string())
        }

        fn framework(&mut self, _: &[Choice<Framework>]) -> Result<Framework> {
            if self.0 == "framework" {
                return Err(ScaffoldError::Aborted);
            }
            Ok(Framework::React)
        }

        fn package_manager(&mut self, _: &[Choice<PackageManager>]) -> Result<PackageManager> {
            if self.0 == "pm" {
                return Err(ScaffoldError::Aborted);
            }
            Ok(PackageManager::Yarn)
        }

        fn blockchain_tooling(&mut self, _: &[Choice<BlockchainTooling>]) -> Result<BlockchainTooling> {
            Ok(BlockchainTooling::Foundry)
        }
    }

    #[test]
    fn test_argument_takes_precedence_over_prompt() {
        let options = resolve(Some("my-app"), &mut answers()).unwrap();
        assert_eq!(options.project_name(), "my-app");
        assert_eq!(options.framework(), Framework::NextJs);
        assert_eq!(options.package_manager(), PackageManager::Npm);
    }

    #[test]
    fn test_prompted_name_used_without_argument() {
        let options = resolve(None, &mut answers()).unwrap();
        assert_eq!(options.project_name(), "prompted-app");
    }

    #[test]
    fn test_blank_names_rejected() {
        for name in ["", "   ", "\t\n"] {
            let err = resolve(Some(name), &mut answers()).unwrap_err();
            assert!(matches!(err, ScaffoldError::Validation(_)), "{:?}", name);
        }
    }

    #[test]
    fn test_name_is_trimmed() {
        let options = resolve(Some("  my-app "), &mut answers()).unwrap();
        assert_eq!(options.project_name(), "my-app");
    }

    #[test]
    fn test_path_like_names_rejected() {
        for name in [".", "..", "a/b", "..\\evil"] {
            assert!(matches!(
                validate_project_name(name),
                Err(ScaffoldError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_missing_name_is_validation_error() {
        let mut partial = Answers {
            framework: Some(Framework::NextJs),
            package_manager: Some(PackageManager::Npm),
            ..Default::default()
        };
        let err = resolve(None, &mut partial).unwrap_err();
        assert!(matches!(err, ScaffoldError::Validation(_)));
    }

    #[test]
    fn test_cancel_is_distinct_from_validation() {
        for question in ["name", "framework", "pm"] {
            let err = resolve(None, &mut CancelOn(question)).unwrap_err();
            assert!(err.is_aborted(), "cancel on {}", question);
        }
    }

    #[test]
    fn test_tooling_is_none_when_prompt_disabled() {
        let options = resolve_with(None, &mut answers(), false).unwrap();
        assert_eq!(options.blockchain_tooling(), BlockchainTooling::None);
    }

    #[test]
    fn test_tooling_is_asked_when_prompt_enabled() {
        let options = resolve_with(None, &mut answers(), true).unwrap();
        assert_eq!(options.blockchain_tooling(), BlockchainTooling::Hardhat);

        let options = resolve_with(None, &mut CancelOn("none"), true).unwrap();
        assert_eq!(options.blockchain_tooling(), BlockchainTooling::Foundry);
    }

    #[test]
    fn test_prefilled_falls_back_for_gaps() {
        let preset = Answers {
            package_manager: Some(PackageManager::Pnpm),
            ..Default::default()
        };
        let mut prompter = preset.or_ask(CancelOn("none"));
        let options = resolve(Some("demo"), &mut prompter).unwrap();
        assert_eq!(options.framework(), Framework::React);
        assert_eq!(options.package_manager(), PackageManager::Pnpm);
    }

    #[test]
    fn test_parse_identifiers() {
        assert_eq!(Framework::parse("Next.js"), Some(Framework::NextJs));
        assert_eq!(Framework::parse("react"), Some(Framework::React));
        assert_eq!(Framework::parse("svelte"), None);
        assert_eq!(PackageManager::parse("PNPM"), Some(PackageManager::Pnpm));
        assert_eq!(PackageManager::parse("bun"), None);
    }

    #[test]
    fn test_choice_tables_cover_every_variant() {
        assert_eq!(FRAMEWORK_CHOICES.len(), 2);
        assert_eq!(PACKAGE_MANAGER_CHOICES.len(), 3);
        assert!(BLOCKCHAIN_TOOLING_CHOICES
            .iter()
            .any(|c| c.value == BlockchainTooling::None));
    }
}
