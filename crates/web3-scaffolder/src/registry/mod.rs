//! Template registry
//!
//! Maps resolved [`ProjectOptions`] to the ordered list of generation steps
//! that builds the project. Lookups are pure: no I/O happens here, the same
//! inputs always produce the same plan.
//!
//! - `next` - Next.js app on top of create-next-app
//! - `react` - React app on top of create-vite
//! - `monorepo` - npm workspace with a contracts package next to the site

mod monorepo;
mod next;
mod react;

use crate::config::ScaffoldConfig;
use crate::options::{BlockchainTooling, Framework, PackageManager, ProjectOptions};
use crate::process::CommandLine;
use crate::steps::GenerationStep;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Static mapping from (framework, tooling) to generation steps
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    config: ScaffoldConfig,
}

impl TemplateRegistry {
    pub fn new(config: ScaffoldConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScaffoldConfig {
        &self.config
    }

    /// Ordered steps that create the project described by `options` at `target_dir`
    pub fn steps_for(&self, options: &ProjectOptions, target_dir: &Path) -> Vec<GenerationStep> {
        match options.blockchain_tooling() {
            BlockchainTooling::None => {
                self.site_steps(options, target_dir, SiteDir::Standalone)
            }
            tooling => monorepo::steps(self, options, tooling, target_dir),
        }
    }

    /// Steps for the frontend alone, rooted at `site_dir`
    fn site_steps(
        &self,
        options: &ProjectOptions,
        site_dir: &Path,
        mode: SiteDir,
    ) -> Vec<GenerationStep> {
        match options.framework() {
            Framework::NextJs => next::steps(&self.config, options, site_dir, mode),
            Framework::React => react::steps(&self.config, options, site_dir, mode),
        }
    }
}

/// How the framework builder treats its own root directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SiteDir {
    /// The site is the whole project: its directory must not exist yet
    Standalone,
    /// A package inside a workspace whose directory an earlier step produced
    Existing,
}

/// Accumulates steps with paths relative to one root
struct StepBuilder {
    root: PathBuf,
    steps: Vec<GenerationStep>,
}

impl StepBuilder {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            steps: Vec::new(),
        }
    }

    /// `rel` uses `/` separators; the empty string is the root itself
    fn path(&self, rel: &str) -> PathBuf {
        rel.split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }

    fn make_dir(&mut self, rel: &str, recursive: bool) -> &mut Self {
        let path = self.path(rel);
        self.steps
            .push(GenerationStep::MakeDirectory { path, recursive });
        self
    }

    fn write(&mut self, rel: &str, content: &str) -> &mut Self {
        let path = self.path(rel);
        self.steps.push(GenerationStep::WriteFile {
            path,
            content: content.to_string(),
        });
        self
    }

    fn run(&mut self, rel_dir: &str, command: CommandLine) -> &mut Self {
        let working_dir = self.path(rel_dir);
        self.steps.push(GenerationStep::RunCommand {
            command,
            working_dir,
        });
        self
    }

    fn merge(&mut self, rel: &str, key: &str, patch: Map<String, Value>) -> &mut Self {
        let path = self.path(rel);
        self.steps.push(GenerationStep::MergeJson {
            path,
            key: key.to_string(),
            patch,
        });
        self
    }

    fn remove(&mut self, rel: &str) -> &mut Self {
        let path = self.path(rel);
        self.steps.push(GenerationStep::RemovePath { path });
        self
    }

    fn extend(&mut self, steps: Vec<GenerationStep>) -> &mut Self {
        self.steps.extend(steps);
        self
    }

    fn finish(self) -> Vec<GenerationStep> {
        self.steps
    }
}

/// `{"name": "version", ...}` as a JSON object patch
fn version_map(entries: &[(&str, &str)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(name, version)| (name.to_string(), Value::String(version.to_string())))
        .collect()
}

#[derive(Serialize)]
struct PnpmWorkspace<'a> {
    packages: &'a [&'a str],
}

/// Contents of `pnpm-workspace.yaml` listing `packages`
fn pnpm_workspace(packages: &[&str]) -> String {
    serde_yaml::to_string(&PnpmWorkspace { packages })
        .expect("a list of strings always serializes to YAML")
}

/// Write `pnpm-workspace.yaml` when pnpm was chosen
fn add_pnpm_workspace(builder: &mut StepBuilder, pm: PackageManager, packages: &[&str]) {
    if pm == PackageManager::Pnpm {
        builder.write("pnpm-workspace.yaml", &pnpm_workspace(packages));
    }
}
