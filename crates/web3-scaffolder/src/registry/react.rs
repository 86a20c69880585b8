//! React app on Vite with wagmi and React Query

use super::{add_pnpm_workspace, version_map, SiteDir, StepBuilder};
use crate::config::ScaffoldConfig;
use crate::options::{PackageManager, ProjectOptions};
use crate::process::CommandLine;
use crate::steps::GenerationStep;
use std::path::Path;

const DEPENDENCIES: &[(&str, &str)] = &[
    ("@tanstack/react-query", "^5.51.23"),
    ("viem", "2.x"),
    ("wagmi", "^2.14.8"),
];

const WAGMI_CONFIG: &str = include_str!("../../templates/react/wagmi.config.ts");
const MAIN: &str = include_str!("../../templates/react/main.tsx");
const APP: &str = include_str!("../../templates/react/App.tsx");

/// `<pm> create vite . --template react-ts`
///
/// npm forwards initializer flags only after `--`, and yarn classic
/// does not accept a version on `create`.
fn scaffold_command(config: &ScaffoldConfig, pm: PackageManager) -> CommandLine {
    let versioned = format!("vite@{}", config.vite_version);
    let args: Vec<&str> = match pm {
        PackageManager::Npm => vec!["create", versioned.as_str(), ".", "--", "--template", "react-ts"],
        PackageManager::Yarn => vec!["create", "vite", ".", "--template", "react-ts"],
        PackageManager::Pnpm => vec!["create", versioned.as_str(), ".", "--template", "react-ts"],
    };
    CommandLine::new(pm.command(), args)
}

pub(super) fn steps(
    config: &ScaffoldConfig,
    options: &ProjectOptions,
    site_dir: &Path,
    mode: SiteDir,
) -> Vec<GenerationStep> {
    let pm = options.package_manager();
    let mut b = StepBuilder::new(site_dir);

    b.make_dir("", mode == SiteDir::Existing)
        .run("", scaffold_command(config, pm))
        .merge("package.json", "dependencies", version_map(DEPENDENCIES));

    if mode == SiteDir::Standalone {
        add_pnpm_workspace(&mut b, pm, &["."]);
    }

    b.make_dir("src", true)
        .write("src/wagmi.config.ts", WAGMI_CONFIG)
        .write("src/main.tsx", MAIN)
        .write("src/App.tsx", APP);

    b.finish()
}
