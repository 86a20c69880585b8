//! npm workspace with `packages/blockchain` and `packages/site`

use super::{add_pnpm_workspace, SiteDir, StepBuilder, TemplateRegistry};
use crate::options::{BlockchainTooling, ProjectOptions};
use crate::process::CommandLine;
use crate::steps::GenerationStep;
use std::path::Path;

const BLOCKCHAIN_PACKAGE: &str = "packages/blockchain";
const SITE_PACKAGE: &str = "packages/site";

fn npm_init(workspace: Option<&str>) -> CommandLine {
    match workspace {
        Some(dir) => CommandLine::new("npm", ["init", "-w", format!("./{}", dir).as_str(), "-y"]),
        None => CommandLine::new("npm", ["init", "-y"]),
    }
}

pub(super) fn steps(
    registry: &TemplateRegistry,
    options: &ProjectOptions,
    tooling: BlockchainTooling,
    target_dir: &Path,
) -> Vec<GenerationStep> {
    let mut b = StepBuilder::new(target_dir);

    b.make_dir("", false);
    add_pnpm_workspace(&mut b, options.package_manager(), &["packages/*"]);

    // `npm init -w` creates each package directory with a stub manifest;
    // the package generators below bring their own.
    b.write(".gitignore", "node_modules\n")
        .run("", npm_init(None))
        .run("", npm_init(Some(BLOCKCHAIN_PACKAGE)))
        .run("", npm_init(Some(SITE_PACKAGE)))
        .remove(&format!("{}/package.json", BLOCKCHAIN_PACKAGE))
        .remove(&format!("{}/package.json", SITE_PACKAGE))
        .remove("node_modules");

    if tooling == BlockchainTooling::Hardhat {
        let url = registry.config().hardhat_template_url.as_str();
        b.run("", CommandLine::new("git", ["clone", url, BLOCKCHAIN_PACKAGE]));
    }

    let site_dir = b.path(SITE_PACKAGE);
    b.extend(registry.site_steps(options, &site_dir, SiteDir::Existing));

    if tooling == BlockchainTooling::Foundry {
        b.run(
            BLOCKCHAIN_PACKAGE,
            CommandLine::new("forge", ["init", ".", "--no-commit"]),
        );
    }

    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Framework, PackageManager};

    #[test]
    fn test_stub_manifests_removed_before_packages_are_generated() {
        let options = ProjectOptions::new(
            "demo",
            Framework::NextJs,
            PackageManager::Npm,
            BlockchainTooling::Hardhat,
        )
        .unwrap();
        let root = Path::new("/work/demo");
        let steps = steps(
            &TemplateRegistry::default(),
            &options,
            BlockchainTooling::Hardhat,
            root,
        );

        let removed: Vec<_> = steps
            .iter()
            .filter(|s| matches!(s, GenerationStep::RemovePath { .. }))
            .map(|s| s.describe(root).replace('\\', "/"))
            .collect();
        assert_eq!(
            removed,
            vec![
                "remove packages/blockchain/package.json",
                "remove packages/site/package.json",
                "remove node_modules",
            ]
        );

        let clone = steps
            .iter()
            .position(|s| s.describe(root).starts_with("run `git clone"))
            .unwrap();
        let last_remove = steps
            .iter()
            .rposition(|s| matches!(s, GenerationStep::RemovePath { .. }))
            .unwrap();
        assert!(last_remove < clone);
    }

    #[test]
    fn test_gitignore_excludes_node_modules() {
        let options = ProjectOptions::new(
            "demo",
            Framework::React,
            PackageManager::Yarn,
            BlockchainTooling::Foundry,
        )
        .unwrap();
        let steps = steps(
            &TemplateRegistry::default(),
            &options,
            BlockchainTooling::Foundry,
            Path::new("/work/demo"),
        );
        assert!(steps.contains(&GenerationStep::WriteFile {
            path: Path::new("/work/demo").join(".gitignore"),
            content: "node_modules\n".to_string(),
        }));
    }
}
