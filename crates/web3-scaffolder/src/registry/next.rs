//! Next.js app with wagmi, React Query and shadcn-style UI primitives

use super::{add_pnpm_workspace, version_map, SiteDir, StepBuilder};
use crate::config::ScaffoldConfig;
use crate::options::ProjectOptions;
use crate::process::CommandLine;
use crate::steps::GenerationStep;
use serde_json::{json, Map, Value};
use std::path::Path;

const DEPENDENCIES: &[(&str, &str)] = &[
    ("@tanstack/react-query", "^5.51.23"),
    ("@radix-ui/react-slot", "^1.1.1"),
    ("@radix-ui/react-dropdown-menu", "^2.1.3"),
    ("@radix-ui/react-separator", "^1.1.1"),
    ("lucide-react", "^0.468.0"),
    ("class-variance-authority", "^0.7.1"),
    ("tailwind-merge", "^2.5.5"),
    ("tailwindcss-animate", "^1.0.7"),
    ("clsx", "^2.1.1"),
    ("viem", "2.x"),
    ("wagmi", "^2.14.8"),
];

const LAYOUT: &str = include_str!("../../templates/next/app/layout.tsx");
const PAGE: &str = include_str!("../../templates/next/app/page.tsx");
const GLOBALS_CSS: &str = include_str!("../../templates/next/app/globals.css");
const WAGMI_PROVIDER: &str = include_str!("../../templates/next/providers/WagmiProvider.tsx");
const WAGMI_CONFIG: &str = include_str!("../../templates/next/wagmi.config.ts");
const UTILS: &str = include_str!("../../templates/next/lib/utils.ts");
const TAILWIND_CONFIG: &str = include_str!("../../templates/next/tailwind.config.ts");
const BUTTON: &str = include_str!("../../templates/next/components/ui/button.tsx");
const CARD: &str = include_str!("../../templates/next/components/ui/card.tsx");
const DROPDOWN_MENU: &str = include_str!("../../templates/next/components/ui/dropdown-menu.tsx");
const SEPARATOR: &str = include_str!("../../templates/next/components/ui/separator.tsx");
const NOISE_SVG: &str = include_str!("../../templates/next/public/noise.svg");
const ARROW_SVG: &str = include_str!("../../templates/next/public/arrow.svg");
const METAMASK_LOGO_SVG: &str = include_str!("../../templates/next/public/metamask-logo.svg");
const HERO: &str = include_str!("../../templates/next/components/Hero.tsx");
const NAVBAR: &str = include_str!("../../templates/next/components/navbar.tsx");

fn scaffold_command(config: &ScaffoldConfig, options: &ProjectOptions) -> CommandLine {
    CommandLine::new(
        "npx",
        [
            format!("create-next-app@{}", config.next_app_version).as_str(),
            ".",
            "--ts",
            "--tailwind",
            "--eslint",
            "--app",
            "--src-dir",
            "--skip-install",
            "--import-alias",
            "@/*",
            options.package_manager().create_next_app_flag(),
            "--turbopack",
            "--yes",
        ],
    )
}

/// Imports in the templates are written as `@/src/...`, so the alias maps to the project root
fn tsconfig_paths() -> Map<String, Value> {
    let mut patch = Map::new();
    patch.insert("paths".to_string(), json!({ "@/*": ["./*"] }));
    patch
}

pub(super) fn steps(
    config: &ScaffoldConfig,
    options: &ProjectOptions,
    site_dir: &Path,
    mode: SiteDir,
) -> Vec<GenerationStep> {
    let mut b = StepBuilder::new(site_dir);

    b.make_dir("", mode == SiteDir::Existing)
        .run("", scaffold_command(config, options))
        .merge("package.json", "dependencies", version_map(DEPENDENCIES))
        .merge("tsconfig.json", "compilerOptions", tsconfig_paths());

    if mode == SiteDir::Standalone {
        add_pnpm_workspace(&mut b, options.package_manager(), &["."]);
    }

    b.make_dir("src/components/ui", true)
        .make_dir("src/app", true)
        .write("src/app/layout.tsx", LAYOUT)
        .make_dir("src/providers", true)
        .write("src/providers/WagmiProvider.tsx", WAGMI_PROVIDER)
        .write("wagmi.config.ts", WAGMI_CONFIG)
        .make_dir("src/lib", true)
        .write("src/lib/utils.ts", UTILS)
        .write("src/app/globals.css", GLOBALS_CSS)
        .write("tailwind.config.ts", TAILWIND_CONFIG)
        .write("src/components/ui/button.tsx", BUTTON)
        .write("src/components/ui/card.tsx", CARD)
        .write("src/components/ui/dropdown-menu.tsx", DROPDOWN_MENU)
        .write("src/components/ui/separator.tsx", SEPARATOR)
        .make_dir("public", true)
        .write("public/noise.svg", NOISE_SVG)
        .write("public/arrow.svg", ARROW_SVG)
        .write("public/metamask-logo.svg", METAMASK_LOGO_SVG)
        .write("src/components/Hero.tsx", HERO)
        .write("src/components/navbar.tsx", NAVBAR)
        .write("src/app/page.tsx", PAGE);

    b.finish()
}
