//! Charm-style CLI prompts using cliclack

use super::progress::SpinnerReporter;
use crate::config::{next_steps, ScaffoldConfig};
use crate::error::{Result as ScaffoldResult, ScaffoldError};
use crate::fs::DiskFs;
use crate::options::{
    validate_project_name, Answers, BlockchainTooling, Choice, Framework, PackageManager,
    ProjectOptions, Prompter,
};
use crate::pipeline::Pipeline;
use crate::process::SystemRunner;
use crate::registry::TemplateRegistry;
use crate::runtime::check;
use anyhow::Result;
use colored::Colorize;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Project name; prompted for when absent
    pub project_name: Option<String>,

    /// Pre-selected framework
    pub framework: Option<Framework>,

    /// Pre-selected package manager
    pub package_manager: Option<PackageManager>,

    /// Print the plan without touching anything
    pub dry_run: bool,

    /// Skip checking for node, the package manager and friends
    pub skip_preflight: bool,
}

/// Answers questions through interactive cliclack prompts
#[derive(Debug, Clone, Copy, Default)]
pub struct CliclackPrompter;

/// Esc and Ctrl+C surface as `Interrupted`
fn prompt_error(e: io::Error) -> ScaffoldError {
    if e.kind() == io::ErrorKind::Interrupted {
        ScaffoldError::Aborted
    } else {
        ScaffoldError::io("read answer from", Path::new("terminal"), e)
    }
}

fn select_choice<T>(prompt: &str, choices: &[Choice<T>]) -> ScaffoldResult<T>
where
    T: Clone + Eq + 'static,
{
    let mut select = cliclack::select(prompt);
    for choice in choices {
        select = select.item(choice.value.clone(), choice.name, "");
    }
    select.interact().map_err(prompt_error)
}

impl Prompter for CliclackPrompter {
    fn project_name(&mut self) -> ScaffoldResult<String> {
        loop {
            let input: String = cliclack::input("What is the name of your project?")
                .placeholder("my-web3-app")
                .interact()
                .map_err(prompt_error)?;

            match validate_project_name(&input) {
                Ok(name) => return Ok(name),
                Err(e) => {
                    cliclack::log::error(e.to_string()).map_err(prompt_error)?;
                }
            }
        }
    }

    fn framework(&mut self, choices: &[Choice<Framework>]) -> ScaffoldResult<Framework> {
        select_choice("Please select the framework you want to use:", choices)
    }

    fn package_manager(
        &mut self,
        choices: &[Choice<PackageManager>],
    ) -> ScaffoldResult<PackageManager> {
        select_choice("Please select the package manager you want to use:", choices)
    }

    fn blockchain_tooling(
        &mut self,
        choices: &[Choice<BlockchainTooling>],
    ) -> ScaffoldResult<BlockchainTooling> {
        select_choice(
            "Would you like to use HardHat or Foundry? (Optional)",
            choices,
        )
    }
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("create-web3-template".bold().to_string())?;

    let config = ScaffoldConfig::from_env()?;
    let base_dir = std::env::current_dir()?;
    let mut pipeline = Pipeline::new(
        TemplateRegistry::new(config),
        DiskFs::new(),
        SystemRunner::new(),
        base_dir,
    );

    // Step 1: Resolve options from flags and prompts
    let answers = Answers {
        framework: args.framework,
        package_manager: args.package_manager,
        ..Answers::default()
    };
    let mut prompter = answers.or_ask(CliclackPrompter);
    let options = pipeline.resolve(args.project_name.as_deref(), &mut prompter)?;
    let project_dir = pipeline.project_dir(&options);
    log_choices(&options)?;

    // Step 2: Build the plan
    let steps = pipeline.plan(&options)?;

    if args.dry_run {
        let listing: Vec<String> = steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{:>2}. {}", i + 1, step.describe(&project_dir)))
            .collect();
        cliclack::note(
            format!("Plan for {}", project_dir.display()),
            listing.join("\n"),
        )?;
        cliclack::outro("Dry run: nothing was written.")?;
        return Ok(());
    }

    // Step 3: Check external tools (warnings only)
    if args.skip_preflight {
        cliclack::log::info("Skipping tool check")?;
    } else {
        check_tools(&options)?;
    }

    // Step 4: Create project
    let mut reporter = SpinnerReporter::new(&project_dir);
    pipeline
        .execute(&steps, &project_dir, &mut reporter)
        .await?;
    reporter.finish();

    let file_count = count_files(&project_dir);
    cliclack::log::success(format!(
        "Created {} files in {}",
        file_count,
        project_dir.display()
    ))?;

    // Step 5: Show next steps
    print_next_steps(&options, &project_dir)?;

    Ok(())
}

fn log_choices(options: &ProjectOptions) -> Result<()> {
    let mut summary = format!(
        "{} with {} and {}",
        options.project_name().cyan(),
        options.framework(),
        options.package_manager()
    );
    if options.blockchain_tooling() != BlockchainTooling::None {
        summary.push_str(&format!(" ({})", options.blockchain_tooling()));
    }
    cliclack::log::info(summary)?;
    Ok(())
}

fn check_tools(options: &ProjectOptions) -> Result<()> {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    let report = check::preflight(options);
    let detected: Vec<String> = report
        .tools
        .iter()
        .filter(|t| t.available)
        .map(|t| format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown")))
        .collect();
    spinner.stop(format!("Detected tools: {}", detected.join(", ")));

    for warning in &report.warnings {
        cliclack::log::warning(warning)?;
    }
    Ok(())
}

/// Files in the generated project, not counting installed dependencies
fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules" && e.file_name() != ".git")
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .count()
}

fn print_next_steps(options: &ProjectOptions, project_dir: &Path) -> Result<()> {
    let steps = next_steps(options, project_dir);

    println!();
    println!("  {}", "Next steps".bold());
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step.cyan());
    }

    cliclack::outro("Happy hacking!")?;

    Ok(())
}
