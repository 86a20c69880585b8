//! create-web3-template CLI - Project scaffolding for Web3 dapps

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::process::ExitCode;
use web3_scaffolder::options::{Framework, PackageManager};
use web3_scaffolder::tui::CreateArgs;
use web3_scaffolder::ScaffoldError;

/// Exit status when the user cancels, matching a shell's SIGINT convention
const EXIT_CANCELLED: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "create-web3-template")]
#[command(about = "CLI for scaffolding Web3 dapps with Next.js or React")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Arguments for the default `create` command
    #[command(flatten)]
    pub create: CliCreateArgs,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Web3 project (default)
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Name of the project directory to create
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: Option<String>,

    /// Framework to use (nextjs, react)
    #[arg(short, long, value_parser = parse_framework)]
    pub framework: Option<Framework>,

    /// Package manager to use (npm, yarn, pnpm)
    #[arg(short, long = "package-manager", value_parser = parse_package_manager)]
    pub package_manager: Option<PackageManager>,

    /// Print the steps that would run without creating anything
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Skip checking for node, the package manager and other tools
    #[arg(long = "skip-preflight")]
    pub skip_preflight: bool,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            project_name: args.project_name,
            framework: args.framework,
            package_manager: args.package_manager,
            dry_run: args.dry_run,
            skip_preflight: args.skip_preflight,
        }
    }
}

fn parse_framework(s: &str) -> std::result::Result<Framework, String> {
    Framework::parse(s).ok_or_else(|| format!("unknown framework '{}' (expected nextjs or react)", s))
}

fn parse_package_manager(s: &str) -> std::result::Result<PackageManager, String> {
    PackageManager::parse(s)
        .ok_or_else(|| format!("unknown package manager '{}' (expected npm, yarn or pnpm)", s))
}

fn init_logger(verbose: bool) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Cancellation reaches us either from the scaffolder or straight from a prompt
fn is_cancelled(err: &anyhow::Error) -> bool {
    if let Some(e) = err.downcast_ref::<ScaffoldError>() {
        return e.is_aborted();
    }
    err.downcast_ref::<io::Error>()
        .map(|e| e.kind() == io::ErrorKind::Interrupted)
        .unwrap_or(false)
}

async fn run(args: Args) -> Result<()> {
    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args,
        // No subcommand provided, default to create behavior
        None => args.create,
    };
    init_logger(create_args.verbose);
    web3_scaffolder::run(create_args.into()).await
}

#[tokio::main]
async fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(EXIT_CANCELLED as i32);
    })
    .ok();

    let result = run(Args::parse()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if is_cancelled(&err) => {
            let _ = cliclack::outro_cancel("Setup cancelled.");
            ExitCode::from(EXIT_CANCELLED)
        }
        Err(err) => {
            eprintln!("{} {}", console::style("error:").red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
