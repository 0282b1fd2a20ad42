//! CLI definitions and entry point

use clap::{Args, Parser, Subcommand};

use super::commands;
use nstest::output::OutputMode;

/// nstest - Fast unit testing for namespace-dependency JavaScript codebases
#[derive(Parser, Debug)]
#[command(
    name = "nstest",
    version,
    about = "Fast unit testing for namespace-dependency JavaScript codebases",
    long_about = "Resolve the dependency closure of the selected test files and run them\n\
                  through Mocha, preloading exactly the namespace source files the tests\n\
                  require, in a valid load order."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the selected tests
    Run(RunOpts),

    /// Print the computed file load order without running anything
    Order(OrderOpts),

    /// Show version
    Version,
}

/// Options for the run command
#[derive(Args, Debug)]
pub struct RunOpts {
    /// Test files, directories, or glob patterns
    pub patterns: Vec<String>,

    /// Config overrides
    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Options for the order command
#[derive(Args, Debug)]
pub struct OrderOpts {
    /// Test files, directories, or glob patterns
    pub patterns: Vec<String>,

    /// Config overrides
    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Config-file overrides shared by subcommands
#[derive(Args, Debug)]
pub struct ConfigOverrides {
    /// Path to a config file (default: .nstest.toml if present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Base-runtime bootstrap file path
    #[arg(long)]
    pub base_path: Option<String>,

    /// Dependency manifest path
    #[arg(long)]
    pub deps_path: Option<String>,

    /// Relative-path prefix for manifest paths
    #[arg(long)]
    pub prefix: Option<String>,

    /// Mock/helper file to always preload
    #[arg(long)]
    pub mock_file: Option<String>,

    /// Mocha UI style
    #[arg(long)]
    pub ui: Option<String>,

    /// Mocha reporter name
    #[arg(long)]
    pub reporter: Option<String>,

    /// Global identifiers tests are allowed to declare
    #[arg(long = "global")]
    pub globals: Vec<String>,

    /// Per-test timeout in milliseconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Stop after the first failing test
    #[arg(long)]
    pub bail: bool,

    /// Slow-test threshold in milliseconds
    #[arg(long)]
    pub slow: Option<u64>,

    /// Filter tests by name
    #[arg(long)]
    pub grep: Option<String>,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Run(opts)) => commands::run(&opts, output_mode),
        Some(Command::Order(opts)) => commands::order(&opts, output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("nstest v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("nstest v{}", env!("CARGO_PKG_VERSION"));
                println!("Use --help for usage");
            }
            Ok(())
        },
    }
}
