//! Sparkle Validate - Command-line schema validator for Sparkle scenes

mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser};
use commands::{rules, validate};
use sparkle_validate::ValidatorConfig;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "sparkle-validate")]
#[command(about = "Validate Sparkle game schemas in USDA and TOML scenes", long_about = None)]
#[command(version)]
struct Cli {
    /// Scene file to validate (.usda, .usd or .toml)
    #[arg(required_unless_present = "list_rules")]
    scene_file: Option<PathBuf>,

    /// Write a detailed JSON report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Show only errors
    #[arg(long)]
    errors_only: bool,

    /// Config file to use instead of .sparkle/validate.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Check prims in parallel
    #[arg(long)]
    parallel: bool,

    /// List the active rules and exit
    #[arg(long)]
    list_rules: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let config = ValidatorConfig::load(&std::env::current_dir()?, cli.config.as_deref())?;
    let mut out = io::stdout().lock();

    if cli.list_rules {
        rules::run(&config, &mut out)?;
        return Ok(true);
    }

    let Some(scene) = cli.scene_file else {
        anyhow::bail!("No scene file given");
    };
    validate::run(
        &validate::ValidateArgs {
            scene,
            report: cli.report,
            errors_only: cli.errors_only,
            parallel: cli.parallel,
        },
        &config,
        &mut out,
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
