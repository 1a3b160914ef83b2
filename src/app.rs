// Declare modules
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::env;
use std::path::Path;

use self::cli::Cli;
use self::config::resolve_config;
use self::formatter::Formatter;
use self::models::{FileTask, RuntimeConfig};
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();
    init_logging(args.verbose);

    // 2. Identify Project Name
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    // Simple heuristic: name of current folder
    let project_name = current_dir.file_name().and_then(|n| n.to_str());

    // 3. Resolve Configuration
    let config = resolve_config(args, project_name)?;
    log::debug!("Resolved config: {:?}", config);

    // 4. List or Format every target, stopping at the first failure
    if config.list_only {
        for dir in config.targets.dirs() {
            for task in list_directory(dir, &config)? {
                println!("{}", task.path.display());
            }
        }
        return Ok(());
    }

    let formatter = Formatter::from_config(&config);
    let total = format_targets(&config, &formatter)?;
    log::info!("✨ Formatted {} file(s)", total);

    Ok(())
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG still wins when set.
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(level)).try_init();
}

/// Formats each directory of the target set in order.
pub fn format_targets(config: &RuntimeConfig, formatter: &Formatter) -> Result<usize> {
    let mut total = 0;
    for dir in config.targets.dirs() {
        total += format_directory(dir, config, formatter)?;
    }
    Ok(total)
}

/// Formats every recognized file under `dir`, returning how many were formatted.
pub fn format_directory(dir: &Path, config: &RuntimeConfig, formatter: &Formatter) -> Result<usize> {
    let tasks = list_directory(dir, config)?;

    for task in &tasks {
        log::info!("[{}] formatting {}", dir.display(), task.relative_path);
        formatter.format_file(&task.path)?;
    }

    Ok(tasks.len())
}

pub fn list_directory(dir: &Path, config: &RuntimeConfig) -> Result<Vec<FileTask>> {
    let tasks = Scanner::new(dir, config)?.scan();
    if tasks.is_empty() {
        log::warn!("⚠️ No source files found under {}", dir.display());
    }
    Ok(tasks)
}
