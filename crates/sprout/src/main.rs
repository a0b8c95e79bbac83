mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use sprout_core::{init_logging, Config};
use std::path::Path;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let log_config = config.log_config();
    let level = cli.log_level.clone().unwrap_or(log_config.level);
    // Dropped at the end of run so buffered file logs are flushed before exit
    let _guard = init_logging(&level, log_config.file.as_deref().map(Path::new));
    for warning in &config.warnings {
        tracing::warn!("{}", warning);
    }

    commands::execute(cli, &config)
}
