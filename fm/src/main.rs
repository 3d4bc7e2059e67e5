//! flowmigrate - auto-flow Markdown to YAML migration
//!
//! CLI entry point. Runs all three pipelines and always completes; per
//! pipeline failures are printed, not returned.

use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::io;

use flowmigrate::cli::Cli;
use flowmigrate::config::Config;
use flowmigrate::migrate::Migrator;

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init()
        .context("Failed to initialize logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(dir) = cli.dir {
        config.paths.dir = dir;
    }

    let migrator = Migrator::new(config).with_dry_run(cli.dry_run);
    info!(
        "flowmigrate starting in {} (dry run: {})",
        migrator.config().paths.dir.display(),
        cli.dry_run
    );

    let mut stdout = io::stdout().lock();
    migrator
        .run(chrono::Utc::now(), &mut stdout)
        .context("Failed to write progress output")?;

    Ok(())
}
