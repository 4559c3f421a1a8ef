use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::{debug, Level};

use jpconv::cli::Cli;
use jpconv::config::ConfigManager;
use jpconv::utils::encoding::EncodingSelector;
use jpconv::{convert, Direction};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries converted text only.
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    if stdin.is_terminal() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let config = manager.load().context("failed to load configuration")?;

    let selector = match &cli.encoding {
        Some(label) => EncodingSelector::from_label(label)?,
        None => config.selector()?,
    };
    let chunk_size = cli.chunk_size.unwrap_or(config.chunk_size);
    let direction = if cli.decode {
        Direction::Decode
    } else {
        Direction::Encode
    };

    debug!(
        config = %manager.get_config_file_path().display(),
        encoding = %selector,
        ?direction,
        chunk_size,
        "starting conversion"
    );

    let mut reader = stdin.lock();
    let mut writer = io::stdout().lock();
    convert(&mut reader, &mut writer, selector, direction, chunk_size)
        .context("conversion aborted")?;

    Ok(())
}
