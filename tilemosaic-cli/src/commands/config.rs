//! Configuration management CLI commands.
//!
//! Provides `config show`, `config path` and `config init`.

use clap::Subcommand;
use tilemosaic::config::ConfigFile;

use super::common::ConfigOverrides;
use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration (file plus overrides)
    Show {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Show the configuration file path
    Path {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },

    /// Write a config file with default values if none exists
    Init {
        #[command(flatten)]
        overrides: ConfigOverrides,
    },
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Show { overrides } => run_show(&overrides),
        ConfigCommands::Path { overrides } => run_path(&overrides),
        ConfigCommands::Init { overrides } => run_init(&overrides),
    }
}

fn run_show(overrides: &ConfigOverrides) -> Result<(), CliError> {
    let config = overrides.load()?;
    print!("{}", describe(&config)?);
    if let Err(e) = config.validate_grid() {
        println!();
        println!("Warning: {}", e);
    }
    Ok(())
}

fn run_path(overrides: &ConfigOverrides) -> Result<(), CliError> {
    println!("{}", overrides.config_path().display());
    Ok(())
}

fn run_init(overrides: &ConfigOverrides) -> Result<(), CliError> {
    let path = overrides.config_path();
    if path.exists() {
        println!("Config file already exists: {}", path.display());
        return Ok(());
    }

    let mut config = ConfigFile::default();
    overrides.apply(&mut config)?;
    config.save_to(&path)?;
    println!("Created config file: {}", path.display());
    Ok(())
}

/// Human-readable summary of the effective settings.
fn describe(config: &ConfigFile) -> Result<String, CliError> {
    let sources = config.source_set()?;
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(stdout only)".to_string());

    Ok(format!(
        "Sources:      {} (ids {}..={}, {} images)\n\
         Grid:         {}\n\
         Tile size:    {}\n\
         Format:       {} (jpeg quality {})\n\
         Timeout:      {}s\n\
         Parallel:     {}\n\
         Listen:       {}\n\
         Log level:    {}\n\
         Log file:     {}\n",
        sources.template(),
        sources.first(),
        sources.last(),
        sources.len(),
        config.grid_shape()?,
        config.tile_size()?,
        config.output.format,
        config.output.jpeg_quality,
        config.download.timeout,
        config.download.parallel,
        config.server.listen,
        config.logging.level,
        log_file,
    ))
}
