//! Render command - build the mosaic once and write it to a file.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::common::ConfigOverrides;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the render command.
#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overrides: ConfigOverrides,

    /// Output file path
    #[arg(long, short)]
    pub output: PathBuf,
}

/// Run the render command.
pub fn run(args: RenderArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(&args.overrides)?;
    runner.log_startup("render");

    let service = runner.create_service()?;
    let runtime = runner.runtime()?;

    let config = service.config();
    println!(
        "Rendering {} images into {} ({} tiles, {})...",
        config.sources().len(),
        config.grid(),
        config.tile_size(),
        config.format()
    );

    let sources = config.sources().expand();
    let render = runtime.block_on(service.render_with_stats(&sources, config.grid()))?;
    let composite = render.composite;

    std::fs::write(&args.output, composite.data()).map_err(|error| CliError::FileWrite {
        path: args.output.display().to_string(),
        error,
    })?;

    info!(
        path = %args.output.display(),
        bytes = composite.data().len(),
        "Composite written"
    );
    println!("{}", render.stats);
    println!(
        "Saved {} ({}x{}, {} bytes)",
        args.output.display(),
        composite.width(),
        composite.height(),
        composite.data().len()
    );

    Ok(())
}
