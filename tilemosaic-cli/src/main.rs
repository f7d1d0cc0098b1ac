//! TileMosaic CLI - Command-line interface
//!
//! Serves or renders composite grids of remote images.

mod commands;
mod error;
mod runner;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::render::RenderArgs;
use commands::serve::ServeArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "tilemosaic")]
#[command(version, about = "Fetch remote images and compose them into one grid", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an HTTP server that renders the mosaic on GET /
    Serve(ServeArgs),

    /// Render the mosaic once and write it to a file
    Render(RenderArgs),

    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        e.exit();
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Serve(args) => commands::serve::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Config { command } => commands::config::run(command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render_with_overrides() {
        let cli = Cli::try_parse_from([
            "tilemosaic",
            "render",
            "--output",
            "mosaic.png",
            "--rows",
            "2",
            "--cols",
            "3",
            "--format",
            "png",
            "--timeout",
            "5",
        ])
        .unwrap();

        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.output.to_str(), Some("mosaic.png"));
                assert_eq!(args.overrides.rows, Some(2));
                assert_eq!(args.overrides.cols, Some(3));
                assert_eq!(args.overrides.timeout, Some(5));
            }
            _ => panic!("expected render"),
        }
    }

    #[test]
    fn test_parse_serve_listen() {
        let cli =
            Cli::try_parse_from(["tilemosaic", "serve", "--listen", "127.0.0.1:9000"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.listen, Some("127.0.0.1:9000".parse().unwrap()));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_auto_grid_conflicts_with_rows() {
        let result = Cli::try_parse_from([
            "tilemosaic",
            "render",
            "-o",
            "out.jpg",
            "--auto-grid",
            "--rows",
            "3",
        ]);
        assert!(result.is_err());
    }
}
