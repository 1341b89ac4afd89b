//! Twenty48 CLI - play 2048 in the terminal or let a strategy play it.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Twenty48 - the 2048 sliding-tile puzzle
#[derive(Parser, Debug)]
#[command(name = "twenty48")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play interactively in the terminal
    Play {
        /// Directory for the saved game and log (default: ~/.twenty48)
        #[arg(long, env = "TWENTY48_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Random seed for tile spawns (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Neither resume nor save a game
        #[arg(long)]
        no_save: bool,
    },

    /// Play a game to the end with a built-in strategy
    Auto {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Move selection strategy
        #[arg(long, value_enum, default_value = "greedy")]
        strategy: cli::StrategyArg,

        /// Stop after this many moves (default: 100000)
        #[arg(short, long, default_value = "100000")]
        max_moves: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress the preamble
        #[arg(short, long)]
        quiet: bool,
    },

    /// Print the saved game without changing it
    Show {
        /// Directory holding the saved game (default: ~/.twenty48)
        #[arg(long, env = "TWENTY48_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Delete the saved game
    Reset {
        /// Directory holding the saved game (default: ~/.twenty48)
        #[arg(long, env = "TWENTY48_DATA_DIR")]
        data_dir: Option<PathBuf>,

        /// Also delete the best score
        #[arg(long)]
        best: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Play {
            data_dir,
            seed,
            no_save,
        } => cli::play::execute(data_dir, seed, no_save),

        Commands::Auto {
            seed,
            strategy,
            max_moves,
            format,
            quiet,
        } => cli::auto::execute(seed, strategy, max_moves, format, quiet),

        Commands::Show { data_dir, format } => cli::show::execute(data_dir, format),

        Commands::Reset { data_dir, best } => cli::reset::execute(data_dir, best),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_auto_defaults() {
        let args = Args::try_parse_from(["twenty48", "auto"]).unwrap();
        match args.command {
            Commands::Auto {
                seed,
                strategy,
                max_moves,
                format,
                quiet,
            } => {
                assert_eq!(seed, None);
                assert_eq!(strategy, cli::StrategyArg::Greedy);
                assert_eq!(max_moves, 100_000);
                assert_eq!(format, cli::OutputFormat::Text);
                assert!(!quiet);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_reset_best_flag() {
        let args =
            Args::try_parse_from(["twenty48", "reset", "--data-dir", "/tmp/x", "--best"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Reset { best: true, data_dir: Some(_) }
        ));
    }
}
