//! CLI command implementations for Twenty48.

pub(crate) mod auto;
pub(crate) mod play;
pub(crate) mod reset;
pub(crate) mod show;

mod input;
mod output;

use clap::ValueEnum;
use env_logger::{Env, Target};
use std::error::Error;
use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use twenty48::autoplay::Strategy;
use twenty48::{persist, PersistError};

/// Output format for the `auto` and `show` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Move selection for the `auto` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum StrategyArg {
    /// Uniformly random legal move.
    Random,
    /// Highest immediate score.
    Greedy,
}

impl StrategyArg {
    /// Name as shown in output.
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Greedy => "greedy",
        }
    }
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Random => Self::Random,
            StrategyArg::Greedy => Self::Greedy,
        }
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<PersistError> for CliError {
    fn from(e: PersistError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Log file name inside the data directory, used while the TUI owns the screen.
pub(crate) const LOG_FILE: &str = "twenty48.log";

/// Set up `env_logger`, honouring `RUST_LOG` and defaulting to warnings.
///
/// With `log_file`, records are appended there instead of stderr. If the file
/// cannot be opened, logging stays on stderr.
pub(crate) fn init_logging(log_file: Option<&Path>) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));

    if let Some(path) = log_file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Cannot open log file {}: {e}", path.display()),
        }
    }

    // A logger may already be installed, as in tests that run several commands
    let _ = builder.try_init();
}

/// The data directory from `--data-dir`, or the default one.
pub(crate) fn resolve_data_dir(data_dir: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match data_dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir).map_err(|e| {
                CliError::new(format!("Failed to create {}: {e}", dir.display()))
            })?;
            Ok(dir)
        }
        None => Ok(persist::data_dir()?),
    }
}

/// The given seed, or a fresh random one.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
