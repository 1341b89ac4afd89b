//! Reset command implementation.

use super::{init_logging, resolve_data_dir, CliError};
use log::info;
use std::path::PathBuf;
use twenty48::persist::{self, FileStore};

/// Execute the reset command.
///
/// Deletes the saved game, and the best score too when `best` is set.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or written.
pub(crate) fn execute(data_dir: Option<PathBuf>, best: bool) -> Result<(), CliError> {
    init_logging(None);

    let dir = resolve_data_dir(data_dir)?;
    let mut store = FileStore::open(&dir)?;

    persist::clear_state(&mut store)?;
    info!("Cleared saved game in {}", dir.display());

    if best {
        persist::clear_best_score(&mut store)?;
        println!("Cleared saved game and best score");
    } else {
        println!("Cleared saved game");
    }

    Ok(())
}
