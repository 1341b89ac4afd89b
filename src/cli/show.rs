//! Show command implementation - print the saved game.

use super::output::format_snapshot_text;
use super::{init_logging, resolve_data_dir, CliError, OutputFormat};
use std::path::PathBuf;
use twenty48::persist::{self, FileStore};
use twenty48::{Game, ScriptedSource};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened, the saved game
/// is corrupt, or the output cannot be serialized.
pub(crate) fn execute(data_dir: Option<PathBuf>, format: OutputFormat) -> Result<(), CliError> {
    init_logging(None);

    let dir = resolve_data_dir(data_dir)?;
    let store = FileStore::open(&dir)?;

    // Read only: a corrupt save is reported, not deleted
    let Some(saved) = persist::read_state(&store)? else {
        let best = persist::load_best_score(&store);
        match format {
            OutputFormat::Text => println!("No saved game in {} (best: {best})", dir.display()),
            OutputFormat::Json => println!("null"),
        }
        return Ok(());
    };

    // Resume without spawning to derive the status the saved board implies
    let best = saved.best_score.max(persist::load_best_score(&store));
    let snapshot =
        Game::resume(ScriptedSource::first_cell(), saved.grid, saved.score, best).snapshot();

    match format {
        OutputFormat::Text => print!("{}", format_snapshot_text(&snapshot)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
    }

    Ok(())
}
