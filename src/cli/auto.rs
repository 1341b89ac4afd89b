//! Auto command implementation - play a whole game without input.

use super::output::{format_playout_text, JsonPlayout};
use super::{init_logging, resolve_seed, CliError, OutputFormat, StrategyArg};
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use twenty48::autoplay::{self, Strategy};
use twenty48::Game;

/// Execute the auto command.
///
/// # Errors
///
/// Returns an error if the result cannot be serialized.
pub(crate) fn execute(
    seed: Option<u64>,
    strategy: StrategyArg,
    max_moves: u32,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    init_logging(None);

    let seed = resolve_seed(seed);

    if !quiet && format == OutputFormat::Text {
        println!("Playing with seed {seed}, strategy {}", strategy.name());
        println!();
    }

    let mut game = Game::new(ChaCha8Rng::seed_from_u64(seed));
    // Move choice draws from its own stream so spawns depend on the seed alone
    let mut chooser = ChaCha8Rng::seed_from_u64(seed.wrapping_add(1));

    let summary = autoplay::play_out(&mut game, strategy.into(), &mut chooser, max_moves);
    info!(
        "Autoplay done after {} moves, score {}",
        summary.moves, summary.score
    );

    let snapshot = game.snapshot();
    match format {
        OutputFormat::Text => {
            print!(
                "{}",
                format_playout_text(seed, strategy.name(), &summary, &snapshot)
            );
        }
        OutputFormat::Json => {
            let playout = JsonPlayout {
                seed,
                strategy: Strategy::from(strategy),
                summary,
                final_state: snapshot,
            };
            println!("{}", serde_json::to_string_pretty(&playout)?);
        }
    }

    Ok(())
}
