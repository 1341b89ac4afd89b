//! Non-interactive play: simple strategies that drive a game to the end.

use crate::game::{Direction, Game, TileSource};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How the next move is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Uniformly among moves that change the board.
    Random,
    /// Highest immediate score, then most empty cells, then direction order.
    #[default]
    Greedy,
}

impl Strategy {
    /// Choose a move for `game`, or `None` if no move changes the board.
    pub fn choose<R: TileSource>(self, game: &Game<R>, rng: &mut impl Rng) -> Option<Direction> {
        let legal: Vec<Direction> = Direction::ALL
            .into_iter()
            .zip(game.legal_moves())
            .filter_map(|(direction, legal)| legal.then_some(direction))
            .collect();

        if legal.is_empty() {
            return None;
        }

        match self {
            Self::Random => Some(legal[rng.gen_range(0..legal.len())]),
            Self::Greedy => {
                let mut best: Option<(Direction, (u32, usize))> = None;
                for direction in legal {
                    let (next, gained) = game.board().slide(direction);
                    let key = (gained, next.empty_count());
                    // Strictly better only, so earlier directions win ties
                    if best.is_none_or(|(_, best_key)| key > best_key) {
                        best = Some((direction, key));
                    }
                }
                best.map(|(direction, _)| direction)
            }
        }
    }
}

/// Result of playing a game out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayoutSummary {
    /// Accepted moves made.
    pub moves: u32,
    /// Final score.
    pub score: u32,
    /// Largest tile reached.
    pub max_tile: u32,
    /// Whether the game reached game over (rather than the move cap).
    pub finished: bool,
}

/// Play `game` with `strategy` until it is over or `max_moves` moves are made.
pub fn play_out<R: TileSource>(
    game: &mut Game<R>,
    strategy: Strategy,
    rng: &mut impl Rng,
    max_moves: u32,
) -> PlayoutSummary {
    let mut moves = 0;

    while moves < max_moves {
        let Some(direction) = strategy.choose(game, rng) else {
            break;
        };
        let outcome = game.apply_move(direction);
        if outcome.moved {
            moves += 1;
        }
    }

    let summary = PlayoutSummary {
        moves,
        score: game.score(),
        max_tile: game.board().max_tile(),
        finished: game.is_over(),
    };
    debug!("playout finished: {summary:?}");
    summary
}
