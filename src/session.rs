//! Game sessions: one engine plus the store it saves to.
//!
//! A front end owns a [`Session`] and calls its move and restart entry
//! points; the session keeps the saved game in step after every accepted
//! move. Storage failures never interrupt play.

use crate::game::{Direction, Game, MoveOutcome, Snapshot, TileSource};
use crate::persist::{self, KeyValueStore};
use log::{info, warn};

/// One game and, optionally, where it is saved.
#[derive(Debug)]
pub struct Session<R, S> {
    game: Game<R>,
    store: Option<S>,
}

impl<R: TileSource, S: KeyValueStore> Session<R, S> {
    /// Open a session backed by `store`.
    ///
    /// Resumes the saved game if there is a valid one. Otherwise starts a
    /// fresh game that inherits the stored best score. The resulting state is
    /// saved straight away.
    #[must_use]
    pub fn open(source: R, mut store: S) -> Self {
        let game = if let Some(saved) = persist::load_state(&mut store) {
            info!(
                "Resuming saved game: score {}, best {}",
                saved.score, saved.best_score
            );
            // The separate best-score key may be ahead of the saved game
            let best = saved.best_score.max(persist::load_best_score(&store));
            Game::resume(source, saved.grid, saved.score, best)
        } else {
            let best = persist::load_best_score(&store);
            info!("Starting new game, best score {best}");
            Game::with_best_score(source, best)
        };

        let mut session = Self {
            game,
            store: Some(store),
        };
        session.save();
        session
    }

    /// A session that never saves.
    #[must_use]
    pub fn ephemeral(source: R) -> Self {
        Self {
            game: Game::new(source),
            store: None,
        }
    }

    /// The engine, read-only.
    #[must_use]
    pub const fn game(&self) -> &Game<R> {
        &self.game
    }

    /// Copy out the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }

    /// The backing store, if any.
    #[must_use]
    pub const fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    /// Apply a move and save if it was accepted.
    pub fn apply(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.game.apply_move(direction);
        if outcome.moved {
            self.save();
        }
        outcome
    }

    /// Slide toward row 0.
    pub fn move_up(&mut self) -> MoveOutcome {
        self.apply(Direction::Up)
    }

    /// Slide toward the last row.
    pub fn move_down(&mut self) -> MoveOutcome {
        self.apply(Direction::Down)
    }

    /// Slide toward column 0.
    pub fn move_left(&mut self) -> MoveOutcome {
        self.apply(Direction::Left)
    }

    /// Slide toward the last column.
    pub fn move_right(&mut self) -> MoveOutcome {
        self.apply(Direction::Right)
    }

    /// Start a new game, keeping the best score, and save it.
    pub fn restart(&mut self) {
        self.game.restart();
        self.save();
    }

    /// Give back the engine and the store.
    #[must_use]
    pub fn into_parts(self) -> (Game<R>, Option<S>) {
        (self.game, self.store)
    }

    fn save(&mut self) {
        let snapshot = self.game.snapshot();
        if let Some(store) = self.store.as_mut()
            && let Err(e) = persist::save_state(store, &snapshot)
        {
            warn!("Failed to save game state: {e}");
        }
    }
}
