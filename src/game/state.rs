//! Game state management.

use crate::game::{assert_invariants, Board, Coord, Direction, TileSource};
use log::debug;
use serde::{Deserialize, Serialize};

/// Number of tiles placed on a fresh board.
pub const START_TILES: usize = 2;

/// Whether the game can still be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// At least one move changes the board.
    #[default]
    InProgress,
    /// The board is full and has no adjacent equal pair.
    Over,
}

/// A tile placed by the random source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    /// Where the tile landed.
    pub coord: Coord,
    /// Tile value, 2 or 4.
    pub value: u32,
}

/// What a single move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Whether the board changed. A rejected move touches nothing.
    pub moved: bool,
    /// Score gained from merges.
    pub score_gained: u32,
    /// The tile spawned after an accepted move.
    pub spawned: Option<Spawn>,
    /// Status after the move.
    pub status: GameStatus,
}

/// Plain-data copy of everything a front end needs to draw the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The grid.
    pub board: Board,
    /// Current score.
    pub score: u32,
    /// Best score seen, never below `score`.
    pub best_score: u32,
    /// Current status.
    pub status: GameStatus,
}

/// The move engine for one game session.
///
/// Owns the board, the scores and the random source. Every operation runs
/// to completion synchronously; callers serialize moves.
#[derive(Debug, Clone)]
pub struct Game<R> {
    board: Board,
    score: u32,
    best_score: u32,
    status: GameStatus,
    source: R,
}

impl<R: TileSource> Game<R> {
    /// Start a new game with two random tiles.
    #[must_use]
    pub fn new(source: R) -> Self {
        Self::with_best_score(source, 0)
    }

    /// Start a new game carrying over a best score from earlier sessions.
    #[must_use]
    pub fn with_best_score(source: R, best_score: u32) -> Self {
        let mut game = Self {
            board: Board::empty(),
            score: 0,
            best_score,
            status: GameStatus::InProgress,
            source,
        };
        game.fill_start_tiles();
        game
    }

    /// Rebuild a game from persisted data.
    ///
    /// The best score is raised to at least `score`, and the status is
    /// derived from the board.
    #[must_use]
    pub fn resume(source: R, board: Board, score: u32, best_score: u32) -> Self {
        let status = if board.is_terminal() {
            GameStatus::Over
        } else {
            GameStatus::InProgress
        };

        Self {
            board,
            score,
            best_score: best_score.max(score),
            status,
            source,
        }
    }

    /// The current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// The best score, including the current game.
    #[must_use]
    pub const fn best_score(&self) -> u32 {
        self.best_score
    }

    /// The current status.
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::Over
    }

    /// Copy out the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board,
            score: self.score,
            best_score: self.best_score,
            status: self.status,
        }
    }

    /// Slide all tiles toward `direction`.
    ///
    /// If nothing moves, the call is a no-op: no score, no spawn, status
    /// untouched. Otherwise the new board is committed, the merge score is
    /// added, one tile spawns and the status is re-evaluated.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let (next, gained) = self.board.slide(direction);

        if next == self.board {
            return MoveOutcome {
                moved: false,
                score_gained: 0,
                spawned: None,
                status: self.status,
            };
        }

        self.board = next;
        self.add_score(gained);
        let spawned = self.spawn_random_tile();
        self.refresh_status();
        assert_invariants(&self.snapshot());

        debug!(
            "move {direction}: +{gained} (score {}), spawned {spawned:?}, {:?}",
            self.score, self.status
        );

        MoveOutcome {
            moved: true,
            score_gained: gained,
            spawned,
            status: self.status,
        }
    }

    /// Slide toward row 0.
    pub fn move_up(&mut self) -> MoveOutcome {
        self.apply_move(Direction::Up)
    }

    /// Slide toward the last row.
    pub fn move_down(&mut self) -> MoveOutcome {
        self.apply_move(Direction::Down)
    }

    /// Slide toward column 0.
    pub fn move_left(&mut self) -> MoveOutcome {
        self.apply_move(Direction::Left)
    }

    /// Slide toward the last column.
    pub fn move_right(&mut self) -> MoveOutcome {
        self.apply_move(Direction::Right)
    }

    /// Place a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
    ///
    /// Returns `None` and leaves the board alone when it is full. Status is
    /// not re-evaluated here; [`Game::apply_move`] does that after spawning.
    pub fn spawn_random_tile(&mut self) -> Option<Spawn> {
        let empty = self.board.empty_count();
        if empty == 0 {
            return None;
        }

        let index = self.source.pick_cell(empty).min(empty - 1);
        let value = if self.source.pick_four() { 4 } else { 2 };
        let coord = self.board.empty_cells().nth(index)?;
        self.board.set(coord, value);

        Some(Spawn { coord, value })
    }

    /// Whether no move can change the board.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.board.is_terminal()
    }

    /// Which directions would change the board, in [`Direction::ALL`] order.
    #[must_use]
    pub fn legal_moves(&self) -> [bool; 4] {
        Direction::ALL.map(|direction| self.board.can_slide(direction))
    }

    /// Start over: empty board with two tiles, score 0. Best score is kept.
    pub fn restart(&mut self) {
        self.board = Board::empty();
        self.score = 0;
        self.status = GameStatus::InProgress;
        self.fill_start_tiles();
        debug!("restart, best score {}", self.best_score);
    }

    fn fill_start_tiles(&mut self) {
        for _ in 0..START_TILES {
            let _ = self.spawn_random_tile();
        }
    }

    fn add_score(&mut self, gained: u32) {
        self.score = self.score.saturating_add(gained);
        if self.score > self.best_score {
            self.best_score = self.score;
        }
    }

    fn refresh_status(&mut self) {
        if self.status == GameStatus::InProgress && self.board.is_terminal() {
            self.status = GameStatus::Over;
        }
    }
}
