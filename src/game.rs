//! Board engine.
//!
//! Implements the sliding-tile rules:
//! - Board with validated power-of-two cells
//! - Line slide and merge, non-chaining within a move
//! - Move acceptance, scoring and random spawning
//! - Terminal detection and restart

mod board;
mod direction;
mod invariants;
mod rng;
mod state;

pub use board::{is_valid_cell, slide_line, Board, Cells, Coord, SIZE};
pub use direction::Direction;
pub use invariants::{assert_invariants, check_invariants, check_transition, InvariantViolation};
pub use rng::{ScriptedSource, ScriptedSpawn, TileSource, FOUR_PROBABILITY};
pub use state::{Game, GameStatus, MoveOutcome, Snapshot, Spawn, START_TILES};
