// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Twenty48: a deterministic move engine for the 2048 sliding-tile puzzle.
//!
//! The engine is pure logic over a 4×4 board:
//! - Slide and merge lines toward one of four directions
//! - Reject moves that change nothing
//! - Spawn a 2 or 4 from an injected random source after each accepted move
//! - Detect the terminal board
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Front end (TUI, autoplay, ...)    │
//! ├─────────────────────────────────────┤
//! │      Session (engine + store)       │
//! ├──────────────────┬──────────────────┤
//! │   Board engine   │   Key-value      │
//! │   (game)         │   store (persist)│
//! └──────────────────┴──────────────────┘
//! ```

pub mod autoplay;
pub mod error;
pub mod game;
pub mod persist;
pub mod session;

pub use error::{EngineError, PersistError, PersistResult};

// Re-export key game types at crate root for convenience
pub use game::{
    Board, Coord, Direction, Game, GameStatus, MoveOutcome, ScriptedSource, Snapshot, Spawn,
    TileSource,
};
pub use session::Session;
