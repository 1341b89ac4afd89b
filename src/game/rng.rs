//! Random sources for tile spawning.
//!
//! The engine never touches an RNG directly; it asks a [`TileSource`] where
//! to put the next tile and whether it is a 4. Any `rand` generator works as
//! a source, and [`ScriptedSource`] replays a fixed sequence for tests.

use rand::{Rng, RngCore};

/// Probability that a spawned tile is a 4 rather than a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Supplies the random choices behind a tile spawn.
pub trait TileSource {
    /// Pick an index in `0..empty`. Only called with `empty > 0`.
    fn pick_cell(&mut self, empty: usize) -> usize;

    /// Whether the next spawned tile is a 4.
    fn pick_four(&mut self) -> bool;
}

impl<R: RngCore> TileSource for R {
    fn pick_cell(&mut self, empty: usize) -> usize {
        self.gen_range(0..empty)
    }

    fn pick_four(&mut self) -> bool {
        self.gen_bool(FOUR_PROBABILITY)
    }
}

/// One scripted spawn decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedSpawn {
    /// Index into the row-major list of empty cells, reduced modulo its length.
    pub cell: usize,
    /// Spawn a 4 instead of a 2.
    pub four: bool,
}

impl ScriptedSpawn {
    /// A 2 in the `cell`-th empty cell.
    #[must_use]
    pub const fn two(cell: usize) -> Self {
        Self { cell, four: false }
    }

    /// A 4 in the `cell`-th empty cell.
    #[must_use]
    pub const fn four(cell: usize) -> Self {
        Self { cell, four: true }
    }
}

/// Deterministic source that cycles through a fixed list of spawns.
///
/// An empty script always picks the first empty cell and spawns a 2.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: Vec<ScriptedSpawn>,
    next_cell: usize,
    next_value: usize,
}

impl ScriptedSource {
    /// Create a source replaying `script` in order, wrapping around.
    #[must_use]
    pub fn new(script: Vec<ScriptedSpawn>) -> Self {
        Self {
            script,
            next_cell: 0,
            next_value: 0,
        }
    }

    /// Source that always spawns a 2 in the first empty cell.
    #[must_use]
    pub fn first_cell() -> Self {
        Self::default()
    }
}

impl TileSource for ScriptedSource {
    fn pick_cell(&mut self, empty: usize) -> usize {
        if self.script.is_empty() {
            return 0;
        }
        let spawn = self.script[self.next_cell % self.script.len()];
        self.next_cell = self.next_cell.wrapping_add(1);
        spawn.cell % empty
    }

    fn pick_four(&mut self) -> bool {
        if self.script.is_empty() {
            return false;
        }
        let spawn = self.script[self.next_value % self.script.len()];
        self.next_value = self.next_value.wrapping_add(1);
        spawn.four
    }
}
