#![no_main]

//! Move sequence fuzzer.
//!
//! Builds a board from fuzzer-chosen exponents, then applies a sequence of
//! moves with scripted spawns and checks every transition:
//! 1. Cells stay empty or powers of two
//! 2. Score and best score never drop
//! 3. Rejected moves leave the state untouched
//! 4. Tile sum grows only by the spawned tile

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use twenty48::game::{check_transition, ScriptedSpawn};
use twenty48::{Board, Direction, Game, ScriptedSource};

/// Structured input for move fuzzing.
#[derive(Arbitrary, Debug)]
struct MoveInput {
    /// Tile exponents; 0 is an empty cell, anything else is reduced to 1..=20.
    exponents: [[u8; 4]; 4],
    /// Starting score.
    score: u32,
    /// Move codes, reduced modulo 4.
    moves: Vec<u8>,
    /// Spawn choices as (cell index, spawn a 4).
    spawns: Vec<(u8, bool)>,
}

fuzz_target!(|input: MoveInput| {
    let cells = input.exponents.map(|row| {
        row.map(|exp| if exp == 0 { 0 } else { 1u32 << (u32::from(exp) % 20 + 1) })
    });
    let Ok(board) = Board::from_rows(cells) else {
        panic!("Generated board rejected: {cells:?}");
    };

    let script = input
        .spawns
        .iter()
        .take(64)
        .map(|&(cell, four)| ScriptedSpawn { cell: usize::from(cell), four })
        .collect();
    let mut game = Game::resume(ScriptedSource::new(script), board, input.score, input.score);

    for code in input.moves.into_iter().take(256) {
        let Ok(direction) = Direction::try_from(code % 4) else {
            unreachable!("codes below 4 are directions");
        };

        let before = game.snapshot();
        let outcome = game.apply_move(direction);
        let after = game.snapshot();

        let violations = check_transition(&before, &after, &outcome);
        assert!(
            violations.is_empty(),
            "Invariants violated after {direction}: {violations:?}"
        );
    }
});
