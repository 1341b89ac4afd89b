#![no_main]

//! Saved state decoder fuzzer.
//!
//! Arbitrary bytes must never panic the loader, and anything it accepts must
//! be a valid board that round-trips.

use libfuzzer_sys::fuzz_target;
use twenty48::game::{check_invariants, is_valid_cell};
use twenty48::persist::SavedState;
use twenty48::{Game, ScriptedSource};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(state) = SavedState::from_json(json) else {
        return;
    };

    assert!(state.grid.rows().iter().flatten().all(|&v| is_valid_cell(v)));

    let game = Game::resume(
        ScriptedSource::first_cell(),
        state.grid,
        state.score,
        state.best_score,
    );
    let violations = check_invariants(&game.snapshot());
    assert!(violations.is_empty(), "Resumed state invalid: {violations:?}");

    if let Ok(encoded) = state.to_json() {
        assert_eq!(SavedState::from_json(&encoded).ok(), Some(state));
    }
});
