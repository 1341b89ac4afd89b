//! Game invariants - sanity checks that detect engine bugs.
//!
//! A correct engine never trips these. Property tests and the fuzz target run
//! them after every move.

use crate::game::{is_valid_cell, GameStatus, MoveOutcome, Snapshot};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check the invariants of a single state.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(snapshot: &Snapshot) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for (row, values) in snapshot.board.rows().iter().enumerate() {
        for (col, &value) in values.iter().enumerate() {
            if !is_valid_cell(value) {
                violations.push(InvariantViolation {
                    message: format!("Cell ({row}, {col}) holds {value}, not a power of two"),
                });
            }
        }
    }

    if snapshot.best_score < snapshot.score {
        violations.push(InvariantViolation {
            message: format!(
                "Best score {} is below score {}",
                snapshot.best_score, snapshot.score
            ),
        });
    }

    let terminal = snapshot.board.is_terminal();
    match snapshot.status {
        GameStatus::Over if !terminal => violations.push(InvariantViolation {
            message: "Game is over but a move is still available".to_string(),
        }),
        GameStatus::InProgress if terminal => violations.push(InvariantViolation {
            message: "Board is terminal but the game is in progress".to_string(),
        }),
        _ => {}
    }

    violations
}

/// Check what a move did against the states on either side of it.
#[must_use]
pub fn check_transition(
    before: &Snapshot,
    after: &Snapshot,
    outcome: &MoveOutcome,
) -> Vec<InvariantViolation> {
    let mut violations = check_invariants(after);

    if after.score < before.score {
        violations.push(InvariantViolation {
            message: format!("Score dropped from {} to {}", before.score, after.score),
        });
    }

    if after.best_score < before.best_score {
        violations.push(InvariantViolation {
            message: format!(
                "Best score dropped from {} to {}",
                before.best_score, after.best_score
            ),
        });
    }

    if !outcome.moved {
        if after != before {
            violations.push(InvariantViolation {
                message: "Rejected move changed the state".to_string(),
            });
        }
        return violations;
    }

    let expected_score = before.score.saturating_add(outcome.score_gained);
    if after.score != expected_score {
        violations.push(InvariantViolation {
            message: format!(
                "Score {} does not match {} + {}",
                after.score, before.score, outcome.score_gained
            ),
        });
    }

    // Merges conserve the tile sum, so only the spawn adds to it
    let spawned = outcome.spawned.map_or(0, |spawn| u64::from(spawn.value));
    if after.board.tile_sum() != before.board.tile_sum() + spawned {
        violations.push(InvariantViolation {
            message: format!(
                "Tile sum went from {} to {} with {spawned} spawned",
                before.board.tile_sum(),
                after.board.tile_sum()
            ),
        });
    }

    if before.status == GameStatus::Over {
        violations.push(InvariantViolation {
            message: "Move accepted after game over".to_string(),
        });
    }

    violations
}

/// Assert all invariants hold for a state, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(snapshot: &Snapshot) {
    let violations = check_invariants(snapshot);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_snapshot: &Snapshot) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Coord, Spawn};

    fn snapshot(cells: [[u32; 4]; 4], score: u32, best_score: u32) -> Snapshot {
        let board = Board::from_rows(cells).unwrap();
        Snapshot {
            board,
            score,
            best_score,
            status: if board.is_terminal() {
                GameStatus::Over
            } else {
                GameStatus::InProgress
            },
        }
    }

    const CHECKERBOARD: [[u32; 4]; 4] = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];

    #[test]
    fn test_valid_state_passes() {
        let state = snapshot([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]], 0, 0);
        assert!(check_invariants(&state).is_empty());

        let over = snapshot(CHECKERBOARD, 100, 200);
        assert!(check_invariants(&over).is_empty());
    }

    #[test]
    fn test_best_below_score_detected() {
        let state = snapshot([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 50, 10);
        let violations = check_invariants(&state);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Best score"));
    }

    #[test]
    fn test_status_mismatch_detected() {
        let mut state = snapshot(CHECKERBOARD, 0, 0);
        state.status = GameStatus::InProgress;
        assert_eq!(check_invariants(&state).len(), 1);

        let mut state = snapshot([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 0, 0);
        state.status = GameStatus::Over;
        let violations = check_invariants(&state);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("over"));
    }

    #[test]
    fn test_transition_accepts_real_move() {
        let before = snapshot([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0, 0);
        let after = snapshot([[4, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 4, 4);
        let outcome = MoveOutcome {
            moved: true,
            score_gained: 4,
            spawned: Some(Spawn {
                coord: Coord::new(0, 1),
                value: 2,
            }),
            status: GameStatus::InProgress,
        };

        let violations = check_transition(&before, &after, &outcome);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_transition_detects_lost_tile() {
        let before = snapshot([[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]], 0, 0);
        let after = snapshot([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 4, 4);
        let outcome = MoveOutcome {
            moved: true,
            score_gained: 4,
            spawned: None,
            status: GameStatus::InProgress,
        };

        let violations = check_transition(&before, &after, &outcome);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Tile sum"));
    }

    #[test]
    fn test_transition_detects_changed_noop() {
        let before = snapshot([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 0, 0);
        let after = snapshot([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 8, 8);
        let outcome = MoveOutcome {
            moved: false,
            score_gained: 0,
            spawned: None,
            status: GameStatus::InProgress,
        };

        let violations = check_transition(&before, &after, &outcome);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Rejected"));
    }

    #[test]
    #[should_panic(expected = "invariant violations")]
    #[cfg(debug_assertions)]
    fn test_assert_invariants_panics() {
        let state = snapshot([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]], 50, 10);
        assert_invariants(&state);
    }
}
