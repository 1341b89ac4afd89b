//! Output formatting utilities for CLI.

use serde::Serialize;
use twenty48::autoplay::{PlayoutSummary, Strategy};
use twenty48::{GameStatus, Snapshot};

/// Short label for a status.
pub(super) const fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::InProgress => "in progress",
        GameStatus::Over => "game over",
    }
}

/// Format a game state as human-readable text.
pub(super) fn format_snapshot_text(snapshot: &Snapshot) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Score: {}  Best: {}  ({})\n",
        snapshot.score,
        snapshot.best_score,
        status_label(snapshot.status)
    ));
    output.push_str(&snapshot.board.to_string());

    output
}

/// Format an autoplay result as human-readable text.
pub(super) fn format_playout_text(
    seed: u64,
    strategy: &str,
    summary: &PlayoutSummary,
    snapshot: &Snapshot,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Autoplay Result (seed: {seed}, strategy: {strategy})\n"));
    output.push_str(&format!("  Moves: {}\n", summary.moves));
    output.push_str(&format!("  Score: {}\n", summary.score));
    output.push_str(&format!("  Max tile: {}\n", summary.max_tile));
    if summary.finished {
        output.push_str("  Ended: no moves left\n");
    } else {
        output.push_str("  Ended: move limit reached\n");
    }
    output.push('\n');

    for line in snapshot.board.to_string().lines() {
        output.push_str("  ");
        output.push_str(line);
        output.push('\n');
    }

    output
}

/// JSON-serializable autoplay result.
#[derive(Debug, Serialize)]
pub(super) struct JsonPlayout {
    /// Seed behind tile spawns.
    pub(super) seed: u64,
    /// Strategy used.
    pub(super) strategy: Strategy,
    /// Moves, score, max tile and whether the game ended.
    #[serde(flatten)]
    pub(super) summary: PlayoutSummary,
    /// Final state.
    pub(super) final_state: Snapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use twenty48::Board;

    fn snapshot() -> Snapshot {
        Snapshot {
            board: Board::from_rows([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 128]]).unwrap(),
            score: 300,
            best_score: 1000,
            status: GameStatus::InProgress,
        }
    }

    #[test]
    fn test_snapshot_text() {
        let text = format_snapshot_text(&snapshot());
        assert!(text.starts_with("Score: 300  Best: 1000  (in progress)\n"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("128"));
    }

    #[test]
    fn test_playout_text() {
        let summary = PlayoutSummary {
            moves: 42,
            score: 300,
            max_tile: 128,
            finished: true,
        };
        let text = format_playout_text(7, "greedy", &summary, &snapshot());
        assert!(text.contains("seed: 7"));
        assert!(text.contains("strategy: greedy"));
        assert!(text.contains("Moves: 42"));
        assert!(text.contains("no moves left"));
    }

    #[test]
    fn test_playout_json_is_flat() {
        let playout = JsonPlayout {
            seed: 7,
            strategy: Strategy::Random,
            summary: PlayoutSummary {
                moves: 3,
                score: 8,
                max_tile: 8,
                finished: false,
            },
            final_state: snapshot(),
        };
        let json: serde_json::Value = serde_json::to_value(&playout).unwrap();
        assert_eq!(json["seed"], 7);
        assert_eq!(json["strategy"], "random");
        assert_eq!(json["moves"], 3);
        assert_eq!(json["final_state"]["status"], "InProgress");
        assert_eq!(json["final_state"]["board"][3][3], 128);
    }
}
