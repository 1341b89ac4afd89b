//! Integration tests for sessions backed by the file store.
//!
//! These tests play real games through [`Session`] and check that saved state
//! survives reopening the data directory.
//!
//! Run with: cargo test --release session_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tempfile::TempDir;

use twenty48::autoplay::{play_out, Strategy};
use twenty48::persist::{self, FileStore, KeyValueStore, BEST_SCORE_KEY, STATE_KEY};
use twenty48::{Direction, GameStatus, Session};

fn open(dir: &TempDir, seed: u64) -> Session<ChaCha8Rng, FileStore> {
    let store = FileStore::open(dir.path()).unwrap();
    Session::open(ChaCha8Rng::seed_from_u64(seed), store)
}

/// Make up to `count` accepted moves, cycling through the directions.
fn play_some(session: &mut Session<ChaCha8Rng, FileStore>, count: usize) {
    let mut made = 0;
    for direction in Direction::ALL.into_iter().cycle().take(count * 4) {
        if made == count || session.game().is_over() {
            break;
        }
        if session.apply(direction).moved {
            made += 1;
        }
    }
}

#[test]
fn test_game_resumes_after_reopen() {
    let dir = TempDir::new().unwrap();

    let mut session = open(&dir, 1);
    play_some(&mut session, 20);
    let played = session.snapshot();
    drop(session);

    // A different seed only affects future spawns
    let resumed = open(&dir, 99).snapshot();
    assert_eq!(resumed.board, played.board);
    assert_eq!(resumed.score, played.score);
    assert_eq!(resumed.best_score, played.best_score);
    assert_eq!(resumed.status, played.status);
}

#[test]
fn test_saved_files_are_json() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir, 2);
    play_some(&mut session, 5);
    let snapshot = session.snapshot();
    drop(session);

    let raw = std::fs::read_to_string(dir.path().join(format!("{STATE_KEY}.json"))).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["score"], snapshot.score);
    assert_eq!(json["bestScore"], snapshot.best_score);
    assert_eq!(json["grid"].as_array().unwrap().len(), 4);

    let best = std::fs::read_to_string(dir.path().join(format!("{BEST_SCORE_KEY}.json"))).unwrap();
    assert_eq!(best, snapshot.best_score.to_string());
}

#[test]
fn test_corrupt_save_starts_fresh() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(format!("{STATE_KEY}.json")), "{\"grid\": 7").unwrap();
    std::fs::write(dir.path().join(format!("{BEST_SCORE_KEY}.json")), "2048").unwrap();

    let session = open(&dir, 3);
    let snapshot = session.snapshot();

    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.best_score, 2048);
    assert_eq!(snapshot.board.tile_count(), 2);
    assert_eq!(snapshot.status, GameStatus::InProgress);
}

#[test]
fn test_finished_game_then_restart_keeps_best() {
    let dir = TempDir::new().unwrap();
    let session = open(&dir, 4);

    // Drive the engine to the end, then hand it back to a session on the
    // same store so the final state is saved
    let (mut game, store) = session.into_parts();
    let mut chooser = ChaCha8Rng::seed_from_u64(5);
    let summary = play_out(&mut game, Strategy::Greedy, &mut chooser, u32::MAX);
    assert!(summary.finished);
    let mut store = store.unwrap();
    persist::save_state(&mut store, &game.snapshot()).unwrap();

    let mut session = open(&dir, 6);
    let over = session.snapshot();
    assert_eq!(over.status, GameStatus::Over);
    assert_eq!(over.score, summary.score);
    assert_eq!(over.best_score, summary.score);

    // No move is accepted once the game is over
    for direction in Direction::ALL {
        assert!(!session.apply(direction).moved);
    }

    session.restart();
    let fresh = session.snapshot();
    assert_eq!(fresh.score, 0);
    assert_eq!(fresh.best_score, summary.score);
    assert_eq!(fresh.status, GameStatus::InProgress);
    drop(session);

    let store = FileStore::open(dir.path()).unwrap();
    assert_eq!(persist::load_best_score(&store), summary.score);
}

#[test]
fn test_reset_keeps_best_score() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir, 7);
    play_some(&mut session, 30);
    let best = session.snapshot().best_score;
    drop(session);

    let mut store = FileStore::open(dir.path()).unwrap();
    persist::clear_state(&mut store).unwrap();
    assert_eq!(store.get(STATE_KEY).unwrap(), None);

    let session = open(&dir, 8);
    assert_eq!(session.snapshot().score, 0);
    assert_eq!(session.snapshot().best_score, best);
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let dir = TempDir::new().unwrap();
        let mut session = open(&dir, seed);
        play_some(&mut session, 50);
        session.snapshot()
    };

    assert_eq!(play(10), play(10));
}
