//! End-to-end games against an in-memory engine stub.

use std::io::Cursor;
use std::time::Duration;

use chess_core::{resolve_coordinate_move, GameState, Move, MoveProvider};
use random_engine::RandomEngine;
use uci_engine::{
    Difficulty, EngineWorker, GameRecord, MatchConfig, MatchRunner, Outcome, Side, UciSession,
};

/// Engine whose whole output is fixed up front.
fn stub_engine(output: &str) -> EngineWorker {
    let session = UciSession::new(
        Cursor::new(output.as_bytes().to_vec()),
        Vec::new(),
        Difficulty::Easy.options(),
    );
    EngineWorker::start("stub", session, Duration::from_secs(5)).unwrap()
}

struct Script(Vec<&'static str>);

impl MoveProvider for Script {
    fn request_move(&mut self, game: &GameState) -> Option<Move> {
        if self.0.is_empty() {
            return None;
        }
        let txt = self.0.remove(0);
        resolve_coordinate_move(game, txt)
    }

    fn name(&self) -> &str {
        "script"
    }
}

#[test]
fn engine_delivers_fools_mate() {
    let mut white = Script(vec!["f2f3", "g2g4"]);
    let mut black = stub_engine("id name stub\nbestmove e7e5\ninfo depth 3\nbestmove d8h4 ponder a2a3\n");

    let record = MatchRunner::new(MatchConfig::default()).play_game(&mut white, &mut black);

    assert_eq!(record.black, "stub");
    assert_eq!(record.outcome, Outcome::Checkmate { winner: Side::Black });
    let played: Vec<&str> = record.moves.iter().map(|m| m.mv.as_str()).collect();
    assert_eq!(played, ["f2f3", "e7e5", "g2g4", "d8h4"]);
}

#[test]
fn engine_going_silent_loses_the_game() {
    let mut white = stub_engine("bestmove e2e4\n");
    let mut black = RandomEngine::with_seed(11);

    let record = MatchRunner::new(MatchConfig::default()).play_game(&mut white, &mut black);

    assert_eq!(record.moves.len(), 2);
    assert_eq!(record.moves[0].mv, "e2e4");
    assert_eq!(record.outcome, Outcome::NoMove { side: Side::White });
    assert_eq!(record.outcome.score(), "0-1");
}

#[test]
fn engine_reporting_no_move_is_not_played() {
    let mut white = stub_engine("bestmove (none)\n");
    let mut black = RandomEngine::with_seed(5);

    let record = MatchRunner::new(MatchConfig::default()).play_game(&mut white, &mut black);

    assert!(record.moves.is_empty());
    assert_eq!(record.outcome, Outcome::NoMove { side: Side::White });
}

#[test]
fn record_survives_a_save_and_load() {
    let mut white = RandomEngine::with_seed(21);
    let mut black = RandomEngine::with_seed(22);
    let config = MatchConfig {
        max_moves: 12,
        ..Default::default()
    };
    let record = MatchRunner::new(config).play_game(&mut white, &mut black);

    let path = std::env::temp_dir().join(format!("bridge_record_{}.json", std::process::id()));
    record.save(&path).unwrap();
    let loaded = GameRecord::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(loaded, record);
}
