use chess_core::{resolve_coordinate_move, Move};
use random_engine::RandomEngine;

use super::*;

/// Plays a fixed list of coordinate moves, then runs dry.
struct Scripted {
    moves: Vec<&'static str>,
    next: usize,
}

impl Scripted {
    fn new(moves: Vec<&'static str>) -> Self {
        Self { moves, next: 0 }
    }
}

impl MoveProvider for Scripted {
    fn request_move(&mut self, game: &GameState) -> Option<Move> {
        let txt = self.moves.get(self.next)?;
        self.next += 1;
        resolve_coordinate_move(game, txt)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[test]
fn test_random_self_play_completes() {
    let mut white = RandomEngine::with_seed(1);
    let mut black = RandomEngine::with_seed(2);

    let config = MatchConfig {
        max_moves: 40,
        ..Default::default()
    };
    let record = MatchRunner::new(config).play_game(&mut white, &mut black);

    assert!(record.moves.len() <= 40);
    assert_eq!(record.white, "Random v1.0");
    if record.moves.len() < 40 {
        assert_ne!(record.outcome, Outcome::MoveLimit);
    }
    // Plies alternate starting with White
    for (i, mv) in record.moves.iter().enumerate() {
        let expected = if i % 2 == 0 { Side::White } else { Side::Black };
        assert_eq!(mv.side, expected);
    }
}

#[test]
fn test_move_limit() {
    let mut white = Scripted::new(vec!["g1f3", "f3g1"]);
    let mut black = Scripted::new(vec!["g8f6", "f6g8"]);
    let config = MatchConfig {
        max_moves: 3,
        ..Default::default()
    };
    let record = MatchRunner::new(config).play_game(&mut white, &mut black);

    assert_eq!(record.moves.len(), 3);
    assert_eq!(record.outcome, Outcome::MoveLimit);
    assert_eq!(record.moves[0].mv, "g1f3");
}

#[test]
fn test_checkmate_is_recorded() {
    let mut white = Scripted::new(vec!["f2f3", "g2g4"]);
    let mut black = Scripted::new(vec!["e7e5", "d8h4"]);
    let record = MatchRunner::new(MatchConfig::default()).play_game(&mut white, &mut black);

    assert_eq!(record.outcome, Outcome::Checkmate { winner: Side::Black });
    assert_eq!(record.moves.len(), 4);
    assert_eq!(record.outcome.score(), "0-1");
}

#[test]
fn test_provider_without_move_resigns() {
    let mut white = Scripted::new(vec!["e2e4"]);
    let mut black = Scripted::new(vec!["e7e5"]);
    let record = MatchRunner::new(MatchConfig::default()).play_game(&mut white, &mut black);

    assert_eq!(record.moves.len(), 2);
    assert_eq!(record.outcome, Outcome::NoMove { side: Side::White });
    assert_eq!(record.outcome.winner(), Some(Side::Black));
}

#[test]
fn test_play_from_custom_start() {
    let game = GameState::from_state_string("6k1/5ppp/8/8/8/8/8/R5K1 w - -", Orientation::Standard)
        .unwrap();
    let mut white = Scripted::new(vec!["a1a8"]);
    let mut black = RandomEngine::with_seed(3);
    let record = MatchRunner::new(MatchConfig::default()).play_from(game, &mut white, &mut black);

    assert_eq!(record.start, "6k1/5ppp/8/8/8/8/8/R5K1 w - -");
    assert_eq!(record.outcome, Outcome::Checkmate { winner: Side::White });
}
