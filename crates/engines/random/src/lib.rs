//! Random Move Provider
//!
//! Picks a move uniformly at random from all legal moves of the side to move.
//! Useful for:
//! - Driving games when no external engine is installed
//! - Baseline opponent for engine matches
//! - Stress testing move generation and termination rules

use chess_core::{GameState, Move, MoveProvider};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;


/// A move provider that plays random legal moves.
///
/// There is no evaluation at all; it is the simplest possible opponent and
/// the fallback when the external engine cannot be started.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
    moves_played: u64,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            moves_played: 0,
        }
    }

    /// Reproducible move sequence for tests and recorded matches.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            moves_played: 0,
        }
    }

    pub fn moves_played(&self) -> u64 {
        self.moves_played
    }
}

impl MoveProvider for RandomEngine {
    fn request_move(&mut self, game: &GameState) -> Option<Move> {
        if game.is_game_over() {
            return None;
        }

        let moves = game.all_legal_moves_for(game.current_player());
        let choice = moves.choose(&mut self.rng).copied();
        if choice.is_some() {
            self.moves_played += 1;
        }
        choice
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }

    fn new_game(&mut self) {
        self.moves_played = 0;
    }
}
