//! Match runner for playing a game between two move providers

use chess_core::{move_to_coordinate, GameState, MoveProvider, Orientation, Player};
use tracing::{info, warn};

use crate::record::{GameRecord, Outcome, Side};

/// Configuration for a game
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Maximum half-moves before the game is abandoned
    pub max_moves: u32,
    /// Side to move first when starting from the initial position
    pub first: Player,
    /// Engine workers only play on `Standard` boards.
    pub orientation: Orientation,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_moves: 300,
            first: Player::White,
            orientation: Orientation::Standard,
        }
    }
}

/// Runs games between two providers
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    /// Play a game from the initial position.
    pub fn play_game(
        &self,
        white: &mut dyn MoveProvider,
        black: &mut dyn MoveProvider,
    ) -> GameRecord {
        let game = GameState::new(self.config.first, self.config.orientation);
        self.play_from(game, white, black)
    }

    /// Play `game` to the end, the move cap, or until a provider has no move.
    pub fn play_from(
        &self,
        mut game: GameState,
        white: &mut dyn MoveProvider,
        black: &mut dyn MoveProvider,
    ) -> GameRecord {
        white.new_game();
        black.new_game();
        let mut record = GameRecord::new(white.name(), black.name(), game.state_string());

        for _ in 0..self.config.max_moves {
            if game.is_game_over() {
                break;
            }

            let mover = game.current_player();
            let Some(side) = Side::from_player(mover) else {
                break;
            };
            let provider: &mut dyn MoveProvider = match side {
                Side::White => &mut *white,
                Side::Black => &mut *black,
            };

            let Some(mv) = provider.request_move(&game) else {
                // No legal move, a timeout, or an unusable answer: resign.
                warn!(player = %mover, provider = provider.name(), "no move produced");
                record.outcome = Outcome::NoMove { side };
                return record;
            };

            if let Err(e) = game.make_move(mv) {
                warn!(error = %e, "move rejected");
                break;
            }

            let coordinate = move_to_coordinate(&mv);
            info!(
                ply = record.moves.len() + 1,
                player = %mover,
                mv = %coordinate,
                state = %game.state_string(),
                "move played"
            );
            record.push(side, coordinate, game.state_string());
        }

        record.outcome = match game.result() {
            Some(result) => Outcome::from_result(result),
            None => Outcome::MoveLimit,
        };
        info!(outcome = %record.outcome, plies = record.moves.len(), "game finished");
        record
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
