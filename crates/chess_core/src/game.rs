//! Turn and termination tracking for a single game.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::{
    board::Board,
    moves::Move,
    state_string::{StateError, StateString},
    types::*,
};

/// Half-moves without capture or pawn move that end the game.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Occurrences of one position that end the game.
pub const REPETITION_LIMIT: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    Checkmate,
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

/// How a game ended. `winner` is [`Player::None`] for draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Player,
    pub reason: EndReason,
}

impl GameResult {
    pub fn win(winner: Player) -> Self {
        Self {
            winner,
            reason: EndReason::Checkmate,
        }
    }

    pub fn draw(reason: EndReason) -> Self {
        Self {
            winner: Player::None,
            reason,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("game is already over ({0:?})")]
    GameOver(EndReason),
    #[error(transparent)]
    State(#[from] StateError),
}

/// The authoritative game: one board, whose turn it is, draw counters and
/// the repetition history.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    current_player: Player,
    result: Option<GameResult>,
    no_capture_or_pawn_moves: u32,
    state_string: String,
    state_history: HashMap<String, u32>,
}

impl GameState {
    /// New game from the initial position with `first` to move.
    pub fn new(first: Player, orientation: Orientation) -> Self {
        Self::from_board(Board::initial(orientation), first)
    }

    /// Start from an arbitrary board. The board is taken as the first entry
    /// of the repetition history.
    pub fn from_board(board: Board, current_player: Player) -> Self {
        let state_string = StateString::new(current_player, &board).into_string();
        let mut state_history = HashMap::new();
        state_history.insert(state_string.clone(), 1);
        Self {
            board,
            current_player,
            result: None,
            no_capture_or_pawn_moves: 0,
            state_string,
            state_history,
        }
    }

    /// Start from a serialized position (see [`StateString::parse`]).
    pub fn from_state_string(text: &str, orientation: Orientation) -> Result<Self, GameError> {
        let (board, side) = StateString::parse(text, orientation)?;
        Ok(Self::from_board(board, side))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    pub fn state_string(&self) -> &str {
        &self.state_string
    }

    pub fn no_progress_halfmoves(&self) -> u32 {
        self.no_capture_or_pawn_moves
    }

    /// How often `state` has been seen since the last irreversible move.
    pub fn repetition_count(&self, state: &str) -> u32 {
        self.state_history.get(state).copied().unwrap_or(0)
    }

    /// Legal moves for the piece on `pos`. Empty when the square is empty or
    /// holds a piece of the side not to move.
    pub fn legal_moves_for_piece(&self, pos: Position) -> Vec<Move> {
        if !Board::is_inside(pos) {
            return Vec::new();
        }
        match self.board[pos] {
            Some(piece) if piece.color == self.current_player => piece
                .pseudo_moves(pos, &self.board)
                .into_iter()
                .filter(|mv| mv.is_legal(&self.board))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn all_legal_moves_for(&self, player: Player) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        for pos in self.board.piece_positions_for(player) {
            if let Some(piece) = self.board[pos] {
                piece.pseudo_moves_into(pos, &self.board, &mut out);
            }
        }
        out.retain(|mv| mv.is_legal(&self.board));
        out
    }

    fn has_any_legal_move(&self, player: Player) -> bool {
        self.board.piece_positions_for(player).any(|pos| match self.board[pos] {
            Some(piece) => piece
                .pseudo_moves(pos, &self.board)
                .iter()
                .any(|mv| mv.is_legal(&self.board)),
            None => false,
        })
    }

    /// Play `mv` for the side to move. The move is trusted to come from
    /// [`GameState::legal_moves_for_piece`].
    pub fn make_move(&mut self, mv: Move) -> Result<(), GameError> {
        if let Some(result) = self.result {
            return Err(GameError::GameOver(result.reason));
        }

        self.board.set_pawn_skip_position(self.current_player, None);
        let capture_or_pawn = mv.execute(&mut self.board);

        if capture_or_pawn {
            self.no_capture_or_pawn_moves = 0;
            // Nothing before an irreversible move can recur.
            self.state_history.clear();
        } else {
            self.no_capture_or_pawn_moves += 1;
        }

        self.current_player = self.current_player.opponent();
        self.update_state_string();
        self.result = self.evaluate_result();

        if let Some(result) = self.result {
            debug!(?result, state = %self.state_string, "game over");
        }
        Ok(())
    }

    fn update_state_string(&mut self) {
        self.state_string = StateString::new(self.current_player, &self.board).into_string();
        *self.state_history.entry(self.state_string.clone()).or_insert(0) += 1;
    }

    /// First matching condition wins: mate and stalemate outrank the drawing
    /// rules, so a mating move is never scored as a draw.
    fn evaluate_result(&self) -> Option<GameResult> {
        if !self.has_any_legal_move(self.current_player) {
            return Some(if self.board.is_in_check(self.current_player) {
                GameResult::win(self.current_player.opponent())
            } else {
                GameResult::draw(EndReason::Stalemate)
            });
        }

        if self.board.insufficient_material() {
            return Some(GameResult::draw(EndReason::InsufficientMaterial));
        }

        if self.repetition_count(&self.state_string) == REPETITION_LIMIT {
            return Some(GameResult::draw(EndReason::ThreefoldRepetition));
        }

        if self.no_capture_or_pawn_moves / 2 == FIFTY_MOVE_HALFMOVES / 2 {
            return Some(GameResult::draw(EndReason::FiftyMoveRule));
        }

        None
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
