//! JSON record of a played game.

use std::fmt;
use std::path::Path;

use chess_core::{EndReason, GameResult, Player};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("record i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn from_player(player: Player) -> Option<Side> {
        match player {
            Player::White => Some(Side::White),
            Player::Black => Some(Side::Black),
            Player::None => None,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

/// How a recorded game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    InProgress,
    Checkmate { winner: Side },
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
    /// The side to move got no move from its provider and resigns.
    NoMove { side: Side },
    /// The half-move cap was reached without a result.
    MoveLimit,
}

impl Outcome {
    pub fn from_result(result: GameResult) -> Outcome {
        match result.reason {
            EndReason::Checkmate => match Side::from_player(result.winner) {
                Some(winner) => Outcome::Checkmate { winner },
                None => Outcome::InProgress,
            },
            EndReason::Stalemate => Outcome::Stalemate,
            EndReason::FiftyMoveRule => Outcome::FiftyMoveRule,
            EndReason::InsufficientMaterial => Outcome::InsufficientMaterial,
            EndReason::ThreefoldRepetition => Outcome::ThreefoldRepetition,
        }
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            Outcome::NoMove { side } => Some(side.opponent()),
            _ => None,
        }
    }

    /// Score in the usual `1-0` / `0-1` / `1/2-1/2` form, `*` if unfinished.
    pub fn score(self) -> &'static str {
        match (self, self.winner()) {
            (_, Some(Side::White)) => "1-0",
            (_, Some(Side::Black)) => "0-1",
            (Outcome::InProgress | Outcome::MoveLimit, None) => "*",
            _ => "1/2-1/2",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Outcome::InProgress => "in progress",
            Outcome::Checkmate { .. } => "checkmate",
            Outcome::Stalemate => "stalemate",
            Outcome::FiftyMoveRule => "fifty-move rule",
            Outcome::InsufficientMaterial => "insufficient material",
            Outcome::ThreefoldRepetition => "threefold repetition",
            Outcome::NoMove { .. } => "no move produced",
            Outcome::MoveLimit => "move limit reached",
        };
        write!(f, "{} ({})", self.score(), reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMove {
    pub ply: u32,
    pub side: Side,
    /// Coordinate notation, e.g. `e2e4`
    pub mv: String,
    /// State string after the move
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub white: String,
    pub black: String,
    pub start: String,
    pub moves: Vec<RecordedMove>,
    pub outcome: Outcome,
}

impl GameRecord {
    pub fn new(white: &str, black: &str, start: &str) -> Self {
        Self {
            white: white.to_string(),
            black: black.to_string(),
            start: start.to_string(),
            moves: Vec::new(),
            outcome: Outcome::InProgress,
        }
    }

    pub fn push(&mut self, side: Side, mv: String, state: &str) {
        self.moves.push(RecordedMove {
            ply: self.moves.len() as u32 + 1,
            side,
            mv,
            state: state.to_string(),
        });
    }

    /// Save record to JSON file
    pub fn save(&self, path: &Path) -> Result<(), RecordError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load record from JSON file
    pub fn load(path: &Path) -> Result<Self, RecordError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod record_tests;
