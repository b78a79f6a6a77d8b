//! Canonical one-line position encoding.
//!
//! The format is the first four fields of FEN: placement, side to move,
//! castling rights and en-passant target. It doubles as the repetition key
//! and as the position sent to an external engine.

use std::fmt;

use thiserror::Error;

use crate::{board::Board, types::*};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StateError {
    #[error("expected at least 4 fields, got {0}")]
    MissingFields(usize),
    #[error("expected 8 rows in placement, got {0}")]
    RowCount(usize),
    #[error("row {row} does not describe exactly 8 squares")]
    RowWidth { row: usize },
    #[error("invalid piece letter '{0}'")]
    PieceLetter(char),
    #[error("invalid side to move '{0}'")]
    SideToMove(String),
    #[error("invalid castling field '{0}'")]
    Castling(String),
    #[error("invalid en-passant square '{0}'")]
    EnPassant(String),
}

/// Serialized position. `Display` yields the canonical string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateString(String);

impl StateString {
    /// Rows are written in board order, so only a Standard board yields FEN
    /// as an external engine reads it.
    pub fn new(current_player: Player, board: &Board) -> Self {
        let mut sb = String::with_capacity(64);
        add_piece_placement(&mut sb, board);
        sb.push(' ');
        sb.push(if current_player == Player::White { 'w' } else { 'b' });
        sb.push(' ');
        add_castling_rights(&mut sb, board);
        sb.push(' ');
        add_en_passant(&mut sb, board, current_player);
        Self(sb)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Rebuild a board and side to move from a state string.
    ///
    /// Trailing halfmove/fullmove fields are accepted and ignored. Kings and
    /// rooks count as unmoved only when the matching castling right is
    /// present; pawns count as unmoved on their starting row.
    pub fn parse(text: &str, orientation: Orientation) -> Result<(Board, Player), StateError> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(StateError::MissingFields(parts.len()));
        }

        let mut board = Board::empty(orientation);
        let rows: Vec<&str> = parts[0].split('/').collect();
        if rows.len() != 8 {
            return Err(StateError::RowCount(rows.len()));
        }

        for (row, row_str) in rows.iter().enumerate() {
            let mut column: i8 = 0;
            for ch in row_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if d == 0 || d > 8 {
                        return Err(StateError::RowWidth { row });
                    }
                    column += d as i8;
                } else {
                    let kind = PieceKind::from_letter(ch).ok_or(StateError::PieceLetter(ch))?;
                    let color = if ch.is_ascii_uppercase() {
                        Player::White
                    } else {
                        Player::Black
                    };
                    if column >= 8 {
                        return Err(StateError::RowWidth { row });
                    }
                    board.set(row as i8, column, Some(Piece::moved(color, kind)));
                    column += 1;
                }
                if column > 8 {
                    return Err(StateError::RowWidth { row });
                }
            }
            if column != 8 {
                return Err(StateError::RowWidth { row });
            }
        }

        let side = match parts[1] {
            "w" => Player::White,
            "b" => Player::Black,
            other => return Err(StateError::SideToMove(other.to_string())),
        };

        apply_castling_rights(&mut board, parts[2])?;
        mark_unmoved_pawns(&mut board);

        if parts[3] != "-" {
            let skip = parse_square(parts[3]).ok_or_else(|| StateError::EnPassant(parts[3].to_string()))?;
            board.set_pawn_skip_position(side.opponent(), Some(skip));
        }

        Ok((board, side))
    }
}

impl fmt::Display for StateString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StateString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Algebraic name of a square: file letter plus `8 - row`.
pub fn square_name(pos: Position) -> String {
    let file = (b'a' + pos.column as u8) as char;
    let rank = 8 - pos.row;
    format!("{file}{rank}")
}

/// Inverse of [`square_name`].
pub fn parse_square(text: &str) -> Option<Position> {
    let b = text.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let (f, r) = (b[0].to_ascii_lowercase(), b[1]);
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    Some(Position::new(8 - (r - b'0') as i8, (f - b'a') as i8))
}

fn add_piece_placement(sb: &mut String, board: &Board) {
    for row in 0..8 {
        if row != 0 {
            sb.push('/');
        }

        let mut empty = 0;
        for column in 0..8 {
            match board.get(row, column) {
                None => empty += 1,
                Some(piece) => {
                    if empty > 0 {
                        sb.push_str(&empty.to_string());
                        empty = 0;
                    }
                    sb.push(piece.letter());
                }
            }
        }
        if empty > 0 {
            sb.push_str(&empty.to_string());
        }
    }
}

fn add_castling_rights(sb: &mut String, board: &Board) {
    let rights = [
        (board.castle_right_king_side(Player::White), 'K'),
        (board.castle_right_queen_side(Player::White), 'Q'),
        (board.castle_right_king_side(Player::Black), 'k'),
        (board.castle_right_queen_side(Player::Black), 'q'),
    ];

    let before = sb.len();
    for (present, ch) in rights {
        if present {
            sb.push(ch);
        }
    }
    if sb.len() == before {
        sb.push('-');
    }
}

fn add_en_passant(sb: &mut String, board: &Board, current_player: Player) {
    let skip = board.pawn_skip_position(current_player.opponent());
    match skip {
        Some(pos) if board.can_capture_en_passant(current_player) => sb.push_str(&square_name(pos)),
        _ => sb.push('-'),
    }
}

fn apply_castling_rights(board: &mut Board, field: &str) -> Result<(), StateError> {
    if field == "-" {
        return Ok(());
    }

    let orientation = board.orientation();
    for ch in field.chars() {
        let (player, rook_column) = match ch {
            'K' => (Player::White, orientation.king_side_rook_column()),
            'Q' => (Player::White, orientation.queen_side_rook_column()),
            'k' => (Player::Black, orientation.king_side_rook_column()),
            'q' => (Player::Black, orientation.queen_side_rook_column()),
            _ => return Err(StateError::Castling(field.to_string())),
        };
        let king = board.king_home(player);
        let rook = Position::new(king.row, rook_column);
        for (pos, kind) in [(king, PieceKind::King), (rook, PieceKind::Rook)] {
            match board[pos].as_mut() {
                Some(pc) if pc.color == player && pc.kind == kind => pc.has_moved = false,
                _ => return Err(StateError::Castling(field.to_string())),
            }
        }
    }
    Ok(())
}

fn mark_unmoved_pawns(board: &mut Board) {
    let orientation = board.orientation();
    for player in [Player::White, Player::Black] {
        let row = orientation.pawn_row(player);
        for column in 0..8 {
            if let Some(pc) = board[Position::new(row, column)].as_mut()
                && pc.color == player
                && pc.kind == PieceKind::Pawn
            {
                pc.has_moved = false;
            }
        }
    }
}

#[cfg(test)]
#[path = "state_string_tests.rs"]
mod state_string_tests;
