//! Coordinate move notation (`e2e4`, `e7e8q`) as spoken by UCI engines.

use crate::{
    game::GameState,
    moves::Move,
    state_string::{parse_square, square_name},
    types::*,
};

/// A move as written on the wire, before it is matched against the legal
/// moves of a position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Position,
    pub to: Position,
    pub promotion: Option<PieceKind>,
}

pub fn move_to_coordinate(mv: &Move) -> String {
    let mut s = String::with_capacity(5);
    s.push_str(&square_name(mv.from));
    s.push_str(&square_name(mv.to));
    if let Some(kind) = mv.promotion_kind() {
        s.push(kind.letter());
    }
    s
}

/// Parse `<from><to>[promo]`. Returns `None` for anything else, including
/// the engine's "no move" answers `(none)` and `0000`.
pub fn parse_coordinate_move(txt: &str) -> Option<CoordinateMove> {
    if !txt.is_ascii() || !(4..=5).contains(&txt.len()) {
        return None;
    }
    let from = parse_square(&txt[0..2])?;
    let to = parse_square(&txt[2..4])?;
    let promotion = match txt.as_bytes().get(4) {
        None => None,
        Some(&b) => match PieceKind::from_letter(b as char)? {
            PieceKind::Pawn | PieceKind::King => return None,
            kind => Some(kind),
        },
    };
    Some(CoordinateMove {
        from,
        to,
        promotion,
    })
}

/// Match a coordinate move against the legal moves of the piece on its
/// origin square. A promotion without a letter becomes a queen.
pub fn resolve_coordinate_move(game: &GameState, txt: &str) -> Option<Move> {
    // We parse and then match against legal moves so castle/en-passant kinds are correct.
    let coord = parse_coordinate_move(txt)?;
    let wanted = coord.promotion.unwrap_or(PieceKind::Queen);

    game.legal_moves_for_piece(coord.from)
        .into_iter()
        .filter(|m| m.to == coord.to)
        .find(|m| m.promotion_kind().is_none_or(|kind| kind == wanted))
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
