use crate::{
    board::Board,
    moves::{CastleSide, Move},
    types::*,
};

impl Piece {
    /// Pseudo-legal moves for this piece standing on `from`. The mover's own
    /// king may be left in check; see [`Move::is_legal`].
    pub fn pseudo_moves(&self, from: Position, board: &Board) -> Vec<Move> {
        let mut out = Vec::with_capacity(32);
        self.pseudo_moves_into(from, board, &mut out);
        out
    }

    /// Same as [`Piece::pseudo_moves`] but appends to a caller-owned buffer.
    pub fn pseudo_moves_into(&self, from: Position, board: &Board, out: &mut Vec<Move>) {
        match self.kind {
            PieceKind::Pawn => gen_pawn(self, from, board, out),
            PieceKind::Knight => gen_steps(self, from, board, out, &knight_offsets()),
            PieceKind::Bishop => gen_slider(self, from, board, out, &Direction::DIAGONAL),
            PieceKind::Rook => gen_slider(self, from, board, out, &Direction::ORTHOGONAL),
            PieceKind::Queen => gen_slider(self, from, board, out, &Direction::ALL),
            PieceKind::King => {
                gen_steps(self, from, board, out, &Direction::ALL);
                gen_castle(self, from, board, out);
            }
        }
    }

    /// True if any pseudo-legal move from `from` lands on the opposing king.
    ///
    /// Check detection goes through here rather than through legal move
    /// generation, which would recurse back into check detection.
    pub fn can_capture_opponent_king(&self, from: Position, board: &Board) -> bool {
        self.pseudo_moves(from, board).iter().any(|mv| {
            matches!(board[mv.to], Some(target) if target.kind == PieceKind::King && target.color != self.color)
        })
    }
}

fn knight_offsets() -> [Direction; 8] {
    let n = Direction::NORTH;
    let s = Direction::SOUTH;
    let e = Direction::EAST;
    let w = Direction::WEST;
    [
        2i8 * n + e,
        2i8 * n + w,
        2i8 * s + e,
        2i8 * s + w,
        2i8 * e + n,
        2i8 * e + s,
        2i8 * w + n,
        2i8 * w + s,
    ]
}

fn gen_pawn(pawn: &Piece, from: Position, board: &Board, out: &mut Vec<Move>) {
    let forward = board.orientation().forward(pawn.color);

    // forward 1
    let one = from + forward;
    if Board::is_inside(one) && board.is_empty(one) {
        push_pawn_move(from, one, out);

        // forward 2 from an unmoved pawn
        let two = one + forward;
        if !pawn.has_moved && Board::is_inside(two) && board.is_empty(two) {
            out.push(Move::double_pawn(from, two));
        }
    }

    // captures + en-passant
    let skip = board.pawn_skip_position(pawn.color.opponent());
    for side in [Direction::WEST, Direction::EAST] {
        let to = one + side;
        if !Board::is_inside(to) {
            continue;
        }
        match board[to] {
            Some(target) if target.color != pawn.color => push_pawn_move(from, to, out),
            None if skip == Some(to) => out.push(Move::en_passant(from, to)),
            _ => {}
        }
    }
}

/// A pawn reaching the first or last row promotes; expand into one move per
/// promotion piece.
fn push_pawn_move(from: Position, to: Position, out: &mut Vec<Move>) {
    if to.row == 0 || to.row == 7 {
        for kind in PieceKind::PROMOTIONS {
            out.push(Move::promotion(from, to, kind));
        }
    } else {
        out.push(Move::normal(from, to));
    }
}

fn gen_steps(piece: &Piece, from: Position, board: &Board, out: &mut Vec<Move>, deltas: &[Direction]) {
    for &d in deltas {
        let to = from + d;
        if !Board::is_inside(to) {
            continue;
        }
        match board[to] {
            None => out.push(Move::normal(from, to)),
            Some(pc) if pc.color != piece.color => out.push(Move::normal(from, to)),
            _ => {}
        }
    }
}

fn gen_slider(piece: &Piece, from: Position, board: &Board, out: &mut Vec<Move>, dirs: &[Direction]) {
    for &d in dirs {
        let mut to = from + d;
        while Board::is_inside(to) {
            match board[to] {
                None => out.push(Move::normal(from, to)),
                Some(pc) if pc.color != piece.color => {
                    out.push(Move::normal(from, to));
                    break;
                }
                _ => break,
            }
            to = to + d;
        }
    }
}

fn gen_castle(king: &Piece, from: Position, board: &Board, out: &mut Vec<Move>) {
    let orientation = board.orientation();
    // Must be an unmoved king on its original square
    if king.has_moved || from != board.king_home(king.color) {
        return;
    }

    for side in [CastleSide::KingSide, CastleSide::QueenSide] {
        let rook_square = Position::new(from.row, side.rook_column(orientation));
        let rook_ready = matches!(
            board[rook_square],
            Some(rook) if rook.kind == PieceKind::Rook && rook.color == king.color && !rook.has_moved
        );
        if !rook_ready {
            continue;
        }

        let step = side.direction(orientation);
        let mut between = from + step;
        let mut clear = true;
        while between != rook_square {
            if !board.is_empty(between) {
                clear = false;
                break;
            }
            between = between + step;
        }
        if clear {
            out.push(Move::castle(side, from, orientation));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
