//! Move variants: how each one mutates a board and how it is checked for
//! legality.

use crate::board::Board;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    /// Direction the king travels.
    pub fn direction(self, orientation: Orientation) -> Direction {
        let ks = orientation.king_side();
        match self {
            CastleSide::KingSide => ks,
            CastleSide::QueenSide => -1i8 * ks,
        }
    }

    /// Column of the rook this castle uses.
    pub fn rook_column(self, orientation: Orientation) -> i8 {
        match self {
            CastleSide::KingSide => orientation.king_side_rook_column(),
            CastleSide::QueenSide => orientation.queen_side_rook_column(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Normal,
    /// Two-square pawn advance; `skipped` becomes the mover's en-passant
    /// target for one turn.
    DoublePawn { skipped: Position },
    /// `captured` is the square of the pawn taken, not the destination.
    EnPassant { captured: Position },
    Castle {
        side: CastleSide,
        rook_from: Position,
        rook_to: Position,
    },
    Promotion(PieceKind),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub kind: MoveKind,
}

impl Move {
    pub fn normal(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Normal,
        }
    }

    pub fn double_pawn(from: Position, to: Position) -> Self {
        let skipped = Position::new((from.row + to.row) / 2, from.column);
        Self {
            from,
            to,
            kind: MoveKind::DoublePawn { skipped },
        }
    }

    pub fn en_passant(from: Position, to: Position) -> Self {
        let captured = Position::new(from.row, to.column);
        Self {
            from,
            to,
            kind: MoveKind::EnPassant { captured },
        }
    }

    pub fn promotion(from: Position, to: Position, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Promotion(kind),
        }
    }

    /// Castle for the king standing on `king_from`. The king moves two
    /// squares toward the rook, the rook lands on the square the king crossed.
    pub fn castle(side: CastleSide, king_from: Position, orientation: Orientation) -> Self {
        let step = side.direction(orientation);
        Self {
            from: king_from,
            to: king_from + 2i8 * step,
            kind: MoveKind::Castle {
                side,
                rook_from: Position::new(king_from.row, side.rook_column(orientation)),
                rook_to: king_from + step,
            },
        }
    }

    pub fn promotion_kind(&self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle { .. })
    }

    /// Apply the move to `board`.
    ///
    /// Returns true when the move resets the fifty-move counter (a capture or
    /// any pawn move).
    pub fn execute(&self, board: &mut Board) -> bool {
        match self.kind {
            MoveKind::Normal => execute_normal(board, self.from, self.to),
            MoveKind::DoublePawn { skipped } => {
                if let Some(pawn) = board[self.from] {
                    board.set_pawn_skip_position(pawn.color, Some(skipped));
                }
                execute_normal(board, self.from, self.to);
                true
            }
            MoveKind::EnPassant { captured } => {
                execute_normal(board, self.from, self.to);
                board[captured] = None;
                true
            }
            MoveKind::Promotion(kind) => {
                if let Some(pawn) = board[self.from].take() {
                    board[self.to] = Some(Piece::moved(pawn.color, kind));
                }
                true
            }
            MoveKind::Castle {
                rook_from, rook_to, ..
            } => {
                execute_normal(board, self.from, self.to);
                execute_normal(board, rook_from, rook_to);
                false
            }
        }
    }

    /// A move is legal when the mover's king is not in check afterwards.
    /// Castling additionally may not start in, or pass through, check.
    pub fn is_legal(&self, board: &Board) -> bool {
        let Some(mover) = board[self.from] else {
            return false;
        };

        if let MoveKind::Castle { .. } = self.kind {
            return self.castle_is_safe(board, mover.color);
        }

        let mut trial = board.copy();
        self.execute(&mut trial);
        !trial.is_in_check(mover.color)
    }

    fn castle_is_safe(&self, board: &Board, player: Player) -> bool {
        if board.is_in_check(player) {
            return false;
        }

        let step = Direction::new(0, (self.to.column - self.from.column).signum());
        let mut trial = board.copy();
        let mut king = self.from;
        for _ in 0..2 {
            execute_normal(&mut trial, king, king + step);
            king = king + step;
            if trial.is_in_check(player) {
                return false;
            }
        }
        true
    }
}

/// Move whatever stands on `from` to `to` and mark it as moved.
fn execute_normal(board: &mut Board, from: Position, to: Position) -> bool {
    let Some(mut piece) = board[from].take() else {
        return false;
    };
    let captured = board[to].is_some();
    piece.has_moved = true;
    board[to] = Some(piece);
    captured || piece.kind == PieceKind::Pawn
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod moves_tests;
