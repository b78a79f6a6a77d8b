use std::ops::{Index, IndexMut};

use crate::{
    counting::Counting,
    moves::Move,
    types::*,
};

/// 8x8 grid of optional pieces plus the per-side en-passant skip squares.
///
/// Castling rights are not stored; they are derived from whether the king
/// and rook still stand unmoved on their original squares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    pawn_skips: [Option<Position>; 2],
    orientation: Orientation,
}

impl Index<Position> for Board {
    type Output = Option<Piece>;

    fn index(&self, pos: Position) -> &Option<Piece> {
        &self.squares[pos.row as usize][pos.column as usize]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, pos: Position) -> &mut Option<Piece> {
        &mut self.squares[pos.row as usize][pos.column as usize]
    }
}

impl Board {
    pub fn empty(orientation: Orientation) -> Self {
        Self {
            squares: [[None; 8]; 8],
            pawn_skips: [None; 2],
            orientation,
        }
    }

    pub fn initial(orientation: Orientation) -> Self {
        let mut board = Self::empty(orientation);

        // Back ranks; Reversed swaps king and queen so the board reads as the
        // Standard one turned around.
        let mut back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        if orientation == Orientation::Reversed {
            back.swap(3, 4);
        }

        for player in [Player::White, Player::Black] {
            let home = orientation.home_row(player);
            let pawns = orientation.pawn_row(player);
            for (column, &kind) in back.iter().enumerate() {
                let column = column as i8;
                board[Position::new(home, column)] = Some(Piece::new(player, kind));
                board[Position::new(pawns, column)] = Some(Piece::new(player, PieceKind::Pawn));
            }
        }
        board
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn get(&self, row: i8, column: i8) -> Option<Piece> {
        self[Position::new(row, column)]
    }

    pub fn set(&mut self, row: i8, column: i8, piece: Option<Piece>) {
        self[Position::new(row, column)] = piece;
    }

    pub fn is_inside(pos: Position) -> bool {
        pos.is_inside()
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self[pos].is_none()
    }

    /// Square the last double-stepped pawn of `player` passed over.
    pub fn pawn_skip_position(&self, player: Player) -> Option<Position> {
        player.idx().and_then(|i| self.pawn_skips[i])
    }

    pub fn set_pawn_skip_position(&mut self, player: Player, pos: Option<Position>) {
        if let Some(i) = player.idx() {
            self.pawn_skips[i] = pos;
        }
    }

    /// Occupied squares in row-major order.
    pub fn piece_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |&pos| !self.is_empty(pos))
    }

    /// Squares holding pieces of `player`, in row-major order.
    pub fn piece_positions_for(&self, player: Player) -> impl Iterator<Item = Position> + '_ {
        self.piece_positions()
            .filter(move |&pos| matches!(self[pos], Some(pc) if pc.color == player))
    }

    pub fn king_position(&self, player: Player) -> Option<Position> {
        self.piece_positions_for(player)
            .find(|&pos| matches!(self[pos], Some(pc) if pc.kind == PieceKind::King))
    }

    pub fn is_in_check(&self, player: Player) -> bool {
        self.piece_positions_for(player.opponent()).any(|pos| match self[pos] {
            Some(pc) => pc.can_capture_opponent_king(pos, self),
            None => false,
        })
    }

    /// Independent copy for trial execution. Mutating the copy never touches
    /// `self`.
    pub fn copy(&self) -> Board {
        self.clone()
    }

    pub fn counting(&self) -> Counting {
        let mut counting = Counting::new();
        for pos in self.piece_positions() {
            if let Some(pc) = self[pos] {
                counting.increment(pc.color, pc.kind);
            }
        }
        counting
    }

    /// True when the remaining material matches one of the known dead
    /// positions.
    pub fn insufficient_material(&self) -> bool {
        let counting = self.counting();

        is_king_versus_king(&counting)
            || is_king_minor_versus_king(&counting)
            || self.is_king_bishop_versus_king_bishop(&counting)
            || is_king_two_knights_versus_king(&counting)
            || is_king_bishop_versus_king_knight(&counting)
            || is_king_knight_versus_king_knight(&counting)
            || is_lone_king_versus_full_army(&counting)
    }

    fn is_king_bishop_versus_king_bishop(&self, counting: &Counting) -> bool {
        if counting.total_count() != 4
            || counting.white(PieceKind::Bishop) != 1
            || counting.black(PieceKind::Bishop) != 1
        {
            return false;
        }

        match (
            self.find_piece(Player::White, PieceKind::Bishop),
            self.find_piece(Player::Black, PieceKind::Bishop),
        ) {
            (Some(white), Some(black)) => white.square_color() == black.square_color(),
            _ => false,
        }
    }

    fn find_piece(&self, player: Player, kind: PieceKind) -> Option<Position> {
        self.piece_positions_for(player)
            .find(|&pos| matches!(self[pos], Some(pc) if pc.kind == kind))
    }

    /// Original square of the king of `player`.
    pub fn king_home(&self, player: Player) -> Position {
        Position::new(
            self.orientation.home_row(player),
            self.orientation.king_column(),
        )
    }

    fn is_unmoved(&self, pos: Position, player: Player, kind: PieceKind) -> bool {
        matches!(self[pos], Some(pc) if pc.color == player && pc.kind == kind && !pc.has_moved)
    }

    fn castle_right(&self, player: Player, rook_column: i8) -> bool {
        if player == Player::None {
            return false;
        }
        let king = self.king_home(player);
        let rook = Position::new(king.row, rook_column);
        self.is_unmoved(king, player, PieceKind::King) && self.is_unmoved(rook, player, PieceKind::Rook)
    }

    pub fn castle_right_king_side(&self, player: Player) -> bool {
        self.castle_right(player, self.orientation.king_side_rook_column())
    }

    pub fn castle_right_queen_side(&self, player: Player) -> bool {
        self.castle_right(player, self.orientation.queen_side_rook_column())
    }

    /// True if `player` has a pawn that can legally capture the opponent's
    /// pawn that just double-stepped.
    pub fn can_capture_en_passant(&self, player: Player) -> bool {
        let Some(skip) = self.pawn_skip_position(player.opponent()) else {
            return false;
        };

        // A capturing pawn stands one row behind the skip square from its
        // own point of view.
        let back = -1i8 * self.orientation.forward(player);
        [Direction::WEST, Direction::EAST]
            .into_iter()
            .map(|side| skip + back + side)
            .filter(|&pos| Board::is_inside(pos))
            .any(|pos| {
                matches!(self[pos], Some(pc) if pc.color == player && pc.kind == PieceKind::Pawn)
                    && Move::en_passant(pos, skip).is_legal(self)
            })
    }
}

fn is_king_versus_king(counting: &Counting) -> bool {
    counting.total_count() == 2
}

fn is_king_minor_versus_king(counting: &Counting) -> bool {
    counting.total_count() == 3
        && (counting.white(PieceKind::Bishop) == 1
            || counting.black(PieceKind::Bishop) == 1
            || counting.white(PieceKind::Knight) == 1
            || counting.black(PieceKind::Knight) == 1)
}

fn is_king_two_knights_versus_king(counting: &Counting) -> bool {
    counting.total_count() == 4
        && (counting.white(PieceKind::Knight) == 2 || counting.black(PieceKind::Knight) == 2)
}

fn is_king_bishop_versus_king_knight(counting: &Counting) -> bool {
    counting.total_count() == 4
        && ((counting.white(PieceKind::Knight) == 1 && counting.black(PieceKind::Bishop) == 1)
            || (counting.black(PieceKind::Knight) == 1 && counting.white(PieceKind::Bishop) == 1))
}

fn is_king_knight_versus_king_knight(counting: &Counting) -> bool {
    counting.total_count() == 4
        && counting.white(PieceKind::Knight) == 1
        && counting.black(PieceKind::Knight) == 1
}

fn is_lone_king_versus_full_army(counting: &Counting) -> bool {
    counting.total_count() == 17
        && ((counting.total_white() == 16 && counting.black(PieceKind::King) == 1)
            || (counting.total_black() == 16 && counting.white(PieceKind::King) == 1))
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
