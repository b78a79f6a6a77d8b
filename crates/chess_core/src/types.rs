use std::fmt;
use std::ops::{Add, Mul};

/// Side of the board. `None` is used as the "winner" of a drawn game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    None,
    White,
    Black,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
            Player::None => Player::None,
        }
    }

    /// Slot used by per-side tables. `None` has no slot.
    pub fn idx(self) -> Option<usize> {
        match self {
            Player::White => Some(0),
            Player::Black => Some(1),
            Player::None => None,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::None => write!(f, "None"),
            Player::White => write!(f, "White"),
            Player::Black => write!(f, "Black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Pieces a pawn may promote to, in the order they are generated.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn idx(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Lowercase letter used by the state string and coordinate notation.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn from_letter(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        f.write_str(name)
    }
}

/// A piece as it sits on the board. The color never changes; `has_moved`
/// is only flipped by move execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Player,
    pub kind: PieceKind,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(color: Player, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            has_moved: false,
        }
    }

    pub fn moved(color: Player, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            has_moved: true,
        }
    }

    /// Letter used by the state string: uppercase for White.
    pub fn letter(&self) -> char {
        let ch = self.kind.letter();
        if self.color == Player::White {
            ch.to_ascii_uppercase()
        } else {
            ch
        }
    }
}

/// Which physical rows are home for each side.
///
/// `Standard` has White on rows 6-7 advancing toward row 0 with the king on
/// column 4. `Reversed` is the same board rotated half a turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Standard,
    Reversed,
}

impl Orientation {
    /// Row holding the back rank of `player`.
    pub fn home_row(self, player: Player) -> i8 {
        match (self, player) {
            (Orientation::Standard, Player::Black) | (Orientation::Reversed, Player::White) => 0,
            _ => 7,
        }
    }

    /// Row pawns of `player` start on.
    pub fn pawn_row(self, player: Player) -> i8 {
        match self.home_row(player) {
            0 => 1,
            _ => 6,
        }
    }

    /// Direction pawns of `player` advance in.
    pub fn forward(self, player: Player) -> Direction {
        match self.home_row(player) {
            0 => Direction::SOUTH,
            _ => Direction::NORTH,
        }
    }

    /// Column of the king at the start of the game.
    pub fn king_column(self) -> i8 {
        match self {
            Orientation::Standard => 4,
            Orientation::Reversed => 3,
        }
    }

    /// Column of the king-side rook at the start of the game.
    pub fn king_side_rook_column(self) -> i8 {
        match self {
            Orientation::Standard => 7,
            Orientation::Reversed => 0,
        }
    }

    /// Column of the queen-side rook at the start of the game.
    pub fn queen_side_rook_column(self) -> i8 {
        7 - self.king_side_rook_column()
    }

    /// Direction the king travels when castling king-side.
    pub fn king_side(self) -> Direction {
        match self {
            Orientation::Standard => Direction::EAST,
            Orientation::Reversed => Direction::WEST,
        }
    }
}

/// Row/column step. North is toward row 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    pub row_delta: i8,
    pub column_delta: i8,
}

impl Direction {
    pub const NORTH: Direction = Direction::new(-1, 0);
    pub const SOUTH: Direction = Direction::new(1, 0);
    pub const WEST: Direction = Direction::new(0, -1);
    pub const EAST: Direction = Direction::new(0, 1);
    pub const NORTH_EAST: Direction = Direction::NORTH.plus(Direction::EAST);
    pub const NORTH_WEST: Direction = Direction::NORTH.plus(Direction::WEST);
    pub const SOUTH_EAST: Direction = Direction::SOUTH.plus(Direction::EAST);
    pub const SOUTH_WEST: Direction = Direction::SOUTH.plus(Direction::WEST);

    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::NORTH,
        Direction::SOUTH,
        Direction::EAST,
        Direction::WEST,
    ];
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NORTH_WEST,
        Direction::NORTH_EAST,
        Direction::SOUTH_WEST,
        Direction::SOUTH_EAST,
    ];
    pub const ALL: [Direction; 8] = [
        Direction::NORTH,
        Direction::SOUTH,
        Direction::EAST,
        Direction::WEST,
        Direction::NORTH_WEST,
        Direction::NORTH_EAST,
        Direction::SOUTH_WEST,
        Direction::SOUTH_EAST,
    ];

    pub const fn new(row_delta: i8, column_delta: i8) -> Self {
        Self {
            row_delta,
            column_delta,
        }
    }

    pub const fn plus(self, other: Direction) -> Direction {
        Direction::new(
            self.row_delta + other.row_delta,
            self.column_delta + other.column_delta,
        )
    }
}

impl Add for Direction {
    type Output = Direction;

    fn add(self, rhs: Direction) -> Direction {
        self.plus(rhs)
    }
}

impl Mul<Direction> for i8 {
    type Output = Direction;

    fn mul(self, rhs: Direction) -> Direction {
        Direction::new(self * rhs.row_delta, self * rhs.column_delta)
    }
}

/// A square. Coordinates are signed so that `position + direction` can step
/// off the board; use [`Position::is_inside`] before indexing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i8,
    pub column: i8,
}

impl Position {
    pub const fn new(row: i8, column: i8) -> Self {
        Self { row, column }
    }

    pub fn is_inside(self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.column)
    }

    /// Light squares are White, dark squares are Black (a8 is light).
    pub fn square_color(self) -> Player {
        if (self.row + self.column) % 2 == 0 {
            Player::White
        } else {
            Player::Black
        }
    }

    /// Iterator over all 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..8).flat_map(|row| (0..8).map(move |column| Position::new(row, column)))
    }
}

impl Add<Direction> for Position {
    type Output = Position;

    fn add(self, rhs: Direction) -> Position {
        Position::new(self.row + rhs.row_delta, self.column + rhs.column_delta)
    }
}

/// Row digit followed by file letter, e.g. `6e`. This is the square format
/// used on the relay wire.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, (b'a' as i8 + self.column) as u8 as char)
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
