use crate::types::{PieceKind, Player};

/// Per-color, per-kind piece tally used by the insufficient-material rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Counting {
    white: [u8; 6],
    black: [u8; 6],
    total: u32,
}

impl Counting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, color: Player, kind: PieceKind) {
        match color {
            Player::White => self.white[kind.idx()] += 1,
            Player::Black => self.black[kind.idx()] += 1,
            Player::None => {}
        }
        self.total += 1;
    }

    pub fn white(&self, kind: PieceKind) -> u8 {
        self.white[kind.idx()]
    }

    pub fn black(&self, kind: PieceKind) -> u8 {
        self.black[kind.idx()]
    }

    pub fn total_white(&self) -> u32 {
        self.white.iter().map(|&n| n as u32).sum()
    }

    pub fn total_black(&self) -> u32 {
        self.black.iter().map(|&n| n as u32).sum()
    }

    pub fn total_count(&self) -> u32 {
        self.total
    }
}
