//! Relay for two-player remote games
//!
//! Players connect, create or join a named room, and exchange moves through
//! the relay. The relay never looks at the game itself: it seats at most two
//! players per room and forwards each `make_move` line verbatim to the other
//! seat. Clients mirror the squares they receive onto their own board (see
//! [`RelayMove::mirrored`]).
//!
//! Socket handling is left to the embedding program; this crate works on
//! lines.

mod hub;
mod protocol;
mod rooms;

pub use hub::*;
pub use protocol::*;
pub use rooms::*;
