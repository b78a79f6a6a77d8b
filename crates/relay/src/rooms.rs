//! Named rooms with two seats.

use std::collections::HashMap;
use std::sync::Arc;

use chess_core::Player;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::protocol::{ProtocolError, RoomSummary};

/// Identifies one connected session.
pub type SessionId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error("room '{0}' already exists")]
    RoomExists(String),
    #[error("room '{0}' does not exist")]
    RoomNotFound(String),
    #[error("room '{0}' is full")]
    RoomFull(String),
    #[error("already in room '{0}'")]
    AlreadyInRoom(String),
    #[error("not in a room")]
    NotInRoom,
    #[error("no opponent in the room yet")]
    NoOpponent,
    #[error("you are playing {0}")]
    WrongPlayer(Player),
}

impl RelayError {
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::Protocol(e) => e.code(),
            RelayError::RoomExists(_) => "room_exists",
            RelayError::RoomNotFound(_) => "room_not_found",
            RelayError::RoomFull(_) => "room_full",
            RelayError::AlreadyInRoom(_) => "already_in_room",
            RelayError::NotInRoom => "not_in_room",
            RelayError::NoOpponent => "no_opponent",
            RelayError::WrongPlayer(_) => "wrong_player",
        }
    }
}

#[derive(Debug, Default)]
struct Seats {
    white: Option<SessionId>,
    black: Option<SessionId>,
}

impl Seats {
    fn count(&self) -> usize {
        self.white.is_some() as usize + self.black.is_some() as usize
    }

    fn seat_of(&self, session: SessionId) -> Option<Player> {
        if self.white == Some(session) {
            Some(Player::White)
        } else if self.black == Some(session) {
            Some(Player::Black)
        } else {
            None
        }
    }

    fn occupant(&self, seat: Player) -> Option<SessionId> {
        match seat {
            Player::White => self.white,
            Player::Black => self.black,
            Player::None => None,
        }
    }
}

#[derive(Debug)]
pub struct Room {
    name: String,
    seats: Mutex<Seats>,
}

impl Room {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            seats: Mutex::new(Seats::default()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn player_count(&self) -> usize {
        self.seats.lock().await.count()
    }

    /// Take the first free seat, White before Black.
    async fn sit(&self, session: SessionId) -> Result<Player, RelayError> {
        let mut seats = self.seats.lock().await;
        if seats.white.is_none() {
            seats.white = Some(session);
            Ok(Player::White)
        } else if seats.black.is_none() {
            seats.black = Some(session);
            Ok(Player::Black)
        } else {
            Err(RelayError::RoomFull(self.name.clone()))
        }
    }
}

/// What a session sees when it looks across the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seating {
    pub seat: Player,
    pub opponent: Option<SessionId>,
}

/// All open rooms, keyed by name.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<String, Arc<Room>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room and seat its creator as White. Fails if the name is taken.
    pub async fn create(&self, name: &str, creator: SessionId) -> Result<Player, RelayError> {
        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(name) {
            return Err(RelayError::RoomExists(name.to_string()));
        }
        let room = Arc::new(Room::new(name));
        let seat = room.sit(creator).await?;
        rooms.insert(name.to_string(), room);
        debug!(room = name, session = creator, "room created");
        Ok(seat)
    }

    /// Seat `session` in an existing room.
    pub async fn join(&self, name: &str, session: SessionId) -> Result<Seating, RelayError> {
        // Holding the read lock keeps `leave` from dropping the room mid-join.
        let rooms = self.rooms.read().await;
        let room = rooms
            .get(name)
            .ok_or_else(|| RelayError::RoomNotFound(name.to_string()))?;
        let seat = room.sit(session).await?;
        let opponent = room.seats.lock().await.occupant(seat.opponent());
        debug!(room = name, session, %seat, "joined room");
        Ok(Seating { seat, opponent })
    }

    /// Free `session`'s seat, dropping the room once it is empty. Returns the
    /// player left behind, if any.
    pub async fn leave(&self, name: &str, session: SessionId) -> Option<SessionId> {
        let mut rooms = self.rooms.write().await;
        let room = rooms.get(name)?;

        let (remaining, other) = {
            let mut seats = room.seats.lock().await;
            match seats.seat_of(session) {
                Some(Player::White) => seats.white = None,
                Some(Player::Black) => seats.black = None,
                _ => {}
            }
            (seats.count(), seats.white.or(seats.black))
        };

        if remaining == 0 {
            rooms.remove(name);
            debug!(room = name, "room closed");
        }
        other
    }

    /// The seat `session` holds in `name` and who sits opposite.
    pub async fn seating(&self, name: &str, session: SessionId) -> Option<Seating> {
        let rooms = self.rooms.read().await;
        let room = rooms.get(name)?;
        let seats = room.seats.lock().await;
        let seat = seats.seat_of(session)?;
        Some(Seating {
            seat,
            opponent: seats.occupant(seat.opponent()),
        })
    }

    /// Rooms and their occupancy, sorted by name.
    pub async fn summaries(&self) -> Vec<RoomSummary> {
        let rooms = self.rooms.read().await;
        let mut out = Vec::with_capacity(rooms.len());
        for room in rooms.values() {
            out.push(RoomSummary {
                name: room.name.clone(),
                players: room.player_count().await,
            });
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    pub async fn len(&self) -> usize {
        self.rooms.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rooms.read().await.is_empty()
    }
}

#[cfg(test)]
#[path = "rooms_tests.rs"]
mod rooms_tests;
