//! Relay wire protocol
//!
//! One command per line, fields separated by [`DELIMITER`]:
//!
//! ```text
//! show_rooms
//! create_room#&#<name>
//! connect_room#&#<name>
//! exit
//! make_move#&#<from>:<to>:<player>[:<promotion>]
//! ```
//!
//! Squares are `<row digit><file letter>` as the sender sees the board.

use std::fmt;

use chess_core::{GameState, Move, PieceKind, Player, Position};
use thiserror::Error;

pub const DELIMITER: &str = "#&#";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("empty message")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{command}' takes {expected} argument(s)")]
    Arity {
        command: &'static str,
        expected: usize,
    },
    #[error("invalid room name '{0}'")]
    RoomName(String),
    #[error("malformed move '{0}'")]
    Move(String),
    #[error("invalid square '{0}'")]
    Square(String),
    #[error("invalid player '{0}'")]
    Player(String),
    #[error("invalid promotion '{0}'")]
    Promotion(String),
}

impl ProtocolError {
    /// Short code sent in `error` replies.
    pub fn code(&self) -> &'static str {
        match self {
            ProtocolError::Empty | ProtocolError::UnknownCommand(_) => "bad_command",
            ProtocolError::Arity { .. } => "bad_arguments",
            ProtocolError::RoomName(_) => "bad_room_name",
            ProtocolError::Move(_)
            | ProtocolError::Square(_)
            | ProtocolError::Player(_)
            | ProtocolError::Promotion(_) => "bad_move",
        }
    }
}

/// A request from a connected player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ShowRooms,
    CreateRoom(String),
    ConnectRoom(String),
    Exit,
    MakeMove(RelayMove),
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, ProtocolError> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            return Err(ProtocolError::Empty);
        }

        let mut fields = line.split(DELIMITER);
        let name = fields.next().unwrap_or_default();
        let args: Vec<&str> = fields.collect();

        let expect = |command: &'static str, expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(ProtocolError::Arity { command, expected })
            }
        };
        // Room commands may carry a trailing nickname, which the relay ignores.
        let expect_room = |command: &'static str| {
            if (1..=2).contains(&args.len()) {
                Ok(())
            } else {
                Err(ProtocolError::Arity {
                    command,
                    expected: 1,
                })
            }
        };

        match name {
            "show_rooms" => {
                expect("show_rooms", 0)?;
                Ok(Command::ShowRooms)
            }
            "create_room" => {
                expect_room("create_room")?;
                Ok(Command::CreateRoom(room_name(args[0])?))
            }
            "connect_room" => {
                expect_room("connect_room")?;
                Ok(Command::ConnectRoom(room_name(args[0])?))
            }
            "exit" => {
                expect("exit", 0)?;
                Ok(Command::Exit)
            }
            "make_move" => {
                expect("make_move", 1)?;
                Ok(Command::MakeMove(RelayMove::parse(args[0])?))
            }
            other => Err(ProtocolError::UnknownCommand(other.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::ShowRooms => f.write_str("show_rooms"),
            Command::CreateRoom(name) => write!(f, "create_room{DELIMITER}{name}"),
            Command::ConnectRoom(name) => write!(f, "connect_room{DELIMITER}{name}"),
            Command::Exit => f.write_str("exit"),
            Command::MakeMove(mv) => write!(f, "make_move{DELIMITER}{mv}"),
        }
    }
}

/// Room names end up inside `name:count` tuples, so `:` is not allowed.
fn room_name(raw: &str) -> Result<String, ProtocolError> {
    let name = raw.trim();
    if name.is_empty() || name.contains(':') {
        return Err(ProtocolError::RoomName(raw.to_string()));
    }
    Ok(name.to_string())
}

/// A move as exchanged between the two clients of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayMove {
    pub from: Position,
    pub to: Position,
    pub player: Player,
    pub promotion: Option<PieceKind>,
}

impl RelayMove {
    pub fn new(mv: &Move, player: Player) -> Self {
        Self {
            from: mv.from,
            to: mv.to,
            player,
            promotion: mv.promotion_kind(),
        }
    }

    pub fn parse(txt: &str) -> Result<RelayMove, ProtocolError> {
        let parts: Vec<&str> = txt.trim().split(':').collect();
        if !(3..=4).contains(&parts.len()) {
            return Err(ProtocolError::Move(txt.to_string()));
        }

        let player = match parts[2] {
            "White" => Player::White,
            "Black" => Player::Black,
            other => return Err(ProtocolError::Player(other.to_string())),
        };
        let promotion = match parts.get(3) {
            None => None,
            Some(name) => Some(promotion_kind(name)?),
        };

        Ok(RelayMove {
            from: parse_relay_square(parts[0])?,
            to: parse_relay_square(parts[1])?,
            player,
            promotion,
        })
    }

    /// The same move as seen from the other side of the table.
    pub fn mirrored(self) -> RelayMove {
        RelayMove {
            from: mirror(self.from),
            to: mirror(self.to),
            ..self
        }
    }

    /// Find the legal move in `game` this describes. Squares must already be
    /// in the receiver's orientation (see [`RelayMove::mirrored`]).
    pub fn resolve(&self, game: &GameState) -> Option<Move> {
        if game.current_player() != self.player {
            return None;
        }
        let wanted = self.promotion.unwrap_or(PieceKind::Queen);
        game.legal_moves_for_piece(self.from)
            .into_iter()
            .filter(|m| m.to == self.to)
            .find(|m| m.promotion_kind().map_or(true, |kind| kind == wanted))
    }
}

impl fmt::Display for RelayMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.from, self.to, self.player)?;
        if let Some(kind) = self.promotion {
            write!(f, ":{kind}")?;
        }
        Ok(())
    }
}

fn mirror(pos: Position) -> Position {
    Position::new(7 - pos.row, 7 - pos.column)
}

fn parse_relay_square(txt: &str) -> Result<Position, ProtocolError> {
    let bytes = txt.as_bytes();
    if bytes.len() != 2 || !bytes[0].is_ascii_digit() || !bytes[1].is_ascii_lowercase() {
        return Err(ProtocolError::Square(txt.to_string()));
    }
    let pos = Position::new((bytes[0] - b'0') as i8, (bytes[1] - b'a') as i8);
    if !pos.is_inside() {
        return Err(ProtocolError::Square(txt.to_string()));
    }
    Ok(pos)
}

fn promotion_kind(name: &str) -> Result<PieceKind, ProtocolError> {
    PieceKind::PROMOTIONS
        .into_iter()
        .find(|kind| kind.to_string() == name)
        .ok_or_else(|| ProtocolError::Promotion(name.to_string()))
}

/// Occupancy of one room as listed by `show_rooms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub name: String,
    pub players: usize,
}

/// A line sent from the relay to a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// `rooms#&#<name>:<count>...`
    Rooms(Vec<RoomSummary>),
    /// The player took a seat in a room.
    Joined { room: String, seat: Player },
    /// Both seats are taken; White moves first.
    Started { room: String },
    /// The player left their room.
    Left { room: String },
    OpponentLeft { room: String },
    /// A `make_move` line from the opponent, forwarded untouched.
    Forward(String),
    Error { code: &'static str, message: String },
}

impl Reply {
    pub fn error(code: &'static str, message: impl fmt::Display) -> Reply {
        Reply::Error {
            code,
            message: message.to_string(),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Rooms(rooms) => {
                f.write_str("rooms")?;
                for room in rooms {
                    write!(f, "{DELIMITER}{}:{}", room.name, room.players)?;
                }
                Ok(())
            }
            Reply::Joined { room, seat } => write!(f, "joined{DELIMITER}{room}{DELIMITER}{seat}"),
            Reply::Started { room } => write!(f, "start{DELIMITER}{room}"),
            Reply::Left { room } => write!(f, "left{DELIMITER}{room}"),
            Reply::OpponentLeft { room } => write!(f, "opponent_left{DELIMITER}{room}"),
            Reply::Forward(line) => f.write_str(line),
            Reply::Error { code, message } => write!(f, "error{DELIMITER}{code}{DELIMITER}{message}"),
        }
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
