//! Routes lines between connected sessions.
//!
//! A transport (socket loop, test harness) calls [`Hub::connect`] per client,
//! feeds each received line to [`Session::handle_line`] and writes whatever
//! arrives on the returned receiver back to the client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};

use crate::protocol::{Command, RelayMove, Reply};
use crate::rooms::{RelayError, RoomRegistry, SessionId};

/// Sending half of a session's outgoing lines.
pub type Outbox = mpsc::UnboundedSender<String>;

#[derive(Debug)]
pub struct Hub {
    rooms: RoomRegistry,
    outboxes: RwLock<HashMap<SessionId, Outbox>>,
    next_id: AtomicU64,
}

impl Hub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            rooms: RoomRegistry::new(),
            outboxes: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn rooms(&self) -> &RoomRegistry {
        &self.rooms
    }

    /// Register a new client. Lines for it arrive on the receiver.
    pub async fn connect(self: &Arc<Self>) -> (Session, mpsc::UnboundedReceiver<String>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.outboxes.write().await.insert(id, tx);
        info!(session = id, "session connected");

        let session = Session {
            id,
            room: None,
            hub: Arc::clone(self),
        };
        (session, rx)
    }

    pub async fn session_count(&self) -> usize {
        self.outboxes.read().await.len()
    }

    async fn send(&self, to: SessionId, reply: &Reply) {
        let outboxes = self.outboxes.read().await;
        match outboxes.get(&to) {
            Some(tx) => {
                if tx.send(reply.to_string()).is_err() {
                    warn!(session = to, "dropped line for closed session");
                }
            }
            None => debug!(session = to, "no outbox for session"),
        }
    }
}

/// One connected client.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    room: Option<String>,
    hub: Arc<Hub>,
}

impl Session {
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Room this session currently sits in.
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// Handle one line from the client. Failures become `error` replies to
    /// this session; the session stays usable.
    pub async fn handle_line(&mut self, line: &str) {
        let line = line.trim_end_matches(['\r', '\n']);
        let result = match Command::parse(line) {
            Ok(command) => self.dispatch(command, line).await,
            Err(e) => Err(e.into()),
        };

        if let Err(e) = result {
            debug!(session = self.id, error = %e, "command rejected");
            let reply = Reply::error(e.code(), &e);
            self.hub.send(self.id, &reply).await;
        }
    }

    async fn dispatch(&mut self, command: Command, line: &str) -> Result<(), RelayError> {
        match command {
            Command::ShowRooms => {
                let rooms = self.hub.rooms.summaries().await;
                self.reply(Reply::Rooms(rooms)).await;
            }
            Command::CreateRoom(name) => {
                self.ensure_lobby()?;
                let seat = self.hub.rooms.create(&name, self.id).await?;
                info!(session = self.id, room = %name, "room created");
                self.room = Some(name.clone());
                self.reply(Reply::Joined { room: name, seat }).await;
            }
            Command::ConnectRoom(name) => {
                self.ensure_lobby()?;
                let seating = self.hub.rooms.join(&name, self.id).await?;
                info!(session = self.id, room = %name, seat = %seating.seat, "room joined");
                self.room = Some(name.clone());
                self.reply(Reply::Joined {
                    room: name.clone(),
                    seat: seating.seat,
                })
                .await;

                if let Some(opponent) = seating.opponent {
                    let started = Reply::Started { room: name };
                    self.hub.send(opponent, &started).await;
                    self.reply(started).await;
                }
            }
            Command::Exit => {
                let room = self.room.take().ok_or(RelayError::NotInRoom)?;
                self.vacate(&room).await;
                self.reply(Reply::Left { room }).await;
            }
            Command::MakeMove(mv) => self.forward_move(mv, line).await?,
        }
        Ok(())
    }

    async fn forward_move(&self, mv: RelayMove, line: &str) -> Result<(), RelayError> {
        let room = self.room.as_deref().ok_or(RelayError::NotInRoom)?;
        let seating = self
            .hub
            .rooms
            .seating(room, self.id)
            .await
            .ok_or(RelayError::NotInRoom)?;
        if mv.player != seating.seat {
            return Err(RelayError::WrongPlayer(seating.seat));
        }
        let opponent = seating.opponent.ok_or(RelayError::NoOpponent)?;

        debug!(session = self.id, room, mv = %mv, "forwarding move");
        self.hub.send(opponent, &Reply::Forward(line.to_string())).await;
        Ok(())
    }

    /// Clean up after the client is gone.
    pub async fn disconnect(mut self) {
        if let Some(room) = self.room.take() {
            self.vacate(&room).await;
        }
        self.hub.outboxes.write().await.remove(&self.id);
        info!(session = self.id, "session disconnected");
    }

    fn ensure_lobby(&self) -> Result<(), RelayError> {
        match &self.room {
            Some(room) => Err(RelayError::AlreadyInRoom(room.clone())),
            None => Ok(()),
        }
    }

    async fn vacate(&self, room: &str) {
        if let Some(other) = self.hub.rooms.leave(room, self.id).await {
            let reply = Reply::OpponentLeft {
                room: room.to_string(),
            };
            self.hub.send(other, &reply).await;
        }
        info!(session = self.id, room, "left room");
    }

    async fn reply(&self, reply: Reply) {
        self.hub.send(self.id, &reply).await;
    }
}

#[cfg(test)]
#[path = "hub_tests.rs"]
mod hub_tests;
