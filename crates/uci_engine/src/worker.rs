//! Runs a blocking engine on its own thread so callers can wait with a
//! timeout.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chess_core::{resolve_coordinate_move, GameState, Move, MoveProvider, Orientation};
use tracing::{debug, warn};

use crate::{
    config::BridgeConfig,
    error::EngineError,
    process::EngineProcess,
    protocol::BestMove,
    session::BestMoveSource,
};

struct Request {
    state: String,
    reply: Sender<Result<BestMove, EngineError>>,
}

/// Handle to an engine running on a worker thread.
///
/// Requests are served strictly in order. When a caller gives up waiting,
/// the worker still reads that request's answer before it looks at the next
/// one, so the engine never gets out of step with the requests.
///
/// Dropping the worker joins its thread only when no request is in flight;
/// otherwise the thread is detached and drops the engine once the pending
/// answer arrives.
pub struct EngineWorker {
    name: String,
    timeout: Duration,
    busy: Arc<AtomicBool>,
    requests: Option<Sender<Request>>,
    handle: Option<JoinHandle<()>>,
}

impl EngineWorker {
    pub fn start<S>(name: impl Into<String>, source: S, timeout: Duration) -> Result<Self, EngineError>
    where
        S: BestMoveSource + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let busy = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&busy);
        let handle = thread::Builder::new()
            .name("uci-engine".to_string())
            .spawn(move || serve(source, rx, &flag))?;

        Ok(Self {
            name: name.into(),
            timeout,
            busy,
            requests: Some(tx),
            handle: Some(handle),
        })
    }

    /// Spawn the configured engine process and start serving it.
    pub fn launch(config: &BridgeConfig) -> Result<Self, EngineError> {
        let process = EngineProcess::spawn(&config.engine_path, config.engine_options())?;
        let name = config
            .engine_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.engine_path.display().to_string());
        Self::start(name, process, config.timeout())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ask for the best move in `state`, waiting at most [`Self::timeout`].
    pub fn best_move(&self, state: &str) -> Result<BestMove, EngineError> {
        let requests = self.requests.as_ref().ok_or(EngineError::Closed)?;
        let (reply, answer) = mpsc::channel();
        requests
            .send(Request {
                state: state.to_string(),
                reply,
            })
            .map_err(|_| EngineError::Closed)?;

        match answer.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => Err(EngineError::Timeout(self.timeout)),
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::Closed),
        }
    }
}

fn serve<S: BestMoveSource>(mut source: S, requests: Receiver<Request>, busy: &AtomicBool) {
    for request in requests {
        busy.store(true, Ordering::SeqCst);
        let result = source.best_move(&request.state);
        busy.store(false, Ordering::SeqCst);
        // A dead pipe will not recover; stop and let later requests see Closed.
        let fatal = matches!(result, Err(EngineError::Closed | EngineError::Io(_)));

        if request.reply.send(result).is_err() {
            debug!(state = %request.state, "answer arrived after the caller timed out");
        }
        if fatal {
            warn!("engine connection lost, worker stopping");
            break;
        }
    }
}

impl MoveProvider for EngineWorker {
    fn request_move(&mut self, game: &GameState) -> Option<Move> {
        if game.is_game_over() {
            return None;
        }
        // State strings list physical rows, which only read as FEN on a
        // Standard board.
        if game.board().orientation() != Orientation::Standard {
            warn!(engine = %self.name, "engine play needs a Standard board");
            return None;
        }

        match self.best_move(game.state_string()) {
            Ok(BestMove::Move(txt)) => {
                let mv = resolve_coordinate_move(game, &txt);
                if mv.is_none() {
                    warn!(bestmove = %txt, state = %game.state_string(), "engine move is not legal here");
                }
                mv
            }
            Ok(BestMove::NoMove) => None,
            Err(e) => {
                warn!(error = %e, engine = %self.name, "engine request failed");
                None
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for EngineWorker {
    fn drop(&mut self) {
        // Closing the channel ends the serve loop, which drops the source.
        self.requests.take();
        let Some(handle) = self.handle.take() else {
            return;
        };
        if self.busy.load(Ordering::SeqCst) {
            warn!(engine = %self.name, "engine still thinking, detaching worker");
            return;
        }
        if handle.join().is_err() {
            warn!(engine = %self.name, "engine worker panicked");
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
