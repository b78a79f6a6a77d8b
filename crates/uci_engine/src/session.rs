//! Line protocol with a running engine over any reader/writer pair.
//!
//! The session is generic so the same code drives a child process in
//! production and in-memory buffers in tests.

use std::io::{BufRead, Write};

use chess_core::parse_coordinate_move;
use tracing::{debug, trace};

use crate::{
    config::EngineOptions,
    error::EngineError,
    protocol::{go_command, option_commands, parse_bestmove, position_command, BestMove},
};

/// Anything that can answer "best move for this state string".
///
/// Implementations block until the answer arrives;
/// [`EngineWorker`](crate::EngineWorker) puts the timeout around them.
pub trait BestMoveSource: Send {
    fn best_move(&mut self, state: &str) -> Result<BestMove, EngineError>;
}

pub struct UciSession<R, W> {
    reader: R,
    writer: W,
    options: EngineOptions,
}

impl<R: BufRead, W: Write> UciSession<R, W> {
    pub fn new(reader: R, writer: W, options: EngineOptions) -> Self {
        Self {
            reader,
            writer,
            options,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Everything written to the engine so far (useful with in-memory writers).
    pub fn writer(&self) -> &W {
        &self.writer
    }

    fn send(&mut self, line: &str) -> Result<(), EngineError> {
        trace!(%line, "> engine");
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    /// Send the skill, thread and hash options.
    pub fn configure(&mut self) -> Result<(), EngineError> {
        for command in option_commands(&self.options) {
            self.send(&command)?;
        }
        self.writer.flush()?;
        debug!(options = ?self.options, "engine configured");
        Ok(())
    }

    /// Ask for a move in `state` and block until the `bestmove` line.
    pub fn request_best_move(&mut self, state: &str) -> Result<BestMove, EngineError> {
        self.send(&position_command(state))?;
        self.send(&go_command(&self.options))?;
        self.writer.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(EngineError::Closed);
            }
            let line = line.trim();
            trace!(%line, "< engine");

            match parse_bestmove(line) {
                None => continue,
                Some(BestMove::Move(mv)) if parse_coordinate_move(&mv).is_none() => {
                    return Err(EngineError::Protocol(line.to_string()));
                }
                Some(best) => return Ok(best),
            }
        }
    }

    pub fn quit(&mut self) -> Result<(), EngineError> {
        self.send("quit")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<R, W> BestMoveSource for UciSession<R, W>
where
    R: BufRead + Send,
    W: Write + Send,
{
    fn best_move(&mut self, state: &str) -> Result<BestMove, EngineError> {
        self.request_best_move(state)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
