//! The engine as a child process.

use std::io::BufReader;
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use tracing::{debug, info, warn};

use crate::{
    config::EngineOptions,
    error::EngineError,
    protocol::BestMove,
    session::{BestMoveSource, UciSession},
};

/// A running engine. Dropping it sends `quit` and waits for the process to
/// exit.
pub struct EngineProcess {
    child: Child,
    session: UciSession<BufReader<ChildStdout>, ChildStdin>,
}

impl EngineProcess {
    /// Start the executable at `path` and send the startup options.
    ///
    /// A missing or non-executable file is reported as
    /// [`EngineError::Unavailable`].
    pub fn spawn(path: &Path, options: EngineOptions) -> Result<Self, EngineError> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EngineError::Unavailable {
                path: path.to_path_buf(),
                source,
            })?;

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(EngineError::Closed);
        };

        let mut process = Self {
            session: UciSession::new(BufReader::new(stdout), stdin, options),
            child,
        };
        process.session.configure()?;
        info!(path = %path.display(), pid = process.child.id(), "engine started");
        Ok(process)
    }

    pub fn id(&self) -> u32 {
        self.child.id()
    }
}

impl BestMoveSource for EngineProcess {
    fn best_move(&mut self, state: &str) -> Result<BestMove, EngineError> {
        self.session.request_best_move(state)
    }
}

impl Drop for EngineProcess {
    fn drop(&mut self) {
        if let Err(e) = self.session.quit() {
            debug!(error = %e, "could not send quit");
        }
        match self.child.wait() {
            Ok(status) => debug!(%status, "engine exited"),
            Err(e) => warn!(error = %e, "failed to wait for engine"),
        }
    }
}
