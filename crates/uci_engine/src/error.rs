use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failures talking to an external engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The executable could not be started. Callers continue without the
    /// engine instead of aborting the game.
    #[error("engine unavailable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("engine i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("unexpected engine output: {0}")]
    Protocol(String),
    #[error("engine did not answer within {0:?}")]
    Timeout(Duration),
    #[error("engine closed its output")]
    Closed,
}

/// Failures loading a [`BridgeConfig`](crate::BridgeConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown difficulty '{0}' (expected easy, medium, hard or unreal)")]
    Difficulty(String),
}
