//! UCI engine bridge for chess_core
//!
//! This crate provides:
//! - A line-oriented UCI session over any reader/writer pair
//! - An external engine process driven through that session on a worker
//!   thread, with a per-request timeout
//! - Difficulty presets and TOML configuration
//! - A match runner that plays two move providers against each other and
//!   keeps a JSON game record
//!
//! # Usage
//!
//! ```bash
//! # Engine (White) against the random mover (Black)
//! cargo run -p uci_engine -- play --engine stockfish --difficulty hard
//!
//! # Read settings from a file and save the game
//! cargo run -p uci_engine -- play --config engine.toml --record game.json
//! ```

mod config;
mod error;
mod match_runner;
mod process;
mod protocol;
mod record;
mod session;
mod worker;

pub use config::*;
pub use error::*;
pub use match_runner::*;
pub use process::*;
pub use protocol::*;
pub use record::*;
pub use session::*;
pub use worker::*;
