//! Text commands sent to a UCI engine and parsing of its answers.

use crate::config::EngineOptions;

/// Answer to a `go` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestMove {
    /// Coordinate move such as `e2e4` or `e7e8q`
    Move(String),
    /// `(none)` or the null move `0000`: the side to move has no legal move
    NoMove,
}

pub fn set_option(name: &str, value: impl std::fmt::Display) -> String {
    format!("setoption name {} value {}", name, value)
}

/// Startup configuration lines, in the order they are sent.
pub fn option_commands(options: &EngineOptions) -> [String; 3] {
    [
        set_option("Skill Level", options.skill_level),
        set_option("Threads", options.threads),
        set_option("Hash", options.hash_mb),
    ]
}

pub fn position_command(state: &str) -> String {
    format!("position fen {}", state)
}

pub fn go_command(options: &EngineOptions) -> String {
    format!("go movetime {} depth {}", options.move_time_ms, options.depth)
}

/// Parse one line of engine output.
///
/// Returns `None` for anything that is not a `bestmove` line (`info`, `id`,
/// blank lines and so on). A `bestmove` without a move token is treated as
/// no move.
pub fn parse_bestmove(line: &str) -> Option<BestMove> {
    let mut parts = line.split_whitespace();
    if parts.next()? != "bestmove" {
        return None;
    }
    match parts.next() {
        None | Some("(none)") | Some("0000") => Some(BestMove::NoMove),
        Some(mv) => Some(BestMove::Move(mv.to_string())),
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod protocol_tests;
