//! Bridge configuration: which engine to run and how hard it should play.
//!
//! Values come from an optional TOML file; command-line flags are applied on
//! top by the binary.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Named strength presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Unreal,
}

impl Difficulty {
    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "unreal" => Some(Difficulty::Unreal),
            _ => None,
        }
    }

    /// Engine settings for this preset.
    pub fn options(self) -> EngineOptions {
        let (skill_level, threads, depth, move_time_ms, hash_mb) = match self {
            Difficulty::Easy => (1, 1, 1, 10, 16),
            Difficulty::Medium => (5, 2, 2, 20, 64),
            Difficulty::Hard => (10, 4, 3, 30, 128),
            Difficulty::Unreal => (20, 8, 5, 50, 256),
        };
        EngineOptions {
            skill_level,
            threads,
            hash_mb,
            move_time_ms,
            depth,
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::from_str_loose(s).ok_or_else(|| ConfigError::Difficulty(s.to_string()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Unreal => write!(f, "unreal"),
        }
    }
}

/// Settings sent to the engine: three `setoption`s at startup, the rest on
/// every `go`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    pub skill_level: u8,
    pub threads: u16,
    pub hash_mb: u32,
    pub move_time_ms: u64,
    pub depth: u8,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Difficulty::default().options()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// Executable name or path of the engine
    pub engine_path: PathBuf,
    pub difficulty: Difficulty,
    /// How long a caller waits for one `bestmove`
    pub timeout_ms: u64,
    /// Half-moves before a played game is abandoned
    pub max_moves: u32,

    // Explicit overrides of the difficulty preset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_mb: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub move_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u8>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            engine_path: PathBuf::from("stockfish"),
            difficulty: Difficulty::Medium,
            timeout_ms: 5000,
            max_moves: 300,
            skill_level: None,
            threads: None,
            hash_mb: None,
            move_time_ms: None,
            depth: None,
        }
    }
}

impl BridgeConfig {
    /// Load from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Difficulty preset with any explicit overrides applied.
    pub fn engine_options(&self) -> EngineOptions {
        let preset = self.difficulty.options();
        EngineOptions {
            skill_level: self.skill_level.unwrap_or(preset.skill_level),
            threads: self.threads.unwrap_or(preset.threads),
            hash_mb: self.hash_mb.unwrap_or(preset.hash_mb),
            move_time_ms: self.move_time_ms.unwrap_or(preset.move_time_ms),
            depth: self.depth.unwrap_or(preset.depth),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
