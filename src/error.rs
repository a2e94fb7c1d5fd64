use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Contract violations detected while building a game from its configuration.
///
/// All of these are raised before the first tick runs.
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(u16),
    #[error("initial tick interval must be greater than zero")]
    ZeroInterval,
    #[error("minimum tick interval must be greater than zero")]
    ZeroMinInterval,
    #[error("minimum tick interval {min_ms}ms exceeds the initial interval {initial_ms}ms")]
    MinAboveInitial { min_ms: u64, initial_ms: u64 },
    #[error("origin ({x}, {y}) lies outside a {size}x{size} grid")]
    OriginOutOfBounds { x: i32, y: i32, size: u16 },
    #[error("palette must contain at least one colour")]
    EmptyPalette,
    #[error("invalid palette colour {0:?}, expected #RRGGBB")]
    InvalidColor(String),
}

/// Top-level failures of the terminal front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("terminal error: {0}")]
    Io(#[from] io::Error),
}
