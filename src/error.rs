//! Error types

/// Errors surfaced to the host
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A game is already running in this session
    #[error("a game is already running in this session; refusing to start another")]
    AlreadyRunning,
    /// Configuration could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type GameResult<T> = Result<T, GameError>;
