use thiserror::Error;

/// Failures that end the program abnormally.
/// Rule violations (blocked moves, bad input) are not errors.
#[derive(Debug, Error)]
pub enum GameError {
    /// Terminal read/write failure.
    #[error("terminal i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Explicitly requested config file could not be used.
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
