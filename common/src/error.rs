use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid move: cell {index} is out of range or already occupied")]
    InvalidMove { index: usize },

    #[error("malformed persisted state: {0}")]
    MalformedPersistedState(String),

    #[error("storage error: {0}")]
    Storage(String),
}

pub type GameResult<T> = Result<T, GameError>;
