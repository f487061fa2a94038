use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Symbol catalog too small, {required} pairs requested but only {available} symbols")]
    CatalogTooSmall { required: usize, available: usize },
    #[error("Invalid card position")]
    InvalidPosition,
    #[error("Every symbol of a deck must appear exactly twice")]
    InvalidDeck,
    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
}

/// Failures of the [`Storage`](crate::Storage) capability.
///
/// These never reach the player, the score store recovers from them.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("stored content is malformed")]
    Malformed,
}

pub type Result<T> = core::result::Result<T, GameError>;
