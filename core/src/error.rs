use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Mine count does not fit the field")]
    InvalidConfig,
    #[error("Wrong coordinates")]
    OutOfBounds,
    #[error("Unrecognized command")]
    MalformedCommand,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
