use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many bombs, at least one cell must stay safe")]
    TooManyBombs,
    #[error("Board must have at least one cell")]
    EmptyBoard,
    #[error("Viewport must have at least one cell")]
    EmptyViewport,
    #[error("Generated board does not match the configured size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
