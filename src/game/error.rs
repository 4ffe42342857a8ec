use super::grid::GridIndex;
use super::PlayerPosition;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GameError {
    #[error("player {0} not found")]
    PlayerNotFound(PlayerPosition),
    #[error("cell {index} is occupied")]
    CellIsOccupied { index: GridIndex },
    #[error("cell {index} is outside of the board (size: {size})")]
    OutOfBounds { index: GridIndex, size: usize },
    #[error("can't make turn on a finished game")]
    GameIsFinished,
    #[error("other player's turn (expected: {expected}, found: {found})")]
    NotYourTurn {
        expected: PlayerPosition,
        found: PlayerPosition,
    },
    #[error("player ids must be unique, found {0} twice")]
    DuplicatePlayerId(PlayerPosition),
    #[error("unsupported board size {found} (expected: {min}-{max})")]
    UnsupportedSize { min: usize, max: usize, found: usize },
    #[error("player {0} has no move on an unfinished board")]
    NoMoveAvailable(PlayerPosition),
}

impl GameError {
    pub fn cell_is_occupied(index: GridIndex) -> Self {
        Self::CellIsOccupied { index }
    }

    pub fn out_of_bounds(index: GridIndex, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    pub fn not_your_turn(expected: PlayerPosition, found: PlayerPosition) -> Self {
        Self::NotYourTurn { expected, found }
    }

    pub fn unsupported_size(min: usize, max: usize, found: usize) -> Self {
        Self::UnsupportedSize { min, max, found }
    }
}
