pub mod error;
pub mod grid;
pub mod qubic;

use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};

pub use error::GameError;
pub use grid::GridIndex;
pub use qubic::Qubic;

pub type GameResult<T> = Result<T, GameError>;
pub type PlayerPosition = u32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardCell<T>(pub Option<T>);

impl<T> Default for BoardCell<T> {
    fn default() -> Self {
        Self(Option::default())
    }
}

impl<T: Display> Display for BoardCell<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(val) => write!(f, "[{}]", val),
            None => f.write_str("[ ]"),
        }
    }
}

impl<T> From<T> for BoardCell<T> {
    fn from(value: T) -> Self {
        Self(Option::from(value))
    }
}

impl<T> Deref for BoardCell<T> {
    type Target = Option<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for BoardCell<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FinishedState {
    Win(PlayerPosition),
    Draw,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GameState {
    Turn(PlayerPosition),
    Finished(FinishedState),
}

/// Read-only view of a cubic board plus move submission, the surface a move
/// strategy needs from the game engine.
///
/// `Clone` must produce an independent copy: moves made on the clone never
/// affect the board it was cloned from.
pub trait Board: Clone {
    /// Side length of the cube.
    fn size(&self) -> usize;

    fn field_value(&self, index: GridIndex) -> BoardCell<PlayerPosition>;

    /// Puts the mark of `player` on `index`.
    /// Fails if the cell is occupied or outside the board, the game is finished
    /// or it's not `player`'s turn.
    fn make_move(&mut self, player: PlayerPosition, index: GridIndex) -> GameResult<GameState>;

    fn move_history(&self) -> &[GridIndex];

    fn state(&self) -> GameState;

    fn is_finished(&self) -> bool {
        matches!(self.state(), GameState::Finished(_))
    }

    /// Winner of a finished game, [`None`] for a draw or an unfinished game.
    fn winner(&self) -> Option<PlayerPosition> {
        match self.state() {
            GameState::Finished(FinishedState::Win(id)) => Some(id),
            _ => None,
        }
    }
}
