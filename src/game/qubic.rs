use std::fmt::{Display, Formatter};
use std::sync::Arc;

use generic_array::ArrayLength;

use crate::game::grid::{self, Grid, GridIndex, Line};
use crate::game::{
    Board, BoardCell, FinishedState, GameError, GameResult, GameState, PlayerPosition,
};

pub const MIN_SIZE: usize = 3;
pub const MAX_SIZE: usize = 5;

type Cell = BoardCell<PlayerPosition>;

/// Tic-tac-toe on an `N`×`N`×`N` cube for two players.
/// A player wins by filling any line of the cube, the game is a draw once the cube is full.
#[derive(Clone, Debug)]
pub struct Qubic<N: ArrayLength> {
    players: [PlayerPosition; 2],
    state: GameState,
    field: Grid<Cell, N>,
    lines: Arc<[Line]>,
    history: Vec<GridIndex>,
}

impl<N: ArrayLength> Qubic<N> {
    /// Creates an empty cube, `first` makes the first move.
    pub fn new(first: PlayerPosition, second: PlayerPosition) -> GameResult<Self> {
        let size = Grid::<Cell, N>::size();
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GameError::unsupported_size(MIN_SIZE, MAX_SIZE, size));
        }
        if first == second {
            return Err(GameError::DuplicatePlayerId(first));
        }
        Ok(Self {
            players: [first, second],
            state: GameState::Turn(first),
            field: Grid::default(),
            lines: grid::lines(size).into(),
            history: Vec::with_capacity(size * size * size),
        })
    }

    pub fn players(&self) -> [PlayerPosition; 2] {
        self.players
    }

    /// Overwrites a cell without checking the rules and without touching the history
    /// or the game state. Used to set up positions.
    pub fn set_cell(&mut self, index: GridIndex, cell: Cell) -> GameResult<()> {
        let size = self.size();
        let target = self
            .field
            .get_mut(index)
            .ok_or(GameError::out_of_bounds(index, size))?;
        *target = cell;
        Ok(())
    }

    fn current_player(&self) -> PlayerPosition {
        self.players[self.history.len() % 2]
    }

    fn is_line_owned_by(&self, line: Line, player: PlayerPosition) -> bool {
        self.field
            .line_iter(line)
            .all(|cell| **cell == Some(player))
    }

    fn update_state(&mut self, last_move: GridIndex) -> GameState {
        let player = self.current_player();
        let won = self
            .lines
            .iter()
            .filter(|line| line.iter().any(|index| index == last_move))
            .any(|line| self.is_line_owned_by(*line, player));

        self.history.push(last_move);
        self.state = if won {
            GameState::Finished(FinishedState::Win(player))
        } else if self.field.all_indexed().all(|(_, cell)| cell.is_some()) {
            GameState::Finished(FinishedState::Draw)
        } else {
            GameState::Turn(self.current_player())
        };
        self.state
    }
}

impl<N: ArrayLength> Board for Qubic<N> {
    fn size(&self) -> usize {
        Grid::<Cell, N>::size()
    }

    fn field_value(&self, index: GridIndex) -> BoardCell<PlayerPosition> {
        self.field.get(index).copied().unwrap_or_default()
    }

    fn make_move(&mut self, player: PlayerPosition, index: GridIndex) -> GameResult<GameState> {
        if self.is_finished() {
            return Err(GameError::GameIsFinished);
        }
        let current = self.current_player();
        if player != current {
            return Err(GameError::not_your_turn(current, player));
        }

        let size = self.size();
        let cell = self
            .field
            .get_mut(index)
            .ok_or(GameError::out_of_bounds(index, size))?;
        if cell.is_some() {
            return Err(GameError::cell_is_occupied(index));
        }
        *cell = player.into();

        Ok(self.update_state(index))
    }

    fn move_history(&self) -> &[GridIndex] {
        &self.history
    }

    fn state(&self) -> GameState {
        self.state
    }
}

impl<N: ArrayLength> Display for Qubic<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.field)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use generic_array::typenum::{U2, U3, U4, U6};

    fn play<N: ArrayLength>(game: &mut Qubic<N>, moves: &[(usize, usize, usize)]) -> GameState {
        let mut state = game.state();
        for &m in moves {
            let player = match state {
                GameState::Turn(id) => id,
                GameState::Finished(_) => panic!("game is already finished"),
            };
            state = game.make_move(player, m.into()).unwrap();
        }
        state
    }

    #[test]
    fn test_new_rejects_unsupported_size() {
        assert_eq!(
            Qubic::<U2>::new(1, 2).unwrap_err(),
            GameError::unsupported_size(3, 5, 2)
        );
        assert_eq!(
            Qubic::<U6>::new(1, 2).unwrap_err(),
            GameError::unsupported_size(3, 5, 6)
        );
        assert_eq!(
            Qubic::<U3>::new(7, 7).unwrap_err(),
            GameError::DuplicatePlayerId(7)
        );
    }

    #[test]
    fn test_turn_order() {
        let mut game = Qubic::<U3>::new(1, 2).unwrap();
        assert_eq!(game.state(), GameState::Turn(1));
        assert_eq!(
            game.make_move(2, (0, 0, 0).into()),
            Err(GameError::not_your_turn(1, 2))
        );
        assert_eq!(game.make_move(1, (0, 0, 0).into()), Ok(GameState::Turn(2)));
        assert_eq!(
            game.make_move(2, (0, 0, 0).into()),
            Err(GameError::cell_is_occupied((0, 0, 0).into()))
        );
        assert_eq!(
            game.make_move(2, (0, 3, 0).into()),
            Err(GameError::out_of_bounds((0, 3, 0).into(), 3))
        );
        assert_eq!(game.move_history(), &[GridIndex::new(0, 0, 0)]);
    }

    #[test]
    fn test_space_diagonal_win() {
        let mut game = Qubic::<U4>::new(1, 2).unwrap();
        let state = play(
            &mut game,
            &[
                (0, 0, 0),
                (1, 0, 0),
                (1, 1, 1),
                (2, 0, 0),
                (2, 2, 2),
                (3, 1, 0),
                (3, 3, 3),
            ],
        );
        assert_eq!(state, GameState::Finished(FinishedState::Win(1)));
        assert_eq!(game.winner(), Some(1));
        assert_eq!(
            game.make_move(2, (0, 1, 0).into()),
            Err(GameError::GameIsFinished)
        );
    }

    #[test]
    fn test_cross_layer_diagonal_win() {
        let mut game = Qubic::<U3>::new(1, 2).unwrap();
        let state = play(
            &mut game,
            &[(0, 0, 0), (2, 0, 0), (0, 1, 2), (2, 1, 1), (1, 2, 0), (2, 2, 2)],
        );
        assert_eq!(state, GameState::Finished(FinishedState::Win(2)));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut game = Qubic::<U3>::new(1, 2).unwrap();
        game.make_move(1, (1, 1, 1).into()).unwrap();

        let mut copy = game.clone();
        copy.make_move(2, (0, 2, 1).into()).unwrap();

        assert_eq!(copy.field_value((0, 2, 1).into()), BoardCell(Some(2)));
        assert_eq!(game.field_value((0, 2, 1).into()), BoardCell(None));
        assert_eq!(game.move_history().len(), 1);
        assert_eq!(game.state(), GameState::Turn(2));
    }

    #[test]
    fn test_set_cell() {
        let mut game = Qubic::<U3>::new(1, 2).unwrap();
        game.set_cell((2, 1, 0).into(), 2.into()).unwrap();
        assert_eq!(game.field_value((2, 1, 0).into()), BoardCell(Some(2)));
        assert!(game.move_history().is_empty());
        assert!(game.set_cell((3, 0, 0).into(), 1.into()).is_err());
    }
}
