//! Reduces a board to a fixed-size description for the linear value function.
//!
//! Every winning line of the cube is scanned once. A line holding only the marks of
//! one player counts towards that player's bucket for the number of marks on it,
//! lines without marks or with marks of both players are dead and count nowhere.
//!
//! | index | meaning |
//! |---|---|
//! | 0 | bias, always 1 |
//! | 1..=5 | lines with exactly k own marks and no enemy marks |
//! | 6..=10 | lines with exactly k enemy marks and no own marks |

use crate::game::grid::{self, Line};
use crate::game::{Board, PlayerPosition};

/// Longest run that has a bucket of its own. Longer runs share the last bucket.
pub const MAX_RUN: usize = 5;
pub const NUM_FEATURES: usize = 2 * MAX_RUN + 1;
pub const BIAS: usize = 0;

pub type Features = [u32; NUM_FEATURES];

/// Computes the features of `board` from the point of view of `player`.
pub fn extract<B: Board>(board: &B, player: PlayerPosition) -> Features {
    let mut features = [0; NUM_FEATURES];
    features[BIAS] = 1;
    for line in grid::lines(board.size()) {
        let (mine, enemy) = count_marks(board, line, player);
        if let Some(index) = bucket(mine, enemy) {
            features[index] += 1;
        }
    }
    features
}

/// Feature index a line with `mine` own and `enemy` enemy marks contributes to.
pub fn bucket(mine: usize, enemy: usize) -> Option<usize> {
    match (mine, enemy) {
        (0, 0) => None,
        (mine, 0) => Some(mine.min(MAX_RUN)),
        (0, enemy) => Some(enemy.min(MAX_RUN) + MAX_RUN),
        _ => None,
    }
}

fn count_marks<B: Board>(board: &B, line: Line, player: PlayerPosition) -> (usize, usize) {
    line.iter()
        .fold((0, 0), |(mine, enemy), index| match board.field_value(index).0 {
            Some(owner) if owner == player => (mine + 1, enemy),
            Some(_) => (mine, enemy + 1),
            None => (mine, enemy),
        })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::{BoardCell, FinishedState, GameError, GameResult, GameState, GridIndex, Qubic};
    use generic_array::typenum::{U3, U4};

    /// Board of any size where every cell belongs to player 1.
    #[derive(Clone)]
    struct FilledBoard {
        size: usize,
    }

    impl Board for FilledBoard {
        fn size(&self) -> usize {
            self.size
        }

        fn field_value(&self, _index: GridIndex) -> BoardCell<PlayerPosition> {
            BoardCell(Some(1))
        }

        fn make_move(&mut self, _player: PlayerPosition, _index: GridIndex) -> GameResult<GameState> {
            Err(GameError::GameIsFinished)
        }

        fn move_history(&self) -> &[GridIndex] {
            &[]
        }

        fn state(&self) -> GameState {
            GameState::Finished(FinishedState::Win(1))
        }
    }

    #[test]
    fn test_bucket() {
        assert_eq!(bucket(0, 0), None);
        assert_eq!(bucket(2, 0), Some(2));
        assert_eq!(bucket(0, 3), Some(8));
        assert_eq!(bucket(1, 1), None);
        assert_eq!(bucket(7, 0), Some(5));
        assert_eq!(bucket(0, 6), Some(10));
    }

    #[test]
    fn test_empty_board() {
        let game = Qubic::<U3>::new(1, 2).unwrap();
        assert_eq!(extract(&game, 1), [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        let game = Qubic::<U4>::new(1, 2).unwrap();
        assert_eq!(extract(&game, 2), [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_single_mark_counts_lines_through_cell() {
        let mut game = Qubic::<U3>::new(1, 2).unwrap();
        game.set_cell((1, 1, 1).into(), 1.into()).unwrap();
        // the center lies on 13 lines
        assert_eq!(extract(&game, 1), [1, 13, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(extract(&game, 2), [1, 0, 0, 0, 0, 0, 13, 0, 0, 0, 0]);
    }

    #[test]
    fn test_three_in_a_row() {
        let mut game = Qubic::<U4>::new(1, 2).unwrap();
        for x in 0..3 {
            game.set_cell((x, 0, 0).into(), 1.into()).unwrap();
        }
        // the row holds all three marks, the 12 other lines through the marks hold one each
        assert_eq!(extract(&game, 1), [1, 12, 0, 1, 0, 0, 0, 0, 0, 0, 0]);

        game.set_cell((3, 0, 0).into(), 2.into()).unwrap();
        // the row is dead now, the corner adds 6 enemy lines
        assert_eq!(extract(&game, 1), [1, 12, 0, 0, 0, 0, 6, 0, 0, 0, 0]);
        assert_eq!(extract(&game, 2), [1, 6, 0, 0, 0, 0, 12, 0, 0, 0, 0]);
    }

    #[test]
    fn test_long_runs_share_last_bucket() {
        let board = FilledBoard { size: 7 };
        let features = extract(&board, 1);
        assert_eq!(features[MAX_RUN], grid::lines(7).len() as u32);
        assert_eq!(features.iter().sum::<u32>(), 1 + 193);
    }
}
