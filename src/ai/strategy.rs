use rand::Rng;

use crate::ai::Agent;
use crate::game::grid;
use crate::game::{Board, GameResult, GridIndex, PlayerPosition};

fn get_random_position<B: Board, R: Rng>(board: &B, rng: &mut R) -> Option<GridIndex> {
    if board.is_finished() {
        return None;
    }
    let empty_cells: Vec<_> = grid::indices(board.size())
        .filter(|index| board.field_value(*index).is_none())
        .collect();
    if empty_cells.is_empty() {
        return None;
    }
    Some(empty_cells[rng.gen_range(0..empty_cells.len())])
}

/// A participant of a match.
pub enum MoveStrategy<R> {
    Random { player: PlayerPosition, rng: R },
    TdLearning(Agent<R>),
}

impl<R: Rng> MoveStrategy<R> {
    pub fn random(player: PlayerPosition, rng: R) -> Self {
        Self::Random { player, rng }
    }

    pub fn player(&self) -> PlayerPosition {
        match self {
            MoveStrategy::Random { player, .. } => *player,
            MoveStrategy::TdLearning(agent) => agent.player(),
        }
    }

    pub fn agent(&self) -> Option<&Agent<R>> {
        match self {
            MoveStrategy::Random { .. } => None,
            MoveStrategy::TdLearning(agent) => Some(agent),
        }
    }

    pub fn get_move<B: Board>(&mut self, board: &B) -> GameResult<Option<GridIndex>> {
        match self {
            MoveStrategy::Random { rng, .. } => Ok(get_random_position(board, rng)),
            MoveStrategy::TdLearning(agent) => agent.get_action(board),
        }
    }

    pub fn on_match_end<B: Board>(&mut self, board: &B) {
        if let MoveStrategy::TdLearning(agent) = self {
            agent.on_match_end(board);
        }
    }
}
