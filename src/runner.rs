use std::fmt::{Display, Formatter};

use rand::Rng;
use tracing::{debug, warn};

use crate::ai::MoveStrategy;
use crate::game::{Board, FinishedState, GameError, GameResult, GameState, PlayerPosition};

/// Plays `board` to the end, letting each strategy move on its player's turn,
/// and notifies both strategies about the result.
///
/// Errors of the game engine are returned as they are.
pub fn play_match<B: Board, R: Rng>(
    board: &mut B,
    strategies: [&mut MoveStrategy<R>; 2],
) -> GameResult<FinishedState> {
    let [first, second] = strategies;
    loop {
        let current = match board.state() {
            GameState::Turn(id) => id,
            GameState::Finished(result) => {
                first.on_match_end(board);
                second.on_match_end(board);
                debug!("match finished: {:?}", result);
                return Ok(result);
            }
        };

        let strategy = if first.player() == current {
            &mut *first
        } else if second.player() == current {
            &mut *second
        } else {
            return Err(GameError::PlayerNotFound(current));
        };
        let index = strategy
            .get_move(board)?
            .ok_or(GameError::NoMoveAvailable(current))?;
        board.make_move(current, index)?;
    }
}

/// Results of a series of matches between two players.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchStats {
    players: [PlayerPosition; 2],
    wins: [usize; 2],
    draws: usize,
}

impl MatchStats {
    pub fn new(players: [PlayerPosition; 2]) -> Self {
        Self {
            players,
            wins: [0; 2],
            draws: 0,
        }
    }

    pub fn record(&mut self, result: FinishedState) {
        match result {
            FinishedState::Draw => self.draws += 1,
            FinishedState::Win(id) => {
                match self.players.iter().position(|player| *player == id) {
                    Some(i) => self.wins[i] += 1,
                    None => warn!("ignoring a win of player {}, not part of {:?}", id, self.players),
                }
            }
        }
    }

    pub fn games(&self) -> usize {
        self.wins[0] + self.wins[1] + self.draws
    }

    pub fn wins(&self, player: PlayerPosition) -> usize {
        self.players
            .iter()
            .position(|p| *p == player)
            .map_or(0, |i| self.wins[i])
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.players);
    }
}

impl Display for MatchStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let games = self.games().max(1) as f32;
        write!(
            f,
            "games: {}, player {} wins: {} ({:.1}%), player {} wins: {} ({:.1}%), draws: {} ({:.1}%)",
            self.games(),
            self.players[0],
            self.wins[0],
            100.0 * self.wins[0] as f32 / games,
            self.players[1],
            self.wins[1],
            100.0 * self.wins[1] as f32 / games,
            self.draws,
            100.0 * self.draws as f32 / games,
        )
    }
}
