use std::cmp::Ordering;

use rand::Rng;
use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::ai::error::ConfigError;
use crate::ai::features::{self, Features, NUM_FEATURES};
use crate::game::grid;
use crate::game::{Board, GameError, GameResult, GameState, GridIndex, PlayerPosition};

pub const LEARNING_RATE: f32 = 0.0001;
pub const VALUE_BOUND: f32 = 200.0;

pub const WIN_REWARD: f32 = 200.0;
pub const LOSS_REWARD: f32 = -200.0;
pub const DRAW_REWARD: f32 = 0.0;

/// Moves that must be on the board before the agent compares its last
/// self-assessment with the current one: its own previous move and the reply.
const MIN_HISTORY_FOR_UPDATE: usize = 2;

pub type Weights = [f32; NUM_FEATURES];
type Value = f32;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentConfig {
    pub learning_rate: f32,
    /// Values are clamped to `[-value_bound, value_bound]`.
    pub value_bound: f32,
    pub win_reward: f32,
    pub loss_reward: f32,
    pub draw_reward: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: LEARNING_RATE,
            value_bound: VALUE_BOUND,
            win_reward: WIN_REWARD,
            loss_reward: LOSS_REWARD,
            draw_reward: DRAW_REWARD,
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ConfigError::InvalidLearningRate(self.learning_rate));
        }
        if !(self.value_bound.is_finite() && self.value_bound > 0.0) {
            return Err(ConfigError::InvalidValueBound(self.value_bound));
        }
        for reward in [self.win_reward, self.loss_reward, self.draw_reward] {
            if !(reward.abs() <= self.value_bound) {
                return Err(ConfigError::reward_out_of_bound(reward, self.value_bound));
            }
        }
        Ok(())
    }
}

/// Self-assessment of the position the agent moved from on its last turn.
#[derive(Clone, Copy, Debug)]
struct LearningMemory {
    features: Features,
    value: Value,
}

/// Linear value function over board features, trained online with TD(0).
///
/// On every turn the agent scores the current position, moves the weights of the
/// previous position's value towards it and then plays the move leading to the
/// highest scored position, ties are broken uniformly at random with `rng`.
/// At the end of a match the weights are moved towards the outcome instead.
///
/// Weights live as long as the agent, one instance learns across any number of games.
#[derive(Debug)]
pub struct Agent<R> {
    player: PlayerPosition,
    config: AgentConfig,
    weights: Weights,
    memory: Option<LearningMemory>,
    games_played: usize,
    rng: R,
}

impl<R: Rng> Agent<R> {
    /// Creates an agent with zero weights and the default configuration.
    pub fn new(player: PlayerPosition, rng: R) -> Self {
        Self {
            player,
            config: AgentConfig::default(),
            weights: [0.0; NUM_FEATURES],
            memory: None,
            games_played: 0,
            rng,
        }
    }

    pub fn with_config(player: PlayerPosition, config: AgentConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(player, rng)
        })
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn player(&self) -> PlayerPosition {
        self.player
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn games_played(&self) -> usize {
        self.games_played
    }

    /// Value of `board` for this agent, always within the configured bound.
    pub fn evaluate<B: Board>(&self, board: &B) -> Value {
        self.value(&features::extract(board, self.player))
    }

    pub fn value(&self, features: &Features) -> Value {
        let bound = self.config.value_bound;
        dot(&self.weights, features).clamp(-bound, bound)
    }

    /// TD(0) step: moves the value of `prev_features` from `prev_value` towards `target_value`.
    pub fn update(&mut self, prev_value: Value, target_value: Value, prev_features: &Features) {
        let error = target_value - prev_value;
        for (weight, feature) in self.weights.iter_mut().zip(prev_features) {
            *weight += self.config.learning_rate * *feature as f32 * error;
        }
        trace!(
            "player {}: td error {}, weights {:?}",
            self.player,
            error,
            self.weights
        );
    }

    /// Picks the move for the current turn and learns from the previous one.
    /// Returns [`None`] if there is no legal move for the agent.
    ///
    /// Fails without learning anything if it's not the agent's turn. Engine errors
    /// other than an occupied cell or a finished game are passed on.
    ///
    /// `board` is only read, candidate moves are tried out on copies.
    pub fn get_action<B: Board>(&mut self, board: &B) -> GameResult<Option<GridIndex>> {
        match board.state() {
            GameState::Finished(_) => return Ok(None),
            GameState::Turn(current) if current != self.player => {
                return Err(GameError::not_your_turn(current, self.player));
            }
            GameState::Turn(_) => {}
        }

        let features = features::extract(board, self.player);
        let value = self.value(&features);

        let previous = self
            .memory
            .take()
            .filter(|_| board.move_history().len() >= MIN_HISTORY_FOR_UPDATE);
        if let Some(previous) = previous {
            self.update(previous.value, value, &previous.features);
        }
        self.memory = Some(LearningMemory { features, value });

        let best_actions = self.best_actions(board)?;
        let action = match best_actions.len() {
            0 => None,
            1 => Some(best_actions[0]),
            len => Some(best_actions[self.rng.gen_range(0..len)]),
        };
        if let Some(action) = action {
            debug!(
                "player {} plays {} (position value {}, {} best candidates)",
                self.player,
                action,
                value,
                best_actions.len()
            );
        }
        Ok(action)
    }

    /// Pulls the value of the final position towards the match outcome.
    pub fn on_match_end<B: Board>(&mut self, board: &B) {
        if !board.is_finished() {
            warn!("player {}: match ended on an unfinished board", self.player);
        }
        let target = match board.winner() {
            Some(winner) if winner == self.player => self.config.win_reward,
            Some(_) => self.config.loss_reward,
            None => self.config.draw_reward,
        };
        let features = features::extract(board, self.player);
        let value = self.value(&features);
        self.update(value, target, &features);

        self.memory = None;
        self.games_played += 1;
        debug!(
            "player {}: game {} ended, final value {}, target {}",
            self.player, self.games_played, value, target
        );
    }

    /// All legal moves sharing the highest value of the resulting position.
    fn best_actions<B: Board>(&self, board: &B) -> GameResult<SmallVec<[GridIndex; 8]>> {
        let mut best_value: Option<Value> = None;
        let mut best_actions = SmallVec::new();
        for action in grid::indices(board.size()) {
            let mut trial = board.clone();
            match trial.make_move(self.player, action) {
                Ok(_) => {}
                Err(GameError::CellIsOccupied { .. }) | Err(GameError::GameIsFinished) => continue,
                Err(err) => return Err(err),
            }
            let value = self.evaluate(&trial);
            // the first legal move seeds the maximum, so all-negative positions still yield a move
            let ordering = best_value.map_or(Some(Ordering::Greater), |best| value.partial_cmp(&best));
            match ordering {
                Some(Ordering::Greater) => {
                    best_actions.clear();
                    best_actions.push(action);
                    best_value = Some(value);
                }
                Some(Ordering::Equal) => {
                    best_actions.push(action);
                }
                _ => {}
            }
        }
        Ok(best_actions)
    }
}

fn dot(weights: &Weights, features: &Features) -> f32 {
    weights
        .iter()
        .zip(features)
        .map(|(weight, feature)| weight * *feature as f32)
        .sum()
}
