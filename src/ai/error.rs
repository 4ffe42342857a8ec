#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("learning rate must be positive and finite, found {0}")]
    InvalidLearningRate(f32),
    #[error("value bound must be positive and finite, found {0}")]
    InvalidValueBound(f32),
    #[error("reward {reward} is outside of the value bound {bound}")]
    RewardOutOfBound { reward: f32, bound: f32 },
}

impl ConfigError {
    pub fn reward_out_of_bound(reward: f32, bound: f32) -> Self {
        Self::RewardOutOfBound { reward, bound }
    }
}
