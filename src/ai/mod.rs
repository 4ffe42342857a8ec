pub mod agent;
pub mod error;
pub mod features;
pub mod strategy;

pub use agent::{Agent, AgentConfig, Weights};
pub use error::ConfigError;
pub use features::{Features, NUM_FEATURES};
pub use strategy::MoveStrategy;
