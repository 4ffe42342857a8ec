//! Self-learning player for tic-tac-toe on an n×n×n cube.
//!
//! [`game`] holds the board engine, [`ai`] the TD(0) learner that picks its moves
//! with a linear value function over line-occupancy features, and [`runner`]
//! plays matches between two move strategies.

pub mod ai;
pub mod game;
pub mod runner;
