//! Public surface: ids, events, the game contract, and the step context.

pub mod game;
pub mod types;
