//! Core simulation: time, entities, and the level.

pub mod entity;
pub mod level;
pub mod time;
