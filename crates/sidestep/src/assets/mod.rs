//! Authored content: serialized level data.

pub mod level_data;

pub use level_data::{BlockSpawn, EntitySpawn, LevelData, LevelError};
