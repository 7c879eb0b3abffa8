//! sidestep — a headless simulation kernel for 2D tile-based
//! side-scrollers.
//!
//! The kernel owns the fixed-timestep clock, the tile grid and its
//! collision resolution, entity composition out of capabilities, and
//! entity-entity contact. It renders nothing and plays nothing: sounds,
//! events, and effects come out of the [`StepContext`] as queues for the
//! host to drain.
//!
//! Coordinates are pixels, Y grows downward, gravity is positive.

pub mod api;
pub mod assets;
pub mod capabilities;
pub mod collision;
pub mod core;
pub mod input;
pub mod presets;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, StepContext};
pub use api::types::{BlockContent, Effect, EntityId, GameEvent, Side, SoundId};
pub use assets::level_data::{BlockSpawn, EntitySpawn, LevelData, LevelError};
pub use capabilities::{
    Boost, Capability, CapabilityKind, CapabilitySet, Direction, Go, Jump, Killable,
    PendulumWalk, Physics, PowerState, PowerUp, Solid, Stage, Stomper,
};
pub use collision::entity_collider::EntityCollider;
pub use collision::tile_grid::{RaggedRowsError, TileGrid, TileKind, TileMatch, TILE_SIZE};
pub use self::core::entity::{Aabb, Body, Entity};
pub use self::core::level::Level;
pub use self::core::time::{FixedStepDriver, FixedTimestep};
pub use input::{InputEvent, InputQueue};
