//! Collision: the static tile grid and the entity-entity collider.

pub mod entity_collider;
pub mod tile_grid;

pub use entity_collider::EntityCollider;
pub use tile_grid::{RaggedRowsError, TileGrid, TileKind, TileMatch, TILE_SIZE};
