use serde::{Deserialize, Serialize};

/// Unique identifier for an entity in the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// The side of an entity's bounding box that touched a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

/// A sound cue emitted by simulation logic.
/// Fire-and-forget: the audio backend drains these from the step context
/// and the simulation never waits on playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundId {
    Jump,
    Coin,
    PowerUp,
    Brick,
    Bump,
    Stomp,
    Death,
}

/// A particle/visual cue emitted by simulation logic.
/// Positions are in world pixels; the effect backend owns everything else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Small sparkle burst (block hits, pickups).
    Sparkles { x: f32, y: f32 },
    /// Impact burst (stomps).
    HitBurst { x: f32, y: f32 },
    /// Flying brick fragments.
    BrickDebris { x: f32, y: f32 },
}

/// What a question/hidden block releases when struck from below.
/// Authored per block by the level data; the game layer spawns the
/// actual item entity in response to [`GameEvent::BlockContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockContent {
    Coin,
    Growth,
    Star,
    SpeedBoost,
    Empty,
}

/// An event communicated from the simulation to the game layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A block was struck from below and released its content.
    /// `x`/`y` is the pixel position where the item should appear
    /// (one tile above the block).
    BlockContent { content: BlockContent, x: f32, y: f32 },
    /// A brick was broken by a powered-up entity.
    BrickBroken { x: f32, y: f32 },
    /// An enemy was stomped. `x`/`y` is the enemy's top-center,
    /// where a score popup would go.
    Stomped { score: u32, x: f32, y: f32 },
    /// An entity's Killable capability fired.
    Died { id: EntityId },
    /// Two entity boxes overlapped this tick. Emitted once per
    /// overlapping pair for each entity that opted in with
    /// `notify_contacts`.
    EntityContact { a: EntityId, b: EntityId },
}
