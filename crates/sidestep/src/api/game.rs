use crate::api::types::{Effect, EntityId, GameEvent, SoundId};
use crate::core::entity::Entity;
use crate::core::level::Level;
use crate::input::InputQueue;

/// Configuration for the simulation kernel, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Longest wall-clock delta accepted per frame (default: 0.25 s).
    pub max_frame_time: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_frame_time: 0.25,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return kernel configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state: build the level, spawn entities.
    fn init(&mut self, level: &mut Level, ctx: &mut StepContext);

    /// The game loop tick, called once per fixed step before the level
    /// simulates. Route input, check win conditions, spawn/despawn.
    fn update(&mut self, level: &mut Level, ctx: &mut StepContext, input: &InputQueue);
}

/// A deferred "hit from below" on a grid cell, queued by the tile
/// resolver and drained by the level at the end of the tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockHit {
    pub cx: i32,
    pub cy: i32,
    /// Whether the striking entity was in a powered-up state.
    pub powered: bool,
}

/// Mutable per-step state shared down the capability pipeline.
///
/// The public vectors are out-queues: capabilities and the level push
/// sounds, events, and effects; the host drains them after each render
/// frame with [`clear_frame_output`](Self::clear_frame_output). Nothing
/// in the kernel plays or draws anything itself.
///
/// The private queues defer structural mutation (spawns, despawns, block
/// hits) to the end of the level tick, so capabilities can request them
/// freely while the entity list is being iterated.
pub struct StepContext {
    pub sounds: Vec<SoundId>,
    pub events: Vec<GameEvent>,
    pub effects: Vec<Effect>,
    spawns: Vec<Entity>,
    removals: Vec<EntityId>,
    block_hits: Vec<BlockHit>,
    next_id: u32,
}

impl StepContext {
    pub fn new() -> Self {
        Self {
            sounds: Vec::new(),
            events: Vec::new(),
            effects: Vec::new(),
            spawns: Vec::new(),
            removals: Vec::new(),
            block_hits: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Queue a sound for the host's audio layer.
    pub fn emit_sound(&mut self, sound: SoundId) {
        self.sounds.push(sound);
    }

    /// Queue a gameplay event for the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Queue a visual effect for the host's particle layer.
    pub fn spawn_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    /// Queue an entity to join the level at the end of the current tick.
    pub fn spawn(&mut self, entity: Entity) {
        self.spawns.push(entity);
    }

    /// Queue an entity for removal at the end of the current tick.
    pub fn despawn(&mut self, id: EntityId) {
        if !self.removals.contains(&id) {
            self.removals.push(id);
        }
    }

    pub(crate) fn request_block_hit(&mut self, cx: i32, cy: i32, powered: bool) {
        self.block_hits.push(BlockHit { cx, cy, powered });
    }

    pub(crate) fn take_block_hits(&mut self) -> Vec<BlockHit> {
        std::mem::take(&mut self.block_hits)
    }

    pub(crate) fn take_spawns(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.spawns)
    }

    pub(crate) fn take_removals(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.removals)
    }

    /// Clear the out-queues. The host calls this once it has forwarded
    /// sounds, events, and effects for the frame.
    pub fn clear_frame_output(&mut self) {
        self.sounds.clear();
        self.events.clear();
        self.effects.clear();
    }
}

impl Default for StepContext {
    fn default() -> Self {
        Self::new()
    }
}
