//! The level: tile grid, live entities, and per-tick orchestration.

use std::collections::HashMap;

use crate::api::game::StepContext;
use crate::api::types::{BlockContent, Effect, EntityId, GameEvent, SoundId};
use crate::collision::entity_collider::EntityCollider;
use crate::collision::tile_grid::{TileGrid, TileKind};
use crate::core::entity::Entity;

/// One playable level: the grid, the live entity set, the entity
/// collider, and the authored content of question/hidden blocks.
///
/// [`update`](Self::update) runs one fixed step. Structural mutation
/// (spawns, despawns, block hits) requested during the step is queued on
/// the [`StepContext`] and applied at the end of the tick, so capability
/// code never invalidates the entity list it is being iterated from.
#[derive(Debug)]
pub struct Level {
    grid: TileGrid,
    entities: Vec<Entity>,
    collider: EntityCollider,
    block_contents: HashMap<(i32, i32), BlockContent>,
}

impl Level {
    pub fn new(grid: TileGrid) -> Self {
        Self {
            grid,
            entities: Vec::new(),
            collider: EntityCollider::new(),
            block_contents: HashMap::new(),
        }
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut TileGrid {
        &mut self.grid
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id() == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id() == id)
    }

    /// Add an entity immediately. From inside a tick, use
    /// [`StepContext::spawn`] instead.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Author the content popped out of the question/hidden block at
    /// `(cx, cy)`. Blocks without an entry yield a coin.
    pub fn set_block_content(&mut self, cx: i32, cy: i32, content: BlockContent) {
        self.block_contents.insert((cx, cy), content);
    }

    /// Run one fixed simulation step.
    pub fn update(&mut self, dt: f32, ctx: &mut StepContext) {
        for i in 0..self.entities.len() {
            self.entities[i].update(dt, &self.grid, ctx);
        }

        self.collider.check(&mut self.entities, ctx);

        for hit in ctx.take_block_hits() {
            self.hit_block(hit.cx, hit.cy, hit.powered, ctx);
        }

        self.entities.extend(ctx.take_spawns());
        let removals = ctx.take_removals();
        if !removals.is_empty() {
            self.entities.retain(|e| !removals.contains(&e.id()));
        }
    }

    /// React to a block being struck from below.
    ///
    /// Question and hidden blocks pop their authored content (spawning
    /// the item itself is the game layer's reaction to the event) and
    /// turn into used blocks. Bricks break when the striker is powered
    /// up, otherwise they just thud. Everything else, including cells
    /// outside the grid, is a no-op.
    pub fn hit_block(&mut self, cx: i32, cy: i32, powered: bool, ctx: &mut StepContext) {
        let Some(tile) = self.grid.get(cx, cy) else {
            return;
        };
        let x = self.grid.to_pixel(cx);
        let y = self.grid.to_pixel(cy);

        match tile.kind {
            TileKind::Question | TileKind::Hidden => {
                if tile.kind == TileKind::Hidden {
                    // Reveal flourish on discovery.
                    ctx.spawn_effect(Effect::HitBurst { x, y });
                }
                let content = self
                    .block_contents
                    .get(&(cx, cy))
                    .copied()
                    .unwrap_or(BlockContent::Coin);
                match content {
                    BlockContent::Empty => ctx.emit_sound(SoundId::Bump),
                    BlockContent::Coin => ctx.emit_sound(SoundId::Coin),
                    BlockContent::Growth | BlockContent::Star | BlockContent::SpeedBoost => {
                        ctx.emit_sound(SoundId::PowerUp)
                    }
                }
                ctx.spawn_effect(Effect::Sparkles { x, y });
                // The item appears one tile above the struck block.
                ctx.emit_event(GameEvent::BlockContent {
                    content,
                    x,
                    y: y - self.grid.tile_size(),
                });
                self.grid.set(cx, cy, TileKind::Used);
            }
            TileKind::Brick => {
                if powered {
                    self.grid.set(cx, cy, TileKind::Air);
                    ctx.spawn_effect(Effect::BrickDebris { x, y });
                    ctx.emit_sound(SoundId::Brick);
                    ctx.emit_event(GameEvent::BrickBroken { x, y });
                } else {
                    ctx.emit_sound(SoundId::Bump);
                }
            }
            _ => {}
        }
    }
}
