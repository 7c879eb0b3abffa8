//! Entities: a body plus a set of capabilities.

use glam::Vec2;

use crate::api::game::StepContext;
use crate::api::types::{EntityId, GameEvent};
use crate::capabilities::{Capability, CapabilityKind, CapabilitySet};
use crate::collision::tile_grid::TileGrid;

/// Axis-aligned bounding box in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    /// Strict overlap: shared edges do not count as touching.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// The physical part of an entity: position, velocity, and the collision
/// box. Split out from [`Entity`] so a capability can mutate the body
/// while holding a sibling view of the other capabilities.
///
/// `pos` is the sprite anchor (top-left); the collision box is `offset`
/// from it. Y grows downward, so gravity is positive.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision box size in pixels.
    pub size: Vec2,
    /// Collision box offset from `pos`.
    pub offset: Vec2,
}

impl Body {
    fn new(id: EntityId) -> Self {
        Self {
            id,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: Vec2::new(16.0, 16.0),
            offset: Vec2::ZERO,
        }
    }

    /// Current collision box in world pixels.
    pub fn bounds(&self) -> Aabb {
        let min = self.pos + self.offset;
        Aabb {
            min,
            max: min + self.size,
        }
    }

    /// Move so the collision box's bottom edge sits at `y`.
    pub fn set_bottom(&mut self, y: f32) {
        self.pos.y = y - self.size.y - self.offset.y;
    }

    /// Move so the collision box's top edge sits at `y`.
    pub fn set_top(&mut self, y: f32) {
        self.pos.y = y - self.offset.y;
    }

    /// Move so the collision box's left edge sits at `x`.
    pub fn set_left(&mut self, x: f32) {
        self.pos.x = x - self.offset.x;
    }

    /// Move so the collision box's right edge sits at `x`.
    pub fn set_right(&mut self, x: f32) {
        self.pos.x = x - self.size.x - self.offset.x;
    }
}

/// A simulated thing in the level: one body, one capability per kind.
///
/// Behavior lives entirely in the capabilities; the entity only runs the
/// pipeline. Composition is done with the builder methods:
///
/// ```
/// use sidestep::{Entity, EntityId, Go, Jump, Physics, Solid};
///
/// let player = Entity::new(EntityId(1))
///     .with_pos(32.0, 112.0)
///     .with_capability(Go::new())
///     .with_capability(Jump::new())
///     .with_capability(Physics::new())
///     .with_capability(Solid::new());
/// assert!(player.has(sidestep::CapabilityKind::Jump));
/// ```
#[derive(Debug, Clone)]
pub struct Entity {
    pub body: Body,
    /// Free-form label for game-layer queries ("player", "patroller").
    pub tag: String,
    /// Emit a `GameEvent::EntityContact` for every overlap involving
    /// this entity.
    pub notify_contacts: bool,
    lifetime: f32,
    caps: CapabilitySet,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self {
            body: Body::new(id),
            tag: String::new(),
            notify_contacts: false,
            lifetime: 0.0,
            caps: CapabilitySet::new(),
        }
    }

    pub fn with_pos(mut self, x: f32, y: f32) -> Self {
        self.body.pos = Vec2::new(x, y);
        self
    }

    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.body.size = Vec2::new(w, h);
        self
    }

    pub fn with_offset(mut self, x: f32, y: f32) -> Self {
        self.body.offset = Vec2::new(x, y);
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_notify_contacts(mut self) -> Self {
        self.notify_contacts = true;
        self
    }

    /// Attach a capability. Re-attaching a kind replaces the old one.
    pub fn with_capability(mut self, cap: impl Into<Capability>) -> Self {
        self.caps.add(cap.into());
        self
    }

    pub fn add_capability(&mut self, cap: impl Into<Capability>) {
        self.caps.add(cap.into());
    }

    pub fn id(&self) -> EntityId {
        self.body.id
    }

    /// Seconds since the entity was created.
    pub fn lifetime(&self) -> f32 {
        self.lifetime
    }

    pub fn has(&self, kind: CapabilityKind) -> bool {
        self.caps.has(kind)
    }

    pub fn capability(&self, kind: CapabilityKind) -> Option<&Capability> {
        self.caps.get(kind)
    }

    pub fn capability_mut(&mut self, kind: CapabilityKind) -> Option<&mut Capability> {
        self.caps.get_mut(kind)
    }

    /// Current collision box in world pixels.
    pub fn bounds(&self) -> Aabb {
        self.body.bounds()
    }

    /// Run one fixed step of the capability pipeline.
    pub fn update(&mut self, dt: f32, grid: &TileGrid, ctx: &mut StepContext) {
        self.lifetime += dt;
        for i in 0..self.caps.len() {
            let (cap, mut siblings) = self.caps.split_one(i);
            cap.update(&mut self.body, &mut siblings, grid, dt, ctx);
        }
    }

    /// Deliver an overlap with `other` to every capability, and raise a
    /// contact event when this entity asked for one.
    pub fn notify_entity_collide(&mut self, other: &mut Entity, ctx: &mut StepContext) {
        for i in 0..self.caps.len() {
            let (cap, mut siblings) = self.caps.split_one(i);
            cap.on_entity_collide(&mut self.body, &mut siblings, other, ctx);
        }
        if self.notify_contacts {
            ctx.emit_event(GameEvent::EntityContact {
                a: self.body.id,
                b: other.body.id,
            });
        }
    }
}
