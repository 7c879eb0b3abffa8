//! Capability composition: the per-entity behavior units and the
//! pipeline that runs them.
//!
//! Every behavior (locomotion, jumping, gravity, tile solidity, …) is a
//! self-contained capability owned by exactly one entity. Capabilities
//! are a closed set keyed by [`CapabilityKind`], so lookup is cheap and
//! an entity holds at most one instance per kind.
//!
//! Execution order is an explicit pipeline, not registration order:
//! capabilities run sorted by [`Stage`] (stable within a stage). Input
//! modifiers run first, locomotion writes velocities, integration moves
//! the body, tile resolution corrects it, and lifecycle logic reacts
//! last. Collision notifications produced during tile resolution land in
//! capability state that the next tick consumes.

pub mod boost;
pub mod go;
pub mod jump;
pub mod killable;
pub mod pendulum;
pub mod physics;
pub mod power_up;
pub mod solid;
pub mod stomper;

pub use boost::Boost;
pub use go::Go;
pub use jump::Jump;
pub use killable::Killable;
pub use pendulum::PendulumWalk;
pub use physics::Physics;
pub use power_up::{PowerState, PowerUp};
pub use solid::Solid;
pub use stomper::Stomper;

use crate::api::game::StepContext;
use crate::api::types::Side;
use crate::collision::tile_grid::TileGrid;
use crate::core::entity::{Body, Entity};

/// Named pipeline stage. Stages run in declaration order each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Input-derived modifiers (buff meters).
    Input,
    /// Velocity-writing behaviors (walking, jumping, patrolling).
    Locomotion,
    /// Gravity and velocity→position integration.
    Integration,
    /// Tile collision resolution.
    TileResolution,
    /// Death, despawn, power state — reacts to everything above.
    Lifecycle,
}

/// Compile-time key identifying a capability kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    Boost,
    Go,
    Jump,
    PendulumWalk,
    Physics,
    Solid,
    Stomper,
    Killable,
    PowerUp,
}

/// Facing direction for locomotion capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    pub fn as_f32(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// A behavior unit attached to an entity. Closed tagged-variant set:
/// every concrete capability gets a variant here and a [`From`] impl so
/// entity builders can take `impl Into<Capability>`.
#[derive(Debug, Clone)]
pub enum Capability {
    Boost(Boost),
    Go(Go),
    Jump(Jump),
    PendulumWalk(PendulumWalk),
    Physics(Physics),
    Solid(Solid),
    Stomper(Stomper),
    Killable(Killable),
    PowerUp(PowerUp),
}

macro_rules! capability_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(impl From<$ty> for Capability {
            fn from(value: $ty) -> Self {
                Capability::$variant(value)
            }
        })*
    };
}

capability_from! {
    Boost => Boost,
    Go => Go,
    Jump => Jump,
    PendulumWalk => PendulumWalk,
    Physics => Physics,
    Solid => Solid,
    Stomper => Stomper,
    Killable => Killable,
    PowerUp => PowerUp,
}

macro_rules! capability_accessors {
    ($($as_ref:ident / $as_mut:ident => $variant:ident ( $ty:ty )),* $(,)?) => {
        $(
            pub fn $as_ref(&self) -> Option<&$ty> {
                if let Capability::$variant(inner) = self {
                    Some(inner)
                } else {
                    None
                }
            }

            pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                if let Capability::$variant(inner) = self {
                    Some(inner)
                } else {
                    None
                }
            }
        )*
    };
}

impl Capability {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::Boost(_) => CapabilityKind::Boost,
            Capability::Go(_) => CapabilityKind::Go,
            Capability::Jump(_) => CapabilityKind::Jump,
            Capability::PendulumWalk(_) => CapabilityKind::PendulumWalk,
            Capability::Physics(_) => CapabilityKind::Physics,
            Capability::Solid(_) => CapabilityKind::Solid,
            Capability::Stomper(_) => CapabilityKind::Stomper,
            Capability::Killable(_) => CapabilityKind::Killable,
            Capability::PowerUp(_) => CapabilityKind::PowerUp,
        }
    }

    pub fn stage(&self) -> Stage {
        match self.kind() {
            CapabilityKind::Boost => Stage::Input,
            CapabilityKind::Go | CapabilityKind::Jump | CapabilityKind::PendulumWalk => {
                Stage::Locomotion
            }
            CapabilityKind::Physics => Stage::Integration,
            CapabilityKind::Solid => Stage::TileResolution,
            CapabilityKind::Stomper | CapabilityKind::Killable | CapabilityKind::PowerUp => {
                Stage::Lifecycle
            }
        }
    }

    capability_accessors! {
        as_boost / as_boost_mut => Boost(Boost),
        as_go / as_go_mut => Go(Go),
        as_jump / as_jump_mut => Jump(Jump),
        as_pendulum / as_pendulum_mut => PendulumWalk(PendulumWalk),
        as_physics / as_physics_mut => Physics(Physics),
        as_solid / as_solid_mut => Solid(Solid),
        as_killable / as_killable_mut => Killable(Killable),
        as_power_up / as_power_up_mut => PowerUp(PowerUp),
    }

    /// Per-tick update hook. Capabilities that don't need one inherit the
    /// no-op arm.
    pub(crate) fn update(
        &mut self,
        body: &mut Body,
        siblings: &mut Siblings<'_>,
        grid: &TileGrid,
        dt: f32,
        ctx: &mut StepContext,
    ) {
        match self {
            Capability::Boost(c) => c.update(dt),
            Capability::Go(c) => c.update(body, siblings, dt),
            Capability::Jump(c) => c.update(body, siblings, dt, ctx),
            Capability::PendulumWalk(c) => c.update(body, siblings),
            Capability::Physics(c) => c.update(body, dt),
            Capability::Solid(c) => c.update(body, siblings, grid, ctx),
            Capability::Stomper(_) => {}
            Capability::Killable(c) => c.update(body, siblings, grid, dt, ctx),
            Capability::PowerUp(c) => c.update(dt),
        }
    }

    /// Tile contact notification, fired by the solidity resolver.
    pub(crate) fn on_tile_collide(&mut self, body: &mut Body, side: Side) {
        match self {
            Capability::Go(c) => c.on_tile_collide(body, side),
            Capability::Jump(c) => c.on_tile_collide(body, side),
            Capability::PendulumWalk(c) => c.on_tile_collide(side),
            _ => {}
        }
    }

    /// Entity overlap notification, fired by the entity collider.
    pub(crate) fn on_entity_collide(
        &mut self,
        body: &mut Body,
        siblings: &mut Siblings<'_>,
        other: &mut Entity,
        ctx: &mut StepContext,
    ) {
        match self {
            Capability::Stomper(c) => c.on_entity_collide(body, siblings, other, ctx),
            Capability::PendulumWalk(c) => c.on_entity_collide(body, siblings, other),
            _ => {}
        }
    }
}

/// View of every capability on an entity except the one currently
/// executing. Built with `split_at_mut`, so sibling access is safe while
/// the active capability holds `&mut self`.
///
/// A missing sibling is not an error: callers fall back to a
/// conservative default (no ground assist, multiplier 1.0, …).
pub struct Siblings<'a> {
    before: &'a mut [Capability],
    after: &'a mut [Capability],
}

impl<'a> Siblings<'a> {
    pub fn get(&self, kind: CapabilityKind) -> Option<&Capability> {
        self.before
            .iter()
            .chain(self.after.iter())
            .find(|c| c.kind() == kind)
    }

    pub fn get_mut(&mut self, kind: CapabilityKind) -> Option<&mut Capability> {
        self.before
            .iter_mut()
            .chain(self.after.iter_mut())
            .find(|c| c.kind() == kind)
    }

    pub fn has(&self, kind: CapabilityKind) -> bool {
        self.get(kind).is_some()
    }

    // Typed conveniences for the lookups the built-in capabilities do.

    pub fn solid(&self) -> Option<&Solid> {
        self.get(CapabilityKind::Solid).and_then(Capability::as_solid)
    }

    pub fn solid_mut(&mut self) -> Option<&mut Solid> {
        self.get_mut(CapabilityKind::Solid)
            .and_then(Capability::as_solid_mut)
    }

    pub fn boost(&self) -> Option<&Boost> {
        self.get(CapabilityKind::Boost).and_then(Capability::as_boost)
    }

    pub fn physics_mut(&mut self) -> Option<&mut Physics> {
        self.get_mut(CapabilityKind::Physics)
            .and_then(Capability::as_physics_mut)
    }

    pub fn power_up(&self) -> Option<&PowerUp> {
        self.get(CapabilityKind::PowerUp)
            .and_then(Capability::as_power_up)
    }

    pub fn power_up_mut(&mut self) -> Option<&mut PowerUp> {
        self.get_mut(CapabilityKind::PowerUp)
            .and_then(Capability::as_power_up_mut)
    }

    pub fn killable(&self) -> Option<&Killable> {
        self.get(CapabilityKind::Killable)
            .and_then(Capability::as_killable)
    }

    pub fn killable_mut(&mut self) -> Option<&mut Killable> {
        self.get_mut(CapabilityKind::Killable)
            .and_then(Capability::as_killable_mut)
    }

    /// Notify every sibling of a tile contact. The resolver calls this
    /// after snapping the body; it handles its own reaction inline.
    pub(crate) fn broadcast_tile_collide(&mut self, body: &mut Body, side: Side) {
        for cap in self.before.iter_mut().chain(self.after.iter_mut()) {
            cap.on_tile_collide(body, side);
        }
    }
}

/// Ordered, kind-keyed collection of capabilities.
///
/// Insertion keeps the set sorted by pipeline stage (stable within a
/// stage, so deliberate composition order still matters between peers).
/// Adding a capability of a kind already present replaces it in place.
#[derive(Debug, Clone, Default)]
pub struct CapabilitySet {
    caps: Vec<Capability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, cap: impl Into<Capability>) {
        let cap = cap.into();
        if let Some(existing) = self.caps.iter_mut().find(|c| c.kind() == cap.kind()) {
            *existing = cap;
            return;
        }
        let stage = cap.stage();
        let at = self
            .caps
            .iter()
            .position(|c| c.stage() > stage)
            .unwrap_or(self.caps.len());
        self.caps.insert(at, cap);
    }

    pub fn get(&self, kind: CapabilityKind) -> Option<&Capability> {
        self.caps.iter().find(|c| c.kind() == kind)
    }

    pub fn get_mut(&mut self, kind: CapabilityKind) -> Option<&mut Capability> {
        self.caps.iter_mut().find(|c| c.kind() == kind)
    }

    pub fn has(&self, kind: CapabilityKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.caps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.caps.iter()
    }

    /// Borrow capability `i` mutably together with a [`Siblings`] view of
    /// all the others.
    pub(crate) fn split_one(&mut self, i: usize) -> (&mut Capability, Siblings<'_>) {
        let (before, rest) = self.caps.split_at_mut(i);
        let (cap, after) = rest.split_first_mut().expect("index within capability set");
        (cap, Siblings { before, after })
    }
}
