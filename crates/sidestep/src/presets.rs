//! Ready-made entity compositions.
//!
//! Nothing here is special-cased by the kernel; these are ordinary
//! capability compositions that games can use directly or treat as a
//! reference for their own.

use crate::api::types::EntityId;
use crate::capabilities::{
    Boost, Go, Jump, Killable, PendulumWalk, Physics, PowerUp, Solid, Stomper,
};
use crate::core::entity::Entity;

/// A player-controlled entity: full locomotion, stomp offense, power
/// tiers, staged death. Starts with the small collision box; growing is
/// the PowerUp capability's job.
pub fn player(id: EntityId) -> Entity {
    Entity::new(id)
        .with_size(12.0, 16.0)
        .with_offset(2.0, 0.0)
        .with_tag("player")
        .with_capability(Boost::new())
        .with_capability(Go::new())
        .with_capability(Jump::new())
        .with_capability(Physics::new())
        .with_capability(Solid::new())
        .with_capability(Stomper::new())
        .with_capability(Killable::with_death_animation())
        .with_capability(PowerUp::new())
}

/// A patrolling enemy: walks until it hits something, dies to stomps.
pub fn patroller(id: EntityId) -> Entity {
    Entity::new(id)
        .with_tag("patroller")
        .with_capability(PendulumWalk::new())
        .with_capability(Physics::new())
        .with_capability(Solid::new())
        .with_capability(Killable::new())
}
