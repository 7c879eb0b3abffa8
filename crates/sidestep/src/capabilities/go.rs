//! Horizontal locomotion: acceleration, release deceleration, and skid.

use super::{Direction, Siblings};
use crate::api::types::Side;
use crate::core::entity::Body;

const WALK_ACCEL: f32 = 600.0;
const RUN_ACCEL: f32 = 900.0;
/// Deceleration when no direction is held.
const RELEASE_DECEL: f32 = 800.0;
/// Deceleration when input opposes current velocity. Much larger than
/// the release rate so direction reversals feel punchy.
const SKID_DECEL: f32 = 1800.0;
const MAX_WALK_SPEED: f32 = 90.0;
const MAX_RUN_SPEED: f32 = 180.0;
/// Reduced control while airborne.
const AIR_ACCEL_MULT: f32 = 0.65;

/// Sign with a true zero, unlike `f32::signum`.
fn sign(v: f32) -> i32 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Input-driven horizontal movement.
///
/// The input layer writes `direction` and `running`; everything else is
/// derived per tick. Ground state comes from the sibling [`Solid`]
/// capability when present, and a sibling [`Boost`] meter scales both
/// acceleration and top speed.
///
/// [`Solid`]: super::Solid
/// [`Boost`]: super::Boost
#[derive(Debug, Clone, Default)]
pub struct Go {
    /// Held direction: -1, 0, or 1.
    pub direction: i32,
    /// Run button held.
    pub running: bool,
    /// Facing, updated whenever a direction is held.
    pub heading: Direction,
    /// Total distance traveled, for animation pacing.
    pub distance: f32,
    skidding: bool,
}

impl Go {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while input opposes the current velocity.
    pub fn skidding(&self) -> bool {
        self.skidding
    }

    pub(crate) fn update(&mut self, body: &mut Body, siblings: &mut Siblings<'_>, dt: f32) {
        // Ground state from the solidity resolver; without one, assume
        // grounded only when vertically at rest.
        let on_ground = siblings
            .solid()
            .map(|s| s.on_ground())
            .unwrap_or(body.vel.y == 0.0);
        let air_mult = if on_ground { 1.0 } else { AIR_ACCEL_MULT };
        let boost = siblings.boost().map(|b| b.speed_multiplier()).unwrap_or(1.0);

        let base_max = if self.running { MAX_RUN_SPEED } else { MAX_WALK_SPEED };
        let max_speed = base_max * boost;
        let accel = if self.running { RUN_ACCEL } else { WALK_ACCEL } * air_mult * boost;

        self.skidding =
            self.direction != 0 && sign(body.vel.x) != 0 && sign(body.vel.x) != self.direction;

        if self.direction != 0 {
            let rate = if self.skidding { SKID_DECEL } else { accel };
            body.vel.x += rate * self.direction as f32 * dt;
            self.heading = if self.direction < 0 {
                Direction::Left
            } else {
                Direction::Right
            };
        } else if body.vel.x != 0.0 {
            // Snap to exactly zero once the remaining speed is below one
            // tick's deceleration, so the sign never oscillates.
            let decel = RELEASE_DECEL * dt;
            if body.vel.x.abs() < decel {
                body.vel.x = 0.0;
            } else {
                body.vel.x -= decel * sign(body.vel.x) as f32;
            }
        }

        if body.vel.x.abs() > max_speed {
            body.vel.x = max_speed * sign(body.vel.x) as f32;
        }

        self.distance += body.vel.x.abs() * dt;
    }

    pub(crate) fn on_tile_collide(&mut self, body: &mut Body, side: Side) {
        // Hard wall stop.
        if side == Side::Left || side == Side::Right {
            body.vel.x = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game::StepContext;
    use crate::api::types::EntityId;
    use crate::capabilities::CapabilityKind;
    use crate::collision::tile_grid::{TileGrid, TILE_SIZE};
    use crate::core::entity::Entity;

    const DT: f32 = 1.0 / 60.0;

    fn go_of(entity: &Entity) -> &Go {
        entity
            .capability(CapabilityKind::Go)
            .unwrap()
            .as_go()
            .unwrap()
    }

    fn step(entity: &mut Entity) {
        let grid = TileGrid::new(1, 1, TILE_SIZE);
        let mut ctx = StepContext::new();
        entity.update(DT, &grid, &mut ctx);
    }

    #[test]
    fn accelerates_toward_held_direction() {
        let mut entity = Entity::new(EntityId(1)).with_capability(Go::new());
        entity
            .capability_mut(CapabilityKind::Go)
            .unwrap()
            .as_go_mut()
            .unwrap()
            .direction = 1;
        step(&mut entity);
        assert!((entity.body.vel.x - WALK_ACCEL * DT).abs() < 1e-4);
        assert_eq!(go_of(&entity).heading, Direction::Right);
    }

    #[test]
    fn skid_decelerates_faster_than_release() {
        // Both hold the run button so the walk-speed clamp never touches
        // the comparison.
        let mut skidder = Entity::new(EntityId(1)).with_capability(Go::new());
        skidder.body.vel.x = MAX_RUN_SPEED;
        {
            let go = skidder
                .capability_mut(CapabilityKind::Go)
                .unwrap()
                .as_go_mut()
                .unwrap();
            go.direction = -1;
            go.running = true;
        }

        let mut coaster = Entity::new(EntityId(2)).with_capability(Go::new());
        coaster.body.vel.x = MAX_RUN_SPEED;
        coaster
            .capability_mut(CapabilityKind::Go)
            .unwrap()
            .as_go_mut()
            .unwrap()
            .running = true;

        step(&mut skidder);
        step(&mut coaster);

        assert!(go_of(&skidder).skidding());
        assert!(!go_of(&coaster).skidding());
        assert!(
            skidder.body.vel.x < coaster.body.vel.x,
            "skid ({}) must shed more speed than release ({})",
            skidder.body.vel.x,
            coaster.body.vel.x
        );
        assert!((skidder.body.vel.x - (MAX_RUN_SPEED - SKID_DECEL * DT)).abs() < 1e-3);
        assert!((coaster.body.vel.x - (MAX_RUN_SPEED - RELEASE_DECEL * DT)).abs() < 1e-3);
    }

    #[test]
    fn release_snaps_to_zero_at_low_speed() {
        let mut entity = Entity::new(EntityId(1)).with_capability(Go::new());
        entity.body.vel.x = RELEASE_DECEL * DT * 0.5;
        step(&mut entity);
        assert_eq!(entity.body.vel.x, 0.0);
        // And stays there — no sign oscillation.
        step(&mut entity);
        assert_eq!(entity.body.vel.x, 0.0);
    }

    #[test]
    fn clamps_to_walk_speed_when_not_running() {
        let mut entity = Entity::new(EntityId(1)).with_capability(Go::new());
        entity.body.vel.x = MAX_RUN_SPEED;
        entity
            .capability_mut(CapabilityKind::Go)
            .unwrap()
            .as_go_mut()
            .unwrap()
            .direction = 1;
        step(&mut entity);
        assert_eq!(entity.body.vel.x, MAX_WALK_SPEED);
    }

    #[test]
    fn airborne_acceleration_is_reduced() {
        let mut air = Entity::new(EntityId(1)).with_capability(Go::new());
        air.body.vel.y = 50.0; // falling, so the fallback says airborne
        air.capability_mut(CapabilityKind::Go)
            .unwrap()
            .as_go_mut()
            .unwrap()
            .direction = 1;
        step(&mut air);
        assert!((air.body.vel.x - WALK_ACCEL * AIR_ACCEL_MULT * DT).abs() < 1e-4);
    }

    #[test]
    fn wall_hit_zeroes_horizontal_velocity() {
        let mut go = Go::new();
        let mut entity = Entity::new(EntityId(1));
        entity.body.vel.x = 120.0;
        go.on_tile_collide(&mut entity.body, Side::Right);
        assert_eq!(entity.body.vel.x, 0.0);
        entity.body.vel.y = -50.0;
        go.on_tile_collide(&mut entity.body, Side::Top);
        assert_eq!(entity.body.vel.y, -50.0);
    }

    #[test]
    fn distance_tracks_absolute_travel() {
        let mut entity = Entity::new(EntityId(1)).with_capability(Go::new());
        entity.body.vel.x = -MAX_WALK_SPEED;
        step(&mut entity);
        assert!(go_of(&entity).distance > 0.0);
    }
}
