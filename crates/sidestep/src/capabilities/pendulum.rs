//! Back-and-forth patrol locomotion.

use super::{CapabilityKind, Direction, Siblings};
use crate::api::types::Side;
use crate::core::entity::{Body, Entity};

const DEFAULT_SPEED: f32 = 30.0;

/// Walks at constant speed, reversing on walls and on other patrollers.
/// A dead sibling [`Killable`] halts the walk so corpses stay put.
///
/// [`Killable`]: super::Killable
#[derive(Debug, Clone)]
pub struct PendulumWalk {
    pub speed: f32,
    direction: Direction,
}

impl Default for PendulumWalk {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            direction: Direction::Left,
        }
    }
}

impl PendulumWalk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub(crate) fn update(&mut self, body: &mut Body, siblings: &mut Siblings<'_>) {
        if siblings.killable().map(|k| k.is_dead()).unwrap_or(false) {
            return;
        }
        body.vel.x = self.speed * self.direction.as_f32();
    }

    pub(crate) fn on_tile_collide(&mut self, side: Side) {
        match side {
            Side::Left => self.direction = Direction::Right,
            Side::Right => self.direction = Direction::Left,
            Side::Top | Side::Bottom => {}
        }
    }

    pub(crate) fn on_entity_collide(
        &mut self,
        body: &mut Body,
        siblings: &mut Siblings<'_>,
        other: &mut Entity,
    ) {
        if siblings.killable().map(|k| k.is_dead()).unwrap_or(false) {
            return;
        }
        // Patrollers bounce off each other; anything else walks through.
        if other.capability(CapabilityKind::PendulumWalk).is_some() {
            self.direction = if body.bounds().left() < other.body.bounds().left() {
                Direction::Left
            } else {
                Direction::Right
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::game::StepContext;
    use crate::api::types::EntityId;
    use crate::capabilities::{Killable, Physics, Solid};
    use crate::collision::tile_grid::{TileGrid, TileKind, TILE_SIZE};

    const DT: f32 = 1.0 / 60.0;

    fn walker(id: u32, x: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(x, 112.0)
            .with_capability(PendulumWalk::new())
            .with_capability(Physics::new())
            .with_capability(Solid::new())
            .with_capability(Killable::new())
    }

    /// Floor on row 8, walls at both ends.
    fn corridor() -> TileGrid {
        let mut grid = TileGrid::new(20, 10, TILE_SIZE);
        grid.fill_rect(0, 8, 20, 1, TileKind::Ground);
        grid.fill_rect(0, 0, 1, 8, TileKind::Ground);
        grid.fill_rect(19, 0, 1, 8, TileKind::Ground);
        grid
    }

    fn pendulum_of(entity: &Entity) -> &PendulumWalk {
        entity
            .capability(CapabilityKind::PendulumWalk)
            .unwrap()
            .as_pendulum()
            .unwrap()
    }

    #[test]
    fn walks_left_by_default() {
        let grid = corridor();
        let mut entity = walker(1, 160.0);
        let mut ctx = StepContext::new();
        entity.update(DT, &grid, &mut ctx);
        assert_eq!(entity.body.vel.x, -DEFAULT_SPEED);
    }

    #[test]
    fn reverses_on_a_wall() {
        let grid = corridor();
        let mut entity = walker(1, 20.0); // just right of the left wall
        let mut ctx = StepContext::new();
        for _ in 0..120 {
            entity.update(DT, &grid, &mut ctx);
        }
        assert_eq!(pendulum_of(&entity).direction(), Direction::Right);
        assert!(entity.body.vel.x > 0.0);
    }

    #[test]
    fn dead_walker_stays_put() {
        let grid = corridor();
        let mut entity = walker(1, 160.0);
        let mut ctx = StepContext::new();
        entity.update(DT, &grid, &mut ctx);

        entity
            .capability_mut(CapabilityKind::Killable)
            .unwrap()
            .as_killable_mut()
            .unwrap()
            .kill();
        entity.update(DT, &grid, &mut ctx);
        assert_eq!(entity.body.vel.x, 0.0);
    }

    #[test]
    fn patrollers_bounce_off_each_other() {
        let mut left = walker(1, 100.0);
        let mut right = walker(2, 110.0);
        let mut ctx = StepContext::new();

        right.notify_entity_collide(&mut left, &mut ctx);

        assert_eq!(
            right
                .capability(CapabilityKind::PendulumWalk)
                .unwrap()
                .as_pendulum()
                .unwrap()
                .direction(),
            Direction::Right
        );
    }
}
