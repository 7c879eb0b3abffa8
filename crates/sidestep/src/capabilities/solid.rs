//! Axis-separated tile collision resolution.

use super::{CapabilityKind, Siblings};
use crate::api::game::StepContext;
use crate::api::types::Side;
use crate::collision::tile_grid::{TileGrid, TileKind, TileMatch};
use crate::core::entity::Body;

/// Corner inset for the downward probes, so a tile exactly one column
/// over never false-triggers a landing.
const FALL_INSET: f32 = 1.0;
/// Wider inset for the upward probes: head bumps should pick the block
/// the entity is mostly under, not a corner-grazed neighbor.
const RISE_INSET: f32 = 2.0;

/// Whether `kind` blocks a body falling onto it. Hidden blocks are open
/// space from above; they only exist when struck from below.
fn solid_from_above(kind: TileKind) -> bool {
    !matches!(kind, TileKind::Air | TileKind::Hidden)
}

/// Whether `kind` blocks a body rising into it. Hidden blocks ARE solid
/// here, which is exactly how they get discovered.
fn solid_from_below(kind: TileKind) -> bool {
    kind != TileKind::Air
}

/// Whether `kind` blocks sideways motion.
fn solid_sideways(kind: TileKind) -> bool {
    !matches!(kind, TileKind::Air | TileKind::Hidden)
}

/// Tile collision resolver. Runs after integration has already advanced
/// the position, detects interpenetration with the grid, and snaps the
/// body back out, axis by axis: vertical first, then horizontal against
/// the corrected position.
///
/// The asymmetries are load-bearing, not bugs:
/// - hidden tiles block rising bodies only (see the solidity predicates),
/// - the horizontal pass samples only the leading edge, so a body never
///   catches on a tile it is moving away from,
/// - `on_ground` is re-derived every tick from an actual downward hit,
///   never latched.
#[derive(Debug, Clone)]
pub struct Solid {
    /// When false the resolver is inert (ghost mode for death animations).
    pub enabled: bool,
    on_ground: bool,
}

impl Default for Solid {
    fn default() -> Self {
        Self {
            enabled: true,
            on_ground: false,
        }
    }
}

impl Solid {
    pub fn new() -> Self {
        Self::default()
    }

    /// True iff the last tick ended with a downward tile hit.
    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub(crate) fn update(
        &mut self,
        body: &mut Body,
        siblings: &mut Siblings<'_>,
        grid: &TileGrid,
        ctx: &mut StepContext,
    ) {
        self.on_ground = false;
        if !self.enabled {
            return;
        }
        self.check_y(body, siblings, grid, ctx);
        self.check_x(body, siblings, grid);
    }

    fn check_y(
        &mut self,
        body: &mut Body,
        siblings: &mut Siblings<'_>,
        grid: &TileGrid,
        ctx: &mut StepContext,
    ) {
        let bounds = body.bounds();

        if body.vel.y > 0.0 {
            let hit = probe_pair(
                grid,
                bounds.left() + FALL_INSET,
                bounds.right() - FALL_INSET,
                bounds.bottom(),
            )
            .into_iter()
            .find(|t| solid_from_above(t.kind));
            if let Some(tile) = hit {
                let tile_top = grid.to_pixel(tile.cy);
                body.set_bottom(tile_top);
                body.vel.y = 0.0;
                self.on_ground = true;
                siblings.broadcast_tile_collide(body, Side::Bottom);
            }
        } else if body.vel.y < 0.0 {
            let hit = probe_pair(
                grid,
                bounds.left() + RISE_INSET,
                bounds.right() - RISE_INSET,
                bounds.top(),
            )
            .into_iter()
            .find(|t| solid_from_below(t.kind));
            if let Some(tile) = hit {
                let tile_bottom = grid.to_pixel(tile.cy + 1);
                body.set_top(tile_bottom);
                body.vel.y = 0.0;
                siblings.broadcast_tile_collide(body, Side::Top);

                // A head-bumping stomper triggers the struck block's
                // content. One bump, one block: when the box straddles
                // two cells the left probe's tile wins.
                if siblings.has(CapabilityKind::Stomper) {
                    let powered = siblings.power_up().map(|p| p.is_big()).unwrap_or(false);
                    ctx.request_block_hit(tile.cx, tile.cy, powered);
                }
            }
        }
    }

    fn check_x(&mut self, body: &mut Body, siblings: &mut Siblings<'_>, grid: &TileGrid) {
        if body.vel.x == 0.0 {
            return;
        }
        // Bounds were moved by the vertical pass; recompute.
        let bounds = body.bounds();
        let mid_y = (bounds.top() + bounds.bottom()) * 0.5;

        if body.vel.x > 0.0 {
            let hit = grid
                .get_by_pixel(bounds.right(), mid_y)
                .filter(|t| solid_sideways(t.kind));
            if let Some(tile) = hit {
                body.set_right(grid.to_pixel(tile.cx));
                body.vel.x = 0.0;
                siblings.broadcast_tile_collide(body, Side::Right);
            }
        } else {
            let hit = grid
                .get_by_pixel(bounds.left(), mid_y)
                .filter(|t| solid_sideways(t.kind));
            if let Some(tile) = hit {
                body.set_left(grid.to_pixel(tile.cx + 1));
                body.vel.x = 0.0;
                siblings.broadcast_tile_collide(body, Side::Left);
            }
        }
    }
}

/// Sample two pixel positions on one row, deduplicating when both land
/// in the same cell. Out-of-bounds probes vanish (open space).
fn probe_pair(grid: &TileGrid, x1: f32, x2: f32, y: f32) -> Vec<TileMatch> {
    let mut out = Vec::with_capacity(2);
    if let Some(a) = grid.get_by_pixel(x1, y) {
        out.push(a);
    }
    if let Some(b) = grid.get_by_pixel(x2, y) {
        if out.first().map(|a| (a.cx, a.cy)) != Some((b.cx, b.cy)) {
            out.push(b);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::capabilities::{Physics, Stomper};
    use crate::collision::tile_grid::TILE_SIZE;
    use crate::core::entity::Entity;

    const DT: f32 = 1.0 / 60.0;

    /// 20x10 grid, solid floor on row 8 (top edge at y = 128).
    fn floor_grid() -> TileGrid {
        let mut grid = TileGrid::new(20, 10, TILE_SIZE);
        grid.fill_rect(0, 8, 20, 1, TileKind::Ground);
        grid
    }

    fn body_with(pos: (f32, f32), vel: (f32, f32)) -> Entity {
        let mut entity = Entity::new(EntityId(1))
            .with_pos(pos.0, pos.1)
            .with_capability(Physics::new())
            .with_capability(Solid::new());
        entity.body.vel = glam::Vec2::new(vel.0, vel.1);
        entity
    }

    fn solid_of(entity: &Entity) -> &Solid {
        entity
            .capability(CapabilityKind::Solid)
            .unwrap()
            .as_solid()
            .unwrap()
    }

    #[test]
    fn falling_body_lands_exactly_on_the_tile_top() {
        let grid = floor_grid();
        // Resting height is y = 112 (floor top 128 minus size 16). Start
        // just above and let gravity close the gap over a few ticks.
        let mut entity = body_with((32.0, 110.0), (0.0, 0.0));
        let mut ctx = StepContext::new();
        for _ in 0..30 {
            entity.update(DT, &grid, &mut ctx);
        }
        assert_eq!(entity.body.pos.y, 112.0);
        assert_eq!(entity.body.vel.y, 0.0);
        assert!(solid_of(&entity).on_ground());
    }

    #[test]
    fn ground_flag_is_rederived_not_latched() {
        let grid = floor_grid();
        let mut entity = body_with((32.0, 112.0), (0.0, 0.0));
        let mut ctx = StepContext::new();
        entity.update(DT, &grid, &mut ctx);
        assert!(solid_of(&entity).on_ground());

        // Floor vanishes under the entity.
        let open = TileGrid::new(20, 10, TILE_SIZE);
        entity.update(DT, &open, &mut ctx);
        assert!(!solid_of(&entity).on_ground());
    }

    #[test]
    fn rising_body_snaps_below_the_ceiling() {
        let mut grid = TileGrid::new(20, 10, TILE_SIZE);
        grid.set(2, 2, TileKind::Brick); // bottom edge at y = 48
        let mut entity = body_with((32.0, 50.0), (0.0, -200.0));
        let mut ctx = StepContext::new();
        entity.update(DT, &grid, &mut ctx);
        assert_eq!(entity.body.pos.y, 48.0);
        assert_eq!(entity.body.vel.y, 0.0);
    }

    #[test]
    fn hidden_tile_is_open_when_falling_solid_when_rising() {
        let mut grid = TileGrid::new(20, 10, TILE_SIZE);
        grid.set(2, 4, TileKind::Hidden);

        // Falling through: start just above the hidden tile's top (y = 64).
        let mut faller = body_with((32.0, 40.0), (0.0, 200.0));
        let mut ctx = StepContext::new();
        for _ in 0..20 {
            faller.update(DT, &grid, &mut ctx);
        }
        assert!(faller.body.pos.y > 64.0, "fell through the hidden tile");

        // Rising into it from below (tile bottom edge at y = 80).
        let mut riser = body_with((32.0, 82.0), (0.0, -200.0));
        riser.update(DT, &grid, &mut ctx);
        assert_eq!(riser.body.pos.y, 80.0);
        assert_eq!(riser.body.vel.y, 0.0);
    }

    #[test]
    fn stomper_head_bump_requests_block_content() {
        let mut grid = TileGrid::new(20, 10, TILE_SIZE);
        grid.set(2, 2, TileKind::Question);
        let mut entity = Entity::new(EntityId(1))
            .with_pos(32.0, 50.0)
            .with_capability(Physics::new())
            .with_capability(Solid::new())
            .with_capability(Stomper::new());
        entity.body.vel.y = -200.0;
        let mut ctx = StepContext::new();
        entity.update(DT, &grid, &mut ctx);

        let hits = ctx.take_block_hits();
        assert_eq!(hits.len(), 1);
        assert_eq!((hits[0].cx, hits[0].cy), (2, 2));
        assert!(!hits[0].powered);
    }

    #[test]
    fn head_bump_straddling_two_blocks_hits_only_one() {
        let mut grid = TileGrid::new(20, 10, TILE_SIZE);
        grid.set(2, 2, TileKind::Question);
        grid.set(3, 2, TileKind::Question);
        // Box spans x 40..56, half under each block.
        let mut entity = Entity::new(EntityId(1))
            .with_pos(40.0, 50.0)
            .with_capability(Physics::new())
            .with_capability(Solid::new())
            .with_capability(Stomper::new());
        entity.body.vel.y = -200.0;
        let mut ctx = StepContext::new();
        entity.update(DT, &grid, &mut ctx);

        let hits = ctx.take_block_hits();
        assert_eq!(hits.len(), 1, "one bump must strike exactly one block");
        assert_eq!((hits[0].cx, hits[0].cy), (2, 2));
    }

    #[test]
    fn non_stomper_head_bump_requests_nothing() {
        let mut grid = TileGrid::new(20, 10, TILE_SIZE);
        grid.set(2, 2, TileKind::Question);
        let mut entity = body_with((32.0, 50.0), (0.0, -200.0));
        let mut ctx = StepContext::new();
        entity.update(DT, &grid, &mut ctx);
        assert_eq!(entity.body.pos.y, 48.0); // still blocked
        assert!(ctx.take_block_hits().is_empty());
    }

    #[test]
    fn rightward_motion_snaps_flush_against_a_wall() {
        let mut grid = TileGrid::new(20, 10, TILE_SIZE);
        grid.fill_rect(4, 0, 1, 10, TileKind::Ground); // wall, left face at x = 64
        let mut entity = body_with((46.0, 64.0), (300.0, 0.0));
        let mut ctx = StepContext::new();
        entity.update(DT, &grid, &mut ctx);
        assert_eq!(entity.body.pos.x, 48.0); // 64 - width 16
        assert_eq!(entity.body.vel.x, 0.0);
    }

    #[test]
    fn leftward_motion_snaps_flush_against_a_wall() {
        let mut grid = TileGrid::new(20, 10, TILE_SIZE);
        grid.fill_rect(2, 0, 1, 10, TileKind::Ground); // wall, right face at x = 48
        let mut entity = body_with((50.0, 64.0), (-300.0, 0.0));
        let mut ctx = StepContext::new();
        entity.update(DT, &grid, &mut ctx);
        assert_eq!(entity.body.pos.x, 48.0);
        assert_eq!(entity.body.vel.x, 0.0);
    }

    #[test]
    fn no_horizontal_check_when_still() {
        // Body overlapping a wall but not moving horizontally must not
        // be ejected sideways: only the leading edge is ever sampled.
        let mut grid = TileGrid::new(20, 10, TILE_SIZE);
        grid.fill_rect(4, 0, 1, 10, TileKind::Ground);
        let mut entity = body_with((60.0, 64.0), (0.0, 0.0));
        let before_x = entity.body.pos.x;
        let mut ctx = StepContext::new();
        entity.update(DT, &grid, &mut ctx);
        assert_eq!(entity.body.pos.x, before_x);
    }

    #[test]
    fn flush_and_still_is_untouched() {
        // Resting exactly flush with zero velocity: neither axis is
        // checked, so nothing moves and nothing is reported.
        let grid = floor_grid();
        let mut entity = Entity::new(EntityId(1))
            .with_pos(32.0, 112.0)
            .with_capability(Solid::new());
        let mut ctx = StepContext::new();
        entity.update(DT, &grid, &mut ctx);
        assert_eq!(entity.body.pos, glam::Vec2::new(32.0, 112.0));
        assert!(!solid_of(&entity).on_ground());
    }

    #[test]
    fn landing_respects_the_collision_box_offset() {
        let grid = floor_grid();
        let mut entity = Entity::new(EntityId(1))
            .with_pos(32.0, 96.0)
            .with_size(12.0, 16.0)
            .with_offset(2.0, 0.0)
            .with_capability(Physics::new())
            .with_capability(Solid::new());
        let mut ctx = StepContext::new();
        for _ in 0..60 {
            entity.update(DT, &grid, &mut ctx);
        }
        // Floor top 128, box height 16, offset.y 0: pos.y = 112.
        assert_eq!(entity.body.pos.y, 112.0);
        assert_eq!(entity.bounds().bottom(), 128.0);
    }

    #[test]
    fn disabled_resolver_is_inert() {
        let grid = floor_grid();
        let mut entity = body_with((32.0, 112.0), (0.0, 0.0));
        entity
            .capability_mut(CapabilityKind::Solid)
            .unwrap()
            .as_solid_mut()
            .unwrap()
            .enabled = false;
        let mut ctx = StepContext::new();
        for _ in 0..30 {
            entity.update(DT, &grid, &mut ctx);
        }
        assert!(entity.body.pos.y > 128.0, "fell straight through the floor");
        assert!(!solid_of(&entity).on_ground());
    }

    #[test]
    fn falling_off_the_grid_edge_is_open_space() {
        let grid = floor_grid();
        let mut entity = body_with((-40.0, 112.0), (0.0, 0.0)); // left of the grid
        let mut ctx = StepContext::new();
        for _ in 0..30 {
            entity.update(DT, &grid, &mut ctx);
        }
        assert!(entity.body.pos.y > 128.0);
    }
}
