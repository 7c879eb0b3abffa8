//! Death state, corpse timing, and despawn.

use glam::Vec2;

use super::Siblings;
use crate::api::game::StepContext;
use crate::api::types::{GameEvent, SoundId};
use crate::collision::tile_grid::TileGrid;
use crate::core::entity::Body;

/// How long a plain corpse lingers before despawning.
const DEFAULT_REMOVE_AFTER: f32 = 0.5;
/// Freeze phase of the staged death animation.
const FREEZE_TIME: f32 = 0.4;
/// Upward hop that ends the freeze phase.
const DEATH_HOP: f32 = -350.0;
/// How far below the grid's bottom edge counts as "fell out of the world".
const FALL_MARGIN: f32 = 64.0;

/// Mortality. Anything that can die carries one of these.
///
/// Two death styles:
/// - plain (`death_animation` false): the corpse freezes in place and
///   despawns after `remove_after`. Stomped enemies.
/// - staged (`death_animation` true): tile solidity is switched off, the
///   body freezes briefly, hops, then gravity carries it off the bottom
///   of the world, where it despawns. Player deaths.
///
/// Falling below the grid extent kills a living entity on its own; that
/// is the world's primary "died" signal, not an error.
#[derive(Debug, Clone)]
pub struct Killable {
    dead: bool,
    dead_time: f32,
    announced: bool,
    hopped: bool,
    /// Corpse lifetime for the plain style.
    pub remove_after: f32,
    /// Use the staged freeze/hop/fall death instead of a plain corpse.
    pub death_animation: bool,
}

impl Default for Killable {
    fn default() -> Self {
        Self {
            dead: false,
            dead_time: 0.0,
            announced: false,
            hopped: false,
            remove_after: DEFAULT_REMOVE_AFTER,
            death_animation: false,
        }
    }
}

impl Killable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Staged-death variant for player-like entities.
    pub fn with_death_animation() -> Self {
        Self {
            death_animation: true,
            ..Self::default()
        }
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    /// Dead and still playing out the staged animation.
    pub fn is_dying(&self) -> bool {
        self.dead && self.death_animation
    }

    pub fn kill(&mut self) {
        if !self.dead {
            self.dead = true;
            self.dead_time = 0.0;
        }
    }

    /// Reset to alive. The caller is responsible for restoring anything
    /// the death disabled (tile solidity, gravity, position).
    pub fn revive(&mut self) {
        self.dead = false;
        self.dead_time = 0.0;
        self.announced = false;
        self.hopped = false;
    }

    pub(crate) fn update(
        &mut self,
        body: &mut Body,
        siblings: &mut Siblings<'_>,
        grid: &TileGrid,
        dt: f32,
        ctx: &mut StepContext,
    ) {
        let below_world = body.bounds().top() > grid.pixel_height() + FALL_MARGIN;

        if !self.dead {
            if below_world {
                self.kill();
            } else {
                return;
            }
        }

        if !self.announced {
            self.announced = true;
            ctx.emit_event(GameEvent::Died { id: body.id });
            ctx.emit_sound(SoundId::Death);
            if self.death_animation {
                if let Some(solid) = siblings.solid_mut() {
                    solid.enabled = false;
                }
                // Gravity is gated off so the freeze holds the body
                // exactly in place; the hop turns it back on.
                if let Some(physics) = siblings.physics_mut() {
                    physics.gravity_multiplier = 0.0;
                }
                body.vel = Vec2::ZERO;
            }
        }

        self.dead_time += dt;

        if self.death_animation {
            if self.dead_time < FREEZE_TIME {
                body.vel = Vec2::ZERO;
            } else if !self.hopped {
                self.hopped = true;
                if let Some(physics) = siblings.physics_mut() {
                    physics.gravity_multiplier = 1.0;
                }
                body.vel.y = DEATH_HOP;
            }
            if below_world {
                ctx.despawn(body.id);
            }
        } else {
            // Plain corpse: stop walking, let gravity keep it settled.
            body.vel.x = 0.0;
            if self.dead_time >= self.remove_after || below_world {
                ctx.despawn(body.id);
            }
        }
    }
}
