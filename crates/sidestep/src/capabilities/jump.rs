//! Vertical impulse with coyote time and input buffering.

use super::Siblings;
use crate::api::game::StepContext;
use crate::api::types::{Side, SoundId};
use crate::core::entity::Body;

/// Upward impulse at walking speed (y grows downward).
const WALK_IMPULSE: f32 = -330.0;
/// Taller jump once the run is fast enough.
const RUN_IMPULSE: f32 = -380.0;
const HIGH_JUMP_SPEED_THRESHOLD: f32 = 140.0;
/// Grace window after walking off a ledge.
const COYOTE_TIME: f32 = 0.08;
/// Window for honoring a press made shortly before landing.
const JUMP_BUFFER_TIME: f32 = 0.1;

/// Jumping, with the two forgiveness windows platformers need:
/// a press up to [`JUMP_BUFFER_TIME`] early still fires on landing, and
/// a press up to [`COYOTE_TIME`] after leaving a ledge still fires.
///
/// While held, the sibling [`Physics`] capability is switched into its
/// low-gravity ascent regime, which is what makes jump height variable.
///
/// [`Physics`]: super::Physics
#[derive(Debug, Clone, Default)]
pub struct Jump {
    jumping: bool,
    was_on_ground: bool,
    coyote_timer: f32,
    buffer_timer: f32,
    holding: bool,
}

impl Jump {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while airborne.
    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// The jump button went down. Buffers the request so a slightly
    /// early press still lands.
    pub fn press(&mut self) {
        self.holding = true;
        self.buffer_timer = JUMP_BUFFER_TIME;
    }

    /// The jump button went up. Ends the low-gravity ascent regime.
    pub fn release(&mut self) {
        self.holding = false;
    }

    pub(crate) fn update(
        &mut self,
        body: &mut Body,
        siblings: &mut Siblings<'_>,
        dt: f32,
        ctx: &mut StepContext,
    ) {
        if let Some(physics) = siblings.physics_mut() {
            physics.holding_jump = self.holding;
        }

        // No solidity resolver means no ground assist at all.
        let on_ground = siblings.solid().map(|s| s.on_ground()).unwrap_or(false);

        // Walking off a ledge (not jumping off it) opens the coyote window.
        if self.was_on_ground && !on_ground && body.vel.y >= 0.0 {
            self.coyote_timer = COYOTE_TIME;
        }
        self.was_on_ground = on_ground;

        if self.coyote_timer > 0.0 {
            self.coyote_timer -= dt;
        }
        if self.buffer_timer > 0.0 {
            self.buffer_timer -= dt;
        }

        self.jumping = !on_ground;

        let can_jump = on_ground || self.coyote_timer > 0.0;
        if self.buffer_timer > 0.0 && can_jump {
            self.execute(body, siblings, ctx);
        }
    }

    fn execute(&mut self, body: &mut Body, siblings: &Siblings<'_>, ctx: &mut StepContext) {
        let base = if body.vel.x.abs() > HIGH_JUMP_SPEED_THRESHOLD {
            RUN_IMPULSE
        } else {
            WALK_IMPULSE
        };
        let boost = siblings.boost().map(|b| b.jump_multiplier()).unwrap_or(1.0);
        body.vel.y = base * boost;

        ctx.emit_sound(SoundId::Jump);

        self.was_on_ground = false;
        self.coyote_timer = 0.0;
        self.buffer_timer = 0.0;
        self.jumping = true;
    }

    pub(crate) fn on_tile_collide(&mut self, body: &mut Body, side: Side) {
        // Ceiling bump kills upward momentum.
        if side == Side::Top {
            body.vel.y = 0.0;
        }
    }
}
