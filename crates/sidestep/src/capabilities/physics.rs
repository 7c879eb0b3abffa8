//! Gravity and velocity integration.

use crate::core::entity::Body;

/// Weak gravity during a held-button ascent. The gap between this and
/// [`GRAVITY_FALLING`] is what makes jump height respond to how long
/// the button stays down.
const GRAVITY_HOLDING_JUMP: f32 = 900.0;
const GRAVITY_FALLING: f32 = 2400.0;
/// Terminal velocity, in px/s.
const MAX_FALL_SPEED: f32 = 450.0;

/// Applies gravity, clamps fall speed, and moves the body by its velocity.
///
/// Runs in the integration stage, after locomotion has written velocities
/// and before the solidity resolver corrects the new position. The sibling
/// [`Jump`] capability writes `holding_jump` each tick.
///
/// [`Jump`]: super::Jump
#[derive(Debug, Clone)]
pub struct Physics {
    /// Set by the jump capability while the button is down.
    pub holding_jump: bool,
    /// Scales gravity for floaty variants (1.0 = normal).
    pub gravity_multiplier: f32,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            holding_jump: false,
            gravity_multiplier: 1.0,
        }
    }
}

impl Physics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn update(&mut self, body: &mut Body, dt: f32) {
        let gravity = if self.holding_jump && body.vel.y < 0.0 {
            GRAVITY_HOLDING_JUMP
        } else {
            GRAVITY_FALLING
        };
        body.vel.y += gravity * self.gravity_multiplier * dt;

        if body.vel.y > MAX_FALL_SPEED {
            body.vel.y = MAX_FALL_SPEED;
        }

        body.pos += body.vel * dt;
    }
}
