//! Power state: body size, damage absorption, star invincibility.

use crate::core::entity::Body;

/// Collision box while small.
const SMALL_SIZE: (f32, f32) = (12.0, 16.0);
const SMALL_OFFSET: (f32, f32) = (2.0, 0.0);
/// Collision box while big.
const BIG_SIZE: (f32, f32) = (14.0, 28.0);
const BIG_OFFSET: (f32, f32) = (1.0, 0.0);
/// Vertical lift applied on growth so the feet stay planted.
const GROW_LIFT: f32 = 12.0;

/// Post-damage mercy window.
const INVINCIBLE_TIME: f32 = 2.0;
/// Blink period during the mercy window.
const BLINK_INTERVAL: f32 = 0.1;
/// Star pickup duration.
const STAR_TIME: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerState {
    #[default]
    Normal,
    Big,
    Fire,
}

/// Damage-tier state machine: Normal → Big → Fire, stepping down one
/// tier per hit. Stepping down from Normal is the caller's cue to kill
/// the entity instead ([`power_down`](Self::power_down) returns false).
///
/// Growing and shrinking rewrite the body's collision box; the mercy
/// window after a hit toggles `visible` for the renderer to blink.
#[derive(Debug, Clone)]
pub struct PowerUp {
    state: PowerState,
    invincible_timer: f32,
    star_timer: f32,
    /// Render hint, toggled while blinking.
    pub visible: bool,
}

impl Default for PowerUp {
    fn default() -> Self {
        Self {
            state: PowerState::Normal,
            invincible_timer: 0.0,
            star_timer: 0.0,
            visible: true,
        }
    }
}

impl PowerUp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PowerState {
        self.state
    }

    pub fn is_big(&self) -> bool {
        self.state != PowerState::Normal
    }

    /// Immune to damage (mercy window or star).
    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0 || self.star_timer > 0.0
    }

    /// Star mode: contact kills instead of hurting.
    pub fn has_star(&self) -> bool {
        self.star_timer > 0.0
    }

    /// Step up one tier, growing the collision box on Normal → Big.
    pub fn power_up(&mut self, body: &mut Body) {
        match self.state {
            PowerState::Normal => {
                self.state = PowerState::Big;
                apply_box(body, BIG_SIZE, BIG_OFFSET);
                body.pos.y -= GROW_LIFT;
            }
            PowerState::Big => self.state = PowerState::Fire,
            PowerState::Fire => {}
        }
    }

    /// Step down one tier and open the mercy window. Returns false when
    /// already at Normal, meaning the hit is fatal and the caller should
    /// kill the entity.
    pub fn power_down(&mut self, body: &mut Body) -> bool {
        match self.state {
            PowerState::Fire => self.state = PowerState::Big,
            PowerState::Big => {
                self.state = PowerState::Normal;
                apply_box(body, SMALL_SIZE, SMALL_OFFSET);
            }
            PowerState::Normal => return false,
        }
        self.invincible_timer = INVINCIBLE_TIME;
        true
    }

    pub fn activate_star(&mut self) {
        self.star_timer = STAR_TIME;
    }

    pub(crate) fn update(&mut self, dt: f32) {
        if self.star_timer > 0.0 {
            self.star_timer -= dt;
        }
        if self.invincible_timer > 0.0 {
            self.invincible_timer -= dt;
            // Blink at a fixed cadence for the rest of the window.
            let phase = (self.invincible_timer / BLINK_INTERVAL) as i32;
            self.visible = phase % 2 == 0;
            if self.invincible_timer <= 0.0 {
                self.visible = true;
            }
        } else {
            self.visible = true;
        }
    }
}

fn apply_box(body: &mut Body, size: (f32, f32), offset: (f32, f32)) {
    body.size = glam::Vec2::new(size.0, size.1);
    body.offset = glam::Vec2::new(offset.0, offset.1);
}
