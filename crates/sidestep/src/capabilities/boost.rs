//! Decaying buff meter that scales locomotion.

/// Decay in points per second.
const DECAY_RATE: f32 = 2.0;
/// Faster decay near the top, so a full meter is a short-lived spike.
const HIGH_DECAY_RATE: f32 = 5.0;
const HIGH_DECAY_THRESHOLD: f32 = 90.0;

const SPEED_THRESHOLD: f32 = 30.0;
const MAX_SPEED_MULT: f32 = 1.3;
const JUMP_THRESHOLD: f32 = 60.0;
const MAX_JUMP_MULT: f32 = 1.2;

/// A 0–100 meter filled by pickups and drained by time.
///
/// Sibling capabilities read it through the multiplier accessors: speed
/// scaling kicks in above [`SPEED_THRESHOLD`], jump scaling above the
/// higher [`JUMP_THRESHOLD`], both ramping linearly to their maximum at
/// a full meter.
#[derive(Debug, Clone, Default)]
pub struct Boost {
    value: f32,
}

impl Boost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Add to the meter (negative amounts drain it). Clamped to 0–100.
    pub fn add(&mut self, amount: f32) {
        self.value = (self.value + amount).clamp(0.0, 100.0);
    }

    /// Horizontal speed and acceleration multiplier, 1.0–[`MAX_SPEED_MULT`].
    pub fn speed_multiplier(&self) -> f32 {
        ramp(self.value, SPEED_THRESHOLD, MAX_SPEED_MULT)
    }

    /// Jump impulse multiplier, 1.0–[`MAX_JUMP_MULT`].
    pub fn jump_multiplier(&self) -> f32 {
        ramp(self.value, JUMP_THRESHOLD, MAX_JUMP_MULT)
    }

    pub(crate) fn update(&mut self, dt: f32) {
        let rate = if self.value >= HIGH_DECAY_THRESHOLD {
            HIGH_DECAY_RATE
        } else {
            DECAY_RATE
        };
        self.value = (self.value - rate * dt).max(0.0);
    }
}

/// 1.0 below `threshold`, rising linearly to `max_mult` at a full meter.
fn ramp(value: f32, threshold: f32, max_mult: f32) -> f32 {
    if value <= threshold {
        return 1.0;
    }
    let t = (value - threshold) / (100.0 - threshold);
    1.0 + t * (max_mult - 1.0)
}
