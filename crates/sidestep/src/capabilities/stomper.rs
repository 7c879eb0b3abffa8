//! Offense and defense on entity contact.

use super::{CapabilityKind, Siblings};
use crate::api::game::StepContext;
use crate::api::types::{GameEvent, SoundId};
use crate::core::entity::{Body, Entity};

/// Upward rebound after a successful stomp.
const BOUNCE_SPEED: f32 = -250.0;
const STOMP_SCORE: u32 = 100;
/// Feet tolerance: a contact counts as "from above" while the stomper's
/// bottom edge is still in the upper part of the victim, with a small
/// slack so near-misses at high fall speed still land.
const STOMP_DEPTH: f32 = 0.6;
const STOMP_SLACK: f32 = 4.0;

/// Contact resolution for player-like entities: kill killable entities
/// by landing on them, take damage from everything else.
///
/// Damage routes through the sibling [`PowerUp`] tier when present
/// (star kills on touch, the mercy window ignores the hit, otherwise
/// step down a tier); without one, or below Normal, the sibling
/// [`Killable`] dies.
///
/// [`PowerUp`]: super::PowerUp
/// [`Killable`]: super::Killable
#[derive(Debug, Clone, Default)]
pub struct Stomper {
    stomps: u32,
}

impl Stomper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total successful stomps, for scoring multipliers upstream.
    pub fn stomps(&self) -> u32 {
        self.stomps
    }

    pub(crate) fn on_entity_collide(
        &mut self,
        body: &mut Body,
        siblings: &mut Siblings<'_>,
        other: &mut Entity,
        ctx: &mut StepContext,
    ) {
        // The dead neither stomp nor get hurt.
        if siblings.killable().map(|k| k.is_dead()).unwrap_or(false) {
            return;
        }
        let other_dead = match other
            .capability(CapabilityKind::Killable)
            .and_then(|c| c.as_killable())
        {
            Some(k) => k.is_dead(),
            None => return, // unkillable contact is inert here
        };
        if other_dead {
            return;
        }

        let other_bounds = other.body.bounds();
        let other_vel_y = other.body.vel.y;

        if siblings.power_up().map(|p| p.has_star()).unwrap_or(false) {
            self.defeat(other, ctx);
            return;
        }

        let feet = body.bounds().bottom();
        let from_above = body.vel.y > other_vel_y
            && feet <= other_bounds.top() + other.body.size.y * STOMP_DEPTH + STOMP_SLACK;

        if from_above {
            self.defeat(other, ctx);
            body.vel.y = BOUNCE_SPEED;
        } else {
            self.take_hit(body, siblings);
        }
    }

    fn defeat(&mut self, other: &mut Entity, ctx: &mut StepContext) {
        if let Some(killable) = other
            .capability_mut(CapabilityKind::Killable)
            .and_then(|c| c.as_killable_mut())
        {
            killable.kill();
        }
        self.stomps += 1;
        ctx.emit_sound(SoundId::Stomp);
        ctx.emit_event(GameEvent::Stomped {
            score: STOMP_SCORE,
            x: other.body.pos.x,
            y: other.body.pos.y,
        });
    }

    fn take_hit(&mut self, body: &mut Body, siblings: &mut Siblings<'_>) {
        if let Some(power) = siblings.power_up_mut() {
            if power.is_invincible() {
                return;
            }
            if power.power_down(body) {
                return;
            }
        }
        if let Some(killable) = siblings.killable_mut() {
            killable.kill();
        }
    }
}
