//! Pairwise entity-entity overlap detection.

use crate::api::game::StepContext;
use crate::core::entity::Entity;

/// Broad-phase-free AABB collider: every unordered pair tested once per
/// tick, both sides notified on overlap. O(n²), which is the deliberate
/// contract — levels hold tens of entities, not thousands.
///
/// No pair ordering is guaranteed; capability reactions must not depend
/// on evaluation order within a tick (they guard on their own state,
/// e.g. "already dead" checks).
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityCollider;

impl EntityCollider {
    pub fn new() -> Self {
        Self
    }

    pub fn check(&self, entities: &mut [Entity], ctx: &mut StepContext) {
        for i in 0..entities.len() {
            let (head, tail) = entities.split_at_mut(i + 1);
            let a = &mut head[i];
            for b in tail.iter_mut() {
                if a.bounds().overlaps(&b.bounds()) {
                    a.notify_entity_collide(b, ctx);
                    b.notify_entity_collide(a, ctx);
                }
            }
        }
    }
}
