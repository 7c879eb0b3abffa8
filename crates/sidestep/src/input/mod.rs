//! Semantic input commands and their routing onto entities.

use crate::api::types::EntityId;
use crate::capabilities::{CapabilityKind, Go, Jump};
use crate::core::entity::Entity;

/// Input commands the simulation understands.
/// Semantic, not physical — the host maps keyboards, gamepads, or touch
/// zones onto these however it likes.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// Held movement direction: -1 (left), 0 (released), 1 (right).
    Move { direction: i32 },
    /// Run button state.
    Run { active: bool },
    /// The jump button went down.
    JumpPressed,
    /// The jump button went up.
    JumpReleased,
}

/// A queue of input commands.
/// The host writes commands into the queue; the game reads them each
/// fixed step and routes them onto the controlled entity.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input command (called from the host's event loop).
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending commands. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending commands without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Route input commands onto a controllable entity's Go and Jump
/// capabilities.
///
/// Panics if the entity lacks Go or Jump: pointing the input router at
/// an uncontrollable entity is a composition bug in the game's setup,
/// not a runtime condition to degrade through.
pub fn apply(entity: &mut Entity, events: &[InputEvent]) {
    for event in events {
        match *event {
            InputEvent::Move { direction } => {
                go_mut(entity).direction = direction.signum();
            }
            InputEvent::Run { active } => {
                go_mut(entity).running = active;
            }
            InputEvent::JumpPressed => jump_mut(entity).press(),
            InputEvent::JumpReleased => jump_mut(entity).release(),
        }
    }
}

fn go_mut(entity: &mut Entity) -> &mut Go {
    let id = entity.id();
    entity
        .capability_mut(CapabilityKind::Go)
        .and_then(|c| c.as_go_mut())
        .unwrap_or_else(|| missing(id, "Go"))
}

fn jump_mut(entity: &mut Entity) -> &mut Jump {
    let id = entity.id();
    entity
        .capability_mut(CapabilityKind::Jump)
        .and_then(|c| c.as_jump_mut())
        .unwrap_or_else(|| missing(id, "Jump"))
}

fn missing(id: EntityId, capability: &str) -> ! {
    panic!(
        "input routed to entity {:?} which has no {} capability; \
         give the controlled entity Go and Jump when composing it",
        id, capability
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{Go, Jump};

    fn controllable() -> Entity {
        Entity::new(EntityId(1))
            .with_capability(Go::new())
            .with_capability(Jump::new())
    }

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Move { direction: 1 });
        q.push(InputEvent::JumpPressed);
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn commands_land_on_go_and_jump() {
        let mut entity = controllable();
        apply(
            &mut entity,
            &[
                InputEvent::Move { direction: -1 },
                InputEvent::Run { active: true },
                InputEvent::JumpPressed,
            ],
        );

        let go = entity
            .capability(CapabilityKind::Go)
            .unwrap()
            .as_go()
            .unwrap();
        assert_eq!(go.direction, -1);
        assert!(go.running);
    }

    #[test]
    fn move_direction_is_normalized() {
        let mut entity = controllable();
        apply(&mut entity, &[InputEvent::Move { direction: 5 }]);
        let go = entity
            .capability(CapabilityKind::Go)
            .unwrap()
            .as_go()
            .unwrap();
        assert_eq!(go.direction, 1);
    }

    #[test]
    #[should_panic(expected = "no Go capability")]
    fn routing_to_an_uncontrollable_entity_panics() {
        let mut entity = Entity::new(EntityId(9));
        apply(&mut entity, &[InputEvent::Move { direction: 1 }]);
    }
}
