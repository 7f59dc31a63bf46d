use bevy::prelude::*;

/// Two colliders started or stopped touching.
///
/// Emitted from rapier's collision events by the physics adapter. Headless
/// tests write these directly.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
  Begin(Entity, Entity),
  End(Entity, Entity),
}

impl ContactEvent {
  pub fn colliders(&self) -> (Entity, Entity) {
    match *self {
      Self::Begin(a, b) | Self::End(a, b) => (a, b),
    }
  }
}
