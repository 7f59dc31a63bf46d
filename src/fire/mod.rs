//! Fire: burn state machines, persistent fire contacts and burnout removal.

pub mod flammable;
mod systems;

use std::collections::HashSet;

use bevy::prelude::*;
pub use flammable::{BurnState, Flammable};
pub use systems::{remove_burnt, spread_fire, tick_burning};

use crate::sim::SimulationSet;

/// Unordered pairs of flammables currently in contact.
///
/// Contact begin/end maintain the set; [`spread_fire`] re-checks every pair
/// each tick so an unlit object catches as soon as its burning neighbour's
/// spread timer elapses, not only at the moment they first touch.
#[derive(Resource, Debug, Default)]
pub struct FireContacts {
  pairs: HashSet<(Entity, Entity)>,
}

impl FireContacts {
  fn key(a: Entity, b: Entity) -> (Entity, Entity) {
    if a <= b { (a, b) } else { (b, a) }
  }

  pub fn insert(&mut self, a: Entity, b: Entity) -> bool {
    a != b && self.pairs.insert(Self::key(a, b))
  }

  pub fn remove(&mut self, a: Entity, b: Entity) -> bool {
    self.pairs.remove(&Self::key(a, b))
  }

  pub fn contains(&self, a: Entity, b: Entity) -> bool {
    self.pairs.contains(&Self::key(a, b))
  }

  /// Drops every pair involving `entity`.
  pub fn forget(&mut self, entity: Entity) {
    self.pairs.retain(|&(a, b)| a != entity && b != entity);
  }

  pub fn retain(&mut self, mut keep: impl FnMut(Entity, Entity) -> bool) {
    self.pairs.retain(|&(a, b)| keep(a, b));
  }

  pub fn iter(&self) -> impl Iterator<Item = (Entity, Entity)> + '_ {
    self.pairs.iter().copied()
  }

  pub fn len(&self) -> usize {
    self.pairs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pairs.is_empty()
  }

  pub fn clear(&mut self) {
    self.pairs.clear();
  }
}

pub struct FirePlugin;

impl Plugin for FirePlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<FireContacts>()
      .add_systems(FixedUpdate, spread_fire.in_set(SimulationSet::Spread))
      .add_systems(
        FixedUpdate,
        (tick_burning, remove_burnt)
          .chain()
          .in_set(SimulationSet::Burn),
      );
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fire_contacts_are_unordered() {
    let a = Entity::from_raw_u32(1).unwrap();
    let b = Entity::from_raw_u32(2).unwrap();
    let mut contacts = FireContacts::default();
    assert!(contacts.insert(b, a));
    assert!(!contacts.insert(a, b));
    assert!(contacts.contains(a, b));
    assert!(contacts.remove(a, b));
    assert!(contacts.is_empty());
  }

  #[test]
  fn self_contact_is_ignored() {
    let a = Entity::from_raw_u32(3).unwrap();
    let mut contacts = FireContacts::default();
    assert!(!contacts.insert(a, a));
    assert!(contacts.is_empty());
  }

  #[test]
  fn forget_drops_all_pairs_of_entity() {
    let a = Entity::from_raw_u32(1).unwrap();
    let b = Entity::from_raw_u32(2).unwrap();
    let c = Entity::from_raw_u32(3).unwrap();
    let mut contacts = FireContacts::default();
    contacts.insert(a, b);
    contacts.insert(a, c);
    contacts.insert(b, c);
    contacts.forget(a);
    assert_eq!(contacts.len(), 1);
    assert!(contacts.contains(b, c));
  }
}
