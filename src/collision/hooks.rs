use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::{Fixture, policy, resolve_fixture};
use crate::entity::EntityKind;
use crate::player::AvatarState;

/// Pre-solve contact filter handed to rapier.
///
/// Only colliders carrying `ActiveHooks::FILTER_CONTACT_PAIRS` reach this.
/// The verdict only toggles impulse computation, so contact events keep
/// flowing for vetoed pairs.
#[derive(SystemParam)]
pub struct ContactFilter<'w, 's> {
  fixtures: Query<'w, 's, &'static Fixture>,
  kinds: Query<'w, 's, &'static EntityKind>,
  avatars: Query<'w, 's, &'static AvatarState>,
}

impl ContactFilter<'_, '_> {
  fn kind_of(&self, collider: Entity) -> Option<EntityKind> {
    owner_kind(collider, self.fixtures.get(collider).ok(), |owner| {
      self.kinds.get(owner).ok().copied()
    })
  }

  fn spirit_mode(&self) -> bool {
    self.avatars.iter().any(|state| state.spirit_mode)
  }
}

impl BevyPhysicsHooks for ContactFilter<'_, '_> {
  fn filter_contact_pair(&self, context: PairFilterContextView) -> Option<SolverFlags> {
    Some(contact_flags(
      self.kind_of(context.collider1()),
      self.kind_of(context.collider2()),
      self.spirit_mode(),
    ))
  }
}

/// Kind of the entity owning `collider`. Sensors resolve through their
/// [`Fixture`].
pub fn owner_kind(
  collider: Entity,
  fixture: Option<&Fixture>,
  kind_of: impl Fn(Entity) -> Option<EntityKind>,
) -> Option<EntityKind> {
  let (owner, _) = resolve_fixture(collider, fixture);
  kind_of(owner)
}

/// Solver verdict for a pair. Colliders without a gameplay kind collide
/// normally.
pub fn contact_flags(a: Option<EntityKind>, b: Option<EntityKind>, spirit_mode: bool) -> SolverFlags {
  match (a, b) {
    (Some(a), Some(b)) if !policy::solver_enabled(a, b, spirit_mode) => SolverFlags::empty(),
    _ => SolverFlags::COMPUTE_IMPULSES,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn e(n: u32) -> Entity {
    Entity::from_raw_u32(n).unwrap()
  }

  fn kinds(entity: Entity) -> Option<EntityKind> {
    match entity.index() {
      1 => Some(EntityKind::Avatar),
      2 => Some(EntityKind::Wood),
      _ => None,
    }
  }

  #[test]
  fn sensor_resolves_to_owner_kind() {
    let sensor = Fixture::ground_sensor(e(1));
    assert_eq!(owner_kind(e(10), Some(&sensor), kinds), Some(EntityKind::Avatar));
    assert_eq!(owner_kind(e(2), None, kinds), Some(EntityKind::Wood));
    assert_eq!(owner_kind(e(10), None, kinds), None);
  }

  #[test]
  fn unknown_collider_collides_normally() {
    assert_eq!(
      contact_flags(None, Some(EntityKind::Fuel), true),
      SolverFlags::COMPUTE_IMPULSES
    );
    assert_eq!(
      contact_flags(Some(EntityKind::Avatar), None, true),
      SolverFlags::COMPUTE_IMPULSES
    );
  }

  #[test]
  fn vetoed_pair_keeps_events_but_skips_impulses() {
    assert_eq!(
      contact_flags(Some(EntityKind::Avatar), Some(EntityKind::Fuel), false),
      SolverFlags::empty()
    );
    assert_eq!(
      contact_flags(Some(EntityKind::Avatar), Some(EntityKind::Wood), true),
      SolverFlags::empty()
    );
    assert_eq!(
      contact_flags(Some(EntityKind::Avatar), Some(EntityKind::Wood), false),
      SolverFlags::COMPUTE_IMPULSES
    );
  }
}
