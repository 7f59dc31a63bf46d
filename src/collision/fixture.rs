use bevy::prelude::*;

/// What a collider is for, relative to the entity that owns it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureRole {
  /// The owner's solid shape.
  #[default]
  Body,
  /// Thin sensor under the feet.
  GroundSensor,
  /// Sensor on top of the head; detects things landing on the owner.
  TopSensor,
}

/// Maps a collider entity back to its owning gameplay entity.
///
/// Colliders without this component are their own owner with
/// [`FixtureRole::Body`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
  pub owner: Entity,
  pub role: FixtureRole,
}

impl Fixture {
  pub fn new(owner: Entity, role: FixtureRole) -> Self {
    Self { owner, role }
  }

  pub fn ground_sensor(owner: Entity) -> Self {
    Self::new(owner, FixtureRole::GroundSensor)
  }

  pub fn top_sensor(owner: Entity) -> Self {
    Self::new(owner, FixtureRole::TopSensor)
  }
}

/// Resolves `(owner, role)` for a collider entity.
pub fn resolve_fixture(collider: Entity, fixture: Option<&Fixture>) -> (Entity, FixtureRole) {
  fixture.map_or((collider, FixtureRole::Body), |f| (f.owner, f.role))
}
