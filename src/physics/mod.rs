//! Rapier adapter: plugin setup, world gravity from config, and translation
//! of rapier collision events into [`ContactEvent`]s.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::collision::{ContactEvent, ContactFilter, interpret_contacts};
use crate::config::ConfigLoaded;
use crate::sim::SimulationSet;

pub struct PhysicsPlugin {
  pub length_unit: f32,
}

impl Plugin for PhysicsPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(
        RapierPhysicsPlugin::<ContactFilter>::default()
          .with_length_unit(self.length_unit)
          .in_fixed_schedule(),
      )
      .add_systems(
        Update,
        apply_gravity.run_if(resource_changed::<ConfigLoaded>),
      )
      .add_systems(
        FixedUpdate,
        translate_collision_events
          .in_set(SimulationSet::Contacts)
          .before(interpret_contacts),
      );
  }
}

fn apply_gravity(config: Res<ConfigLoaded>, mut contexts: Query<&mut RapierConfiguration>) {
  for mut rapier in &mut contexts {
    rapier.gravity = Vec2::new(0.0, -config.physics.gravity);
  }
  debug!("World gravity set to {}", config.physics.gravity);
}

pub fn translate_collision_events(
  mut collisions: MessageReader<CollisionEvent>,
  mut contacts: MessageWriter<ContactEvent>,
) {
  for collision in collisions.read() {
    contacts.write(match *collision {
      CollisionEvent::Started(a, b, _) => ContactEvent::Begin(a, b),
      CollisionEvent::Stopped(a, b, _) => ContactEvent::End(a, b),
    });
  }
}
