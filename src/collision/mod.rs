//! Contact interpretation: fixtures, the game-rule policy and its ECS glue.

mod events;
mod fixture;
mod hooks;
pub mod policy;
mod systems;

use bevy::prelude::*;
pub use events::ContactEvent;
pub use fixture::{Fixture, FixtureRole, resolve_fixture};
pub use hooks::ContactFilter;
pub use policy::ContactReaction;
pub use systems::{Participants, apply_contact_reactions, interpret_contacts};

use crate::sim::SimulationSet;

pub struct CollisionPlugin;

impl Plugin for CollisionPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_message::<ContactEvent>()
      .add_message::<ContactReaction>()
      .add_systems(
        FixedUpdate,
        (
          systems::begin_outcome_tick,
          interpret_contacts,
          apply_contact_reactions,
        )
          .chain()
          .in_set(SimulationSet::Contacts),
      );
  }
}
