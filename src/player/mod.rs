mod components;
mod fuel;
mod movement;
mod spawn;

use bevy::prelude::*;
pub use components::{
  Avatar, AvatarState, ClimbContacts, ContactSet, GroundContacts, MovementConfig, MovementRequest,
  SpiritContacts,
};
pub use fuel::{FuelPickup, FuelTank};
pub use movement::{Motion, apply_avatar_forces, apply_force};
pub use spawn::{AvatarColliders, spawn_avatar};

use crate::sim::{SimulationSet, level_in_progress};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(
        FixedUpdate,
        apply_avatar_forces.in_set(SimulationSet::Forces),
      )
      // Fuel and spirit timers advance with the burn timers
      .add_systems(
        FixedUpdate,
        (
          movement::drain_fuel.run_if(level_in_progress),
          movement::update_spirit_linger,
        )
          .in_set(SimulationSet::Burn),
      );
  }
}
