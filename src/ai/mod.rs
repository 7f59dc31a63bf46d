//! NPC behaviour: a table-driven state machine per agent, decided on a
//! randomized cooldown.

mod agent;
mod fsm;
mod spawn;
mod systems;

use bevy::prelude::*;
pub use agent::{AiRng, ArchetypeProfile, NpcAgent, wander_roll};
pub use fsm::{AiState, Archetype, Perception, next_state};
pub use spawn::spawn_npc;

use crate::sim::{SimulationSet, level_in_progress};

pub struct AiPlugin;

impl Plugin for AiPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_systems(Startup, systems::init_ai_rng)
      .add_systems(
        FixedUpdate,
        systems::apply_npc_velocity.in_set(SimulationSet::Forces),
      )
      .add_systems(
        FixedUpdate,
        (
          systems::run_npc_ai.run_if(level_in_progress),
          systems::remove_corpses,
        )
          .chain()
          .in_set(SimulationSet::Ai),
      );
  }
}
