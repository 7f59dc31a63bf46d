//! Level lifetime: spawning from config, reset, and win/lose bookkeeping.

mod checkpoint;
mod outcome;
mod spawn;
mod systems;

use bevy::prelude::*;
pub use checkpoint::{CheckpointProgress, CheckpointSet, persist_checkpoint};
pub use outcome::{FailureCause, LevelOutcome};
pub use spawn::{build_level, spawn_level_object};

use crate::sim::{SimulationSet, level_in_progress};

/// Request to restart the level from the last reached checkpoint.
#[derive(Message, Debug, Default, Clone, Copy)]
pub struct ResetLevel;

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
  fn build(&self, app: &mut App) {
    app
      .init_resource::<LevelOutcome>()
      .init_resource::<CheckpointProgress>()
      .init_resource::<CheckpointSet>()
      .add_message::<ResetLevel>()
      .add_systems(Startup, systems::spawn_level)
      .add_systems(Update, systems::reset_level)
      .add_systems(
        FixedUpdate,
        (
          systems::check_failure_conditions.run_if(level_in_progress),
          persist_checkpoint,
        )
          .chain()
          .in_set(SimulationSet::Outcome),
      );
  }
}
