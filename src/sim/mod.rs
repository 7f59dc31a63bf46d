//! Per-tick ordering of the gameplay simulation.
//!
//! Everything runs in [`FixedUpdate`]. The sets are chained around the rapier
//! step:
//!
//! ```text
//! Forces → [rapier SyncBackend → StepSimulation → Writeback]
//!        → Contacts → Spread → Burn → Ai → Outcome
//! ```
//!
//! Entity removal only happens through deferred commands issued in `Burn`,
//! `Ai` and `Outcome`, never while rapier is mid-step.

use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;
use bevy_rapier2d::prelude::PhysicsSet;

use crate::level::LevelOutcome;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
  /// Input translation and force/velocity application for avatar and NPCs.
  Forces,
  /// Contact events turned into game reactions.
  Contacts,
  /// Fire spread across persistent flammable contacts.
  Spread,
  /// Burn timers advance, burnt objects are removed.
  Burn,
  /// NPC state machines whose cooldown expired.
  Ai,
  /// Win/lose evaluation and checkpoint signalling.
  Outcome,
}

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
  fn build(&self, app: &mut App) {
    app.configure_sets(
      FixedUpdate,
      (
        SimulationSet::Forces.before(PhysicsSet::SyncBackend),
        SimulationSet::Contacts.after(PhysicsSet::Writeback),
      ),
    );
    app.configure_sets(
      FixedUpdate,
      (
        SimulationSet::Forces,
        SimulationSet::Contacts,
        SimulationSet::Spread,
        SimulationSet::Burn,
        SimulationSet::Ai,
        SimulationSet::Outcome,
      )
        .chain(),
    );
  }
}

/// Run condition: the level has neither been won nor lost.
pub fn level_in_progress(outcome: Res<LevelOutcome>) -> bool {
  !outcome.is_terminal()
}

/// All gameplay plugins, without rendering, input devices or the physics
/// backend. Headless tests add this group alone.
pub struct GameplayPlugins;

impl PluginGroup for GameplayPlugins {
  fn build(self) -> PluginGroupBuilder {
    PluginGroupBuilder::start::<Self>()
      .add(SimulationPlugin)
      .add(crate::level::LevelPlugin)
      .add(crate::collision::CollisionPlugin)
      .add(crate::fire::FirePlugin)
      .add(crate::player::PlayerPlugin)
      .add(crate::ai::AiPlugin)
  }
}
