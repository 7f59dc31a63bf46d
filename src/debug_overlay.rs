//! Read-only debug panel and gizmos. Nothing here feeds back into the
//! simulation.

use bevy::prelude::*;
use bevy_egui::{EguiContext, EguiPlugin, egui};
use bevy_rapier2d::prelude::*;

use crate::ai::NpcAgent;
use crate::level::{CheckpointProgress, CheckpointSet, LevelOutcome};
use crate::player::{Avatar, AvatarState, FuelTank};

/// Frames to wait before drawing so egui can finish initializing.
#[derive(Resource, Default)]
struct EguiReady(u32);

pub struct DebugOverlayPlugin;

impl Plugin for DebugOverlayPlugin {
  fn build(&self, app: &mut App) {
    if !app.is_plugin_added::<EguiPlugin>() {
      app.add_plugins(EguiPlugin::default());
    }
    app
      .add_plugins(RapierDebugRenderPlugin::default())
      .init_resource::<EguiReady>()
      .add_systems(Update, (draw_status_panel, draw_velocity_gizmos));
  }
}

fn draw_status_panel(
  mut egui_ctx: Query<&mut EguiContext>,
  avatars: Query<(&FuelTank, &AvatarState), With<Avatar>>,
  npcs: Query<&NpcAgent>,
  outcome: Res<LevelOutcome>,
  progress: Res<CheckpointProgress>,
  checkpoints: Res<CheckpointSet>,
  mut ready: ResMut<EguiReady>,
) {
  if ready.0 < 5 {
    ready.0 += 1;
    return;
  }
  let Ok(ctx) = egui_ctx.single_mut() else {
    return;
  };
  let ctx: &egui::Context = ctx.into_inner().get_mut();

  egui::Area::new(egui::Id::new("status_panel"))
    .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
    .interactable(false)
    .show(ctx, |ui| {
      for (tank, state) in &avatars {
        ui.add(egui::ProgressBar::new(tank.ratio()).text(format!("fuel {:.0}", tank.fuel())));
        ui.label(format!(
          "grounded {}  climbing {}  spirit {}  alive {}",
          state.grounded, state.climbing, state.spirit_mode, state.alive
        ));
      }

      let alive = npcs.iter().filter(|agent| agent.alive).count();
      ui.label(format!("npcs alive {alive}"));
      for agent in &npcs {
        ui.label(format!("  {:?}: {:?}", agent.archetype, agent.state));
      }

      let status = if outcome.is_complete() {
        "complete".to_string()
      } else if let Some(cause) = outcome.failure_cause() {
        format!("failed ({cause:?})")
      } else {
        "in progress".to_string()
      };
      ui.label(format!("level {status}"));
      ui.label(format!("checkpoint {:?}", progress.last_reached));
      if let Some((index, position)) = checkpoints.next_unreached(progress.last_reached) {
        ui.label(format!("next checkpoint {index} at ({:.0}, {:.0})", position.x, position.y));
      }
    });
}

/// Velocity (yellow) for the avatar.
fn draw_velocity_gizmos(mut gizmos: Gizmos, avatars: Query<(&Transform, &Velocity), With<Avatar>>) {
  const VELOCITY_SCALE: f32 = 0.25;

  for (transform, velocity) in &avatars {
    let at = transform.translation.truncate();
    if velocity.linvel.length_squared() > 0.01 {
      gizmos.line_2d(at, at + velocity.linvel * VELOCITY_SCALE, Color::srgb(1.0, 1.0, 0.0));
    }
  }
}
