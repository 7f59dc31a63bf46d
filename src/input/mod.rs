//! Keyboard input. Only fills [`MovementRequest`] and sends [`ResetLevel`];
//! nothing downstream reads devices.

pub mod actions;
mod bindings;

pub use actions::{Jump, Move, MoveVertical, PlayerInput, Restart};
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;
pub use bindings::player_input_actions;

use crate::level::ResetLevel;
use crate::player::{Avatar, MovementRequest};
use crate::sim::SimulationSet;

pub struct InputPlugin;

impl Plugin for InputPlugin {
  fn build(&self, app: &mut App) {
    app
      .add_plugins(EnhancedInputPlugin)
      .add_input_context::<PlayerInput>()
      .add_systems(Update, (attach_player_input, request_reset))
      .add_systems(
        FixedUpdate,
        read_movement_input
          .in_set(SimulationSet::Forces)
          .before(crate::player::apply_avatar_forces),
      );
  }
}

fn attach_player_input(mut commands: Commands, avatars: Query<Entity, Added<Avatar>>) {
  for avatar in &avatars {
    commands
      .entity(avatar)
      .insert((PlayerInput, player_input_actions()));
  }
}

fn active(state: &ActionState) -> bool {
  matches!(state, ActionState::Fired | ActionState::Ongoing)
}

pub fn read_movement_input(
  mut avatars: Query<(&Actions<PlayerInput>, &mut MovementRequest), With<Avatar>>,
  moves: Query<(&Action<Move>, &ActionState)>,
  verticals: Query<(&Action<MoveVertical>, &ActionState)>,
  jumps: Query<&ActionState, With<Action<Jump>>>,
) {
  for (actions, mut request) in &mut avatars {
    let mut next = MovementRequest::default();
    for action_entity in actions.iter() {
      if let Ok((action, state)) = moves.get(action_entity) {
        if active(state) {
          next.horizontal = **action;
        }
      }
      if let Ok((action, state)) = verticals.get(action_entity) {
        if active(state) {
          next.vertical = **action;
        }
      }
      if let Ok(state) = jumps.get(action_entity) {
        next.jump |= active(state);
      }
    }
    if *request != next {
      trace!("Movement request: {:?}", next);
      *request = next;
    }
  }
}

/// Tracks whether this press already requested a reset.
#[derive(Default)]
struct RestartPress {
  sent: bool,
}

fn request_reset(
  avatars: Query<&Actions<PlayerInput>, With<Avatar>>,
  restarts: Query<&ActionState, With<Action<Restart>>>,
  mut resets: MessageWriter<ResetLevel>,
  mut press: Local<RestartPress>,
) {
  for actions in &avatars {
    for action_entity in actions.iter() {
      match restarts.get(action_entity) {
        Ok(ActionState::Fired) => {
          if !press.sent {
            press.sent = true;
            resets.write(ResetLevel);
          }
        }
        Ok(ActionState::None) => press.sent = false,
        _ => {}
      }
    }
  }
}
