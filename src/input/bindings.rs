use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::actions::{Jump, Move, MoveVertical, PlayerInput, Restart};

pub fn player_input_actions() -> impl Bundle {
  actions!(PlayerInput[
      (
          Action::<Move>::new(),
          Bindings::spawn((
              Bidirectional::ad_keys(),
              Bidirectional::left_right_arrow(),
          )),
      ),
      (
          Action::<MoveVertical>::new(),
          Bindings::spawn((
              Bidirectional::ws_keys(),
              Bidirectional::up_down_arrow(),
          )),
      ),
      (
          Action::<Jump>::new(),
          bindings![KeyCode::Space],
      ),
      (
          Action::<Restart>::new(),
          bindings![KeyCode::KeyR],
      ),
  ])
}
