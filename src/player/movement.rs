use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::components::{Avatar, AvatarState, MovementConfig, MovementRequest, SpiritContacts};
use super::fuel::FuelTank;
use crate::config::ConfigLoaded;

/// Velocity and gravity scale the avatar should have after this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
  pub velocity: Vec2,
  pub gravity_scale: f32,
}

/// Translates a movement request into the avatar's next motion.
///
/// Platformer mode relies on world gravity and adds `fall_acceleration` on
/// the way down. Spirit and climbing modes switch gravity off and blend the
/// velocity toward the requested direction. Jumping is only possible from
/// the ground in platformer mode.
pub fn apply_force(
  config: &MovementConfig,
  state: &AvatarState,
  request: &MovementRequest,
  velocity: Vec2,
  dt: f32,
) -> Motion {
  let horizontal = request.horizontal.clamp(-1.0, 1.0);
  let vertical = request.vertical.clamp(-1.0, 1.0);

  if state.spirit_mode || state.climbing {
    let speed = if state.spirit_mode {
      config.walk_speed * config.spirit_speed_multiplier
    } else {
      config.climb_speed
    };
    let target = Vec2::new(horizontal, vertical).clamp_length_max(1.0) * speed;
    let blend = (config.spirit_blend * dt).clamp(0.0, 1.0);
    return Motion {
      velocity: velocity.lerp(target, blend),
      gravity_scale: 0.0,
    };
  }

  let mut next = velocity;

  let rate = if horizontal != 0.0 {
    if state.grounded {
      config.acceleration
    } else {
      config.air_acceleration
    }
  } else if state.grounded {
    config.ground_damping
  } else {
    config.air_acceleration
  };
  let target_x = horizontal * config.walk_speed;
  next.x += (target_x - next.x) * (rate * dt).clamp(0.0, 1.0);

  if state.grounded && request.jump {
    next.y = config.jump_speed;
  } else if !state.grounded && next.y < 0.0 {
    next.y -= config.fall_acceleration * dt;
  }
  next.y = next.y.max(-config.terminal_velocity);

  Motion {
    velocity: next,
    gravity_scale: 1.0,
  }
}

pub fn apply_avatar_forces(
  mut avatars: Query<
    (
      &MovementConfig,
      &AvatarState,
      &MovementRequest,
      &mut Velocity,
      &mut GravityScale,
    ),
    With<Avatar>,
  >,
  time: Res<Time>,
) {
  for (config, state, request, mut velocity, mut gravity) in &mut avatars {
    let request = if state.alive {
      *request
    } else {
      MovementRequest::default()
    };
    let motion = apply_force(config, state, &request, velocity.linvel, time.delta_secs());
    velocity.linvel = motion.velocity;
    if gravity.0 != motion.gravity_scale {
      gravity.0 = motion.gravity_scale;
    }
  }
}

pub fn drain_fuel(
  mut avatars: Query<(&mut FuelTank, &Velocity), With<Avatar>>,
  config: Res<ConfigLoaded>,
  time: Res<Time>,
) {
  let player = &config.player;
  for (mut tank, velocity) in &mut avatars {
    tank.sub_fuel(
      player.min_drain,
      player.drain_coefficient,
      velocity.linvel.length(),
      time.delta_secs(),
    );
  }
}

/// Ends spirit mode once no spirit source has been overlapped for
/// `spirit_linger` seconds.
pub fn update_spirit_linger(
  mut avatars: Query<(&mut AvatarState, &SpiritContacts), With<Avatar>>,
  config: Res<ConfigLoaded>,
  time: Res<Time>,
) {
  for (mut state, contacts) in &mut avatars {
    if !state.spirit_mode {
      continue;
    }
    if !contacts.is_empty() {
      state.spirit_timer = config.player.spirit_linger;
      continue;
    }
    state.spirit_timer -= time.delta_secs();
    if state.spirit_timer <= 0.0 {
      state.spirit_timer = 0.0;
      state.spirit_mode = false;
      debug!("Spirit mode ended");
    }
  }
}
