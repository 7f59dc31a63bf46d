use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use super::agent::{AiRng, ArchetypeProfile, NpcAgent};
use super::fsm::Archetype;
use crate::config::ConfigLoaded;
use crate::fire::Flammable;
use crate::player::{Avatar, AvatarState};

pub fn init_ai_rng(mut commands: Commands, config: Res<ConfigLoaded>, rng: Option<Res<AiRng>>) {
  if rng.is_none() {
    commands.insert_resource(AiRng::seeded(config.ai.seed));
  }
}

fn profiles(config: &ConfigLoaded) -> [ArchetypeProfile; 2] {
  [
    ArchetypeProfile::from_config(&config.ai, Archetype::Guard),
    ArchetypeProfile::from_config(&config.ai, Archetype::Civilian),
  ]
}

fn profile_for(profiles: &[ArchetypeProfile; 2], archetype: Archetype) -> &ArchetypeProfile {
  match archetype {
    Archetype::Guard => &profiles[0],
    Archetype::Civilian => &profiles[1],
  }
}

/// Advances NPC timers and runs decisions for agents whose cooldown expired.
pub fn run_npc_ai(
  mut npcs: Query<(Entity, &mut NpcAgent, &Transform)>,
  avatars: Query<(Entity, &Transform, &AvatarState), With<Avatar>>,
  fires: Query<(&Flammable, &Transform)>,
  config: Res<ConfigLoaded>,
  mut rng: ResMut<AiRng>,
  time: Res<Time>,
) {
  let profiles = profiles(&config);
  let avatar = avatars
    .iter()
    .find(|(_, _, state)| state.alive)
    .map(|(entity, transform, _)| (entity, transform.translation.truncate()));

  for (entity, mut agent, transform) in &mut npcs {
    if !agent.alive {
      continue;
    }
    agent.tick(time.delta_secs());

    let position = transform.translation.truncate();
    let target = avatar.map(|(avatar, at)| (avatar, at - position));
    let fire_offset = fires
      .iter()
      .filter(|(flammable, _)| flammable.is_burning())
      .map(|(_, t)| t.translation.truncate() - position)
      .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));

    let profile = profile_for(&profiles, agent.archetype);
    if agent.can_decide() {
      let perception = profile.perceive(&agent, target, fire_offset);
      if let Some(previous) = agent.decide(profile, &perception, &mut rng.0) {
        debug!("NPC {entity}: {:?} -> {:?}", previous, agent.state);
      }
    }

    let target_offset = target
      .map(|(_, offset)| offset)
      .filter(|offset| offset.length() <= profile.chase_range);
    agent.steer(target_offset, fire_offset);
  }
}

/// Removes dead NPCs once their corpse timer runs out.
pub fn remove_corpses(
  mut commands: Commands,
  mut npcs: Query<(Entity, &mut NpcAgent)>,
  time: Res<Time>,
) {
  for (entity, mut agent) in &mut npcs {
    if agent.alive {
      continue;
    }
    agent.corpse_timer -= time.delta_secs();
    if agent.corpse_timer <= 0.0 {
      debug!("Removing NPC corpse {entity}");
      commands.entity(entity).despawn();
    }
  }
}

/// Turns each NPC's horizontal intent into velocity.
pub fn apply_npc_velocity(mut npcs: Query<(&NpcAgent, &mut Velocity)>, config: Res<ConfigLoaded>) {
  let profiles = profiles(&config);
  for (agent, mut velocity) in &mut npcs {
    let speed = if agent.alive {
      profile_for(&profiles, agent.archetype).speed
    } else {
      0.0
    };
    velocity.linvel.x = agent.direction * speed;
  }
}
