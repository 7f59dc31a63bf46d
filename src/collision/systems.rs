use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier2d::prelude::{GravityScale, Velocity};

use super::policy::{self, ContactReaction, EndSide, Participant, PickupInfo, PolicyContext};
use super::{ContactEvent, Fixture, resolve_fixture};
use crate::ai::NpcAgent;
use crate::config::ConfigLoaded;
use crate::entity::EntityKind;
use crate::fire::{FireContacts, Flammable};
use crate::level::{CheckpointProgress, LevelOutcome};
use crate::player::{AvatarState, ClimbContacts, FuelPickup, FuelTank, GroundContacts, SpiritContacts};

/// Read-only view used to snapshot contact participants.
#[derive(SystemParam)]
pub struct Participants<'w, 's> {
  colliders: Query<'w, 's, Option<&'static Fixture>>,
  owners: Query<
    'w,
    's,
    (
      &'static EntityKind,
      Option<&'static Flammable>,
      Option<&'static FuelPickup>,
      Option<&'static Velocity>,
      Option<&'static NpcAgent>,
      Option<&'static AvatarState>,
    ),
  >,
}

impl Participants<'_, '_> {
  /// `None` when the collider or its owner is already gone.
  pub fn resolve(&self, collider: Entity) -> Option<Participant> {
    let fixture = self.colliders.get(collider).ok()?;
    let (owner, role) = resolve_fixture(collider, fixture);
    let (kind, flammable, pickup, velocity, npc, avatar) = self.owners.get(owner).ok()?;

    let alive = match (npc, avatar) {
      (Some(agent), _) => agent.alive,
      (None, Some(state)) => state.alive,
      (None, None) => true,
    };

    Some(Participant {
      burn: flammable.map(Flammable::state),
      pickup: pickup.map(|p| PickupInfo {
        bonus: p.bonus,
        checkpoint: p.checkpoint,
      }),
      velocity: velocity.map_or(Vec2::ZERO, |v| v.linvel),
      alive,
      ..Participant::new(collider, owner, *kind, role)
    })
  }
}

/// Clears last tick's checkpoint signal before new contacts are read.
pub fn begin_outcome_tick(mut outcome: ResMut<LevelOutcome>) {
  outcome.begin_tick();
}

pub fn interpret_contacts(
  mut contacts: MessageReader<ContactEvent>,
  mut reactions: MessageWriter<ContactReaction>,
  participants: Participants,
  outcome: Res<LevelOutcome>,
  progress: Res<CheckpointProgress>,
  config: Res<ConfigLoaded>,
) {
  if contacts.is_empty() {
    return;
  }

  let ctx = PolicyContext {
    level_finished: outcome.is_terminal(),
    last_checkpoint: progress.last_reached,
    crush_speed: config.physics.crush_speed,
  };

  for event in contacts.read() {
    let (a, b) = event.colliders();
    let out = match event {
      ContactEvent::Begin(..) => {
        // A stale side means the pair no longer exists for game purposes.
        let (Some(pa), Some(pb)) = (participants.resolve(a), participants.resolve(b)) else {
          trace!("Ignoring contact begin with despawned collider: {a} / {b}");
          continue;
        };
        policy::on_begin(&pa, &pb, &ctx)
      }
      ContactEvent::End(..) => {
        let pa = participants.resolve(a);
        let pb = participants.resolve(b);
        policy::on_end(
          EndSide::resolved(pa.as_ref(), a),
          EndSide::resolved(pb.as_ref(), b),
        )
      }
    };
    reactions.write_batch(out);
  }
}

#[derive(SystemParam)]
pub struct AvatarContacts<'w, 's> {
  query: Query<
    'w,
    's,
    (
      &'static mut AvatarState,
      &'static mut FuelTank,
      &'static mut GroundContacts,
      &'static mut ClimbContacts,
      &'static mut SpiritContacts,
      &'static mut GravityScale,
    ),
  >,
}

pub fn apply_contact_reactions(
  mut reactions: MessageReader<ContactReaction>,
  mut avatars: AvatarContacts,
  mut fire: ResMut<FireContacts>,
  mut outcome: ResMut<LevelOutcome>,
  mut flammables: Query<&mut Flammable>,
  mut npcs: Query<&mut NpcAgent>,
  config: Res<ConfigLoaded>,
) {
  for reaction in reactions.read() {
    match *reaction {
      ContactReaction::TrackFirePair(a, b) => {
        fire.insert(a, b);
      }
      ContactReaction::UntrackFirePair(a, b) => {
        fire.remove(a, b);
      }
      ContactReaction::Ignite { target } => {
        if let Ok(mut flammable) = flammables.get_mut(target) {
          if flammable.activate_burn_timer() {
            debug!("Avatar ignited {target}");
          }
        }
      }
      ContactReaction::CollectFuel { avatar, pickup, bonus } => {
        if let Ok((_, mut tank, ..)) = avatars.query.get_mut(avatar) {
          tank.add_fuel(bonus);
          info!("Collected {bonus} fuel from {pickup} (now {:.1})", tank.fuel());
        }
      }
      ContactReaction::CheckpointReached { index } => {
        info!("Checkpoint {index} reached");
        outcome.signal_checkpoint(index);
      }
      ContactReaction::SpiritTouch { avatar, collider } => {
        if let Ok((mut state, _, _, _, mut spirit, mut gravity)) = avatars.query.get_mut(avatar)
        {
          spirit.insert(collider);
          state.spirit_timer = config.player.spirit_linger;
          if !state.spirit_mode {
            debug!("Spirit mode entered through {collider}");
            state.spirit_mode = true;
          }
          gravity.0 = 0.0;
        }
      }
      ContactReaction::SpiritRelease { avatar, collider } => {
        if let Ok((.., mut spirit, _)) = avatars.query.get_mut(avatar) {
          spirit.remove(collider);
        }
      }
      ContactReaction::GroundTouch { avatar, collider } => {
        if let Ok((mut state, _, mut ground, ..)) = avatars.query.get_mut(avatar) {
          ground.insert(collider);
          state.grounded = true;
        }
      }
      ContactReaction::GroundRelease { avatar, collider } => {
        if let Ok((mut state, _, mut ground, ..)) = avatars.query.get_mut(avatar) {
          ground.remove(collider);
          state.grounded = !ground.is_empty();
        }
      }
      ContactReaction::ClimbTouch { avatar, collider } => {
        if let Ok((mut state, _, _, mut climb, ..)) = avatars.query.get_mut(avatar) {
          climb.insert(collider);
          state.climbing = true;
        }
      }
      ContactReaction::ClimbRelease { avatar, collider } => {
        if let Ok((mut state, _, _, mut climb, ..)) = avatars.query.get_mut(avatar) {
          climb.remove(collider);
          state.climbing = !climb.is_empty();
        }
      }
      ContactReaction::AvatarKilled { avatar, cause } => {
        if outcome.is_complete() {
          trace!("Ignoring {cause:?} after level completion");
          continue;
        }
        if let Ok((mut state, ..)) = avatars.query.get_mut(avatar) {
          state.alive = false;
        }
        if outcome.fail(cause) {
          info!("Level failed: {cause:?}");
        }
      }
      ContactReaction::NpcKilled { npc } => {
        if let Ok(mut agent) = npcs.get_mut(npc) {
          if agent.kill(config.ai.corpse_linger) {
            info!("NPC {npc} crushed");
          }
        }
      }
      ContactReaction::GoalReached => {
        if outcome.complete() {
          info!("Level complete");
        }
      }
    }
  }
}
