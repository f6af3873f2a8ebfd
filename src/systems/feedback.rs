//! Routes simulation events to the injected effect sink.

use bevy_ecs::prelude::*;

use crate::effects::{BurstKind, Collaborators, Cue};
use crate::events::GameEvent;
use crate::profile::Profile;
use crate::systems::components::{Player, Position};

/// Particle bursts fire regardless of mute; audio cues honor it.
pub fn feedback_system(
    mut events: EventReader<GameEvent>,
    mut collaborators: ResMut<Collaborators>,
    profile: Res<Profile>,
    player: Single<&Position, With<Player>>,
) {
    for event in events.read() {
        let (burst, cue) = match event {
            GameEvent::CoinCollected { pos } => (Some((*pos, BurstKind::Sparkle)), Some(Cue::Coin)),
            GameEvent::PowerUpCollected { pos } => (Some((*pos, BurstKind::Pickup)), Some(Cue::PowerUp)),
            GameEvent::ObstacleKicked { pos } => (Some((*pos, BurstKind::Damage)), Some(Cue::Kick)),
            GameEvent::HitAbsorbed { pos } => (Some((*pos, BurstKind::Damage)), None),
            GameEvent::PlayerHit { pos } => (Some((*pos, BurstKind::Damage)), None),
            GameEvent::PlayerDrowned => (Some((player.0, BurstKind::Splash)), None),
            GameEvent::Command(_) => continue,
        };

        if let Some((pos, kind)) = burst {
            collaborators.effects.burst(pos, kind);
        }
        if let (Some(cue), false) = (cue, profile.muted) {
            collaborators.effects.cue(cue);
        }
    }
}
