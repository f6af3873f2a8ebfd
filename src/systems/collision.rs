//! Contact resolution between the player and live entities.
//!
//! Hitboxes are axis-aligned boxes with per-row fudge factors: overhead
//! barriers are forgiving horizontally and tight vertically, ground
//! entities the reverse.

use bevy_ecs::prelude::*;
use glam::Vec2;
use tracing::{debug, trace};

use crate::constants::{mechanics, player};
use crate::effects::Collaborators;
use crate::events::GameEvent;
use crate::profile::Profile;
use crate::session::GameSession;
use crate::systems::components::{
    Active, Dead, HitboxRow, Kicked, Kind, PickupKind, Player, Position, Size,
};
use crate::systems::player::PlayerState;

/// AABB test with the row's fudge factors. `hitbox_top` is the effective
/// top edge of the player (dropped while sliding), `jump` the current
/// height above the baseline.
pub fn check_collision(
    player_pos: Vec2,
    jump: f32,
    hitbox_top: f32,
    entity_pos: Vec2,
    entity_size: Vec2,
    row: HitboxRow,
) -> bool {
    let (px, py) = (player_pos.x, player_pos.y);
    let (ex, ey) = (entity_pos.x, entity_pos.y);
    let (ew, eh) = (entity_size.x, entity_size.y);
    let (pw, ph) = (player::WIDTH, player::HEIGHT);

    match row {
        HitboxRow::Overhead => {
            px + pw / 2.5 > ex
                && px < ex + ew / 1.2
                && py - jump + ph / 1.2 > ey
                && hitbox_top * 1.1 - jump < ey + eh
        }
        HitboxRow::Ground => {
            px + pw / 1.5 > ex && px < ex + ew / 1.5 && py - jump + ph > ey * 1.1 && py - jump < ey + eh
        }
    }
}

/// Resolves every overlap: coins count, pickups grant, barriers kick,
/// absorb, or kill.
#[allow(clippy::type_complexity)]
pub fn collision_system(
    mut commands: Commands,
    mut session: ResMut<GameSession>,
    profile: Res<Profile>,
    mut collaborators: ResMut<Collaborators>,
    player_query: Single<(&Position, &PlayerState), With<Player>>,
    entities: Query<(Entity, &Kind, &Position, &Size), (With<Active>, Without<Dead>, Without<Kicked>, Without<Player>)>,
    mut events: EventWriter<GameEvent>,
) {
    let (player_pos, state) = *player_query;
    let jump = state.jump_height;
    let top = state.hitbox_top(player_pos.0.y);

    for (entity, kind, position, size) in entities.iter() {
        if !check_collision(player_pos.0, jump, top, position.0, size.0, kind.row()) {
            continue;
        }
        let pos = size.center(position);

        match kind {
            Kind::Coin => {
                commands.entity(entity).insert(Dead);
                session.coins += 1;
                trace!(?entity, coins = session.coins, "Coin collected");
                events.write(GameEvent::CoinCollected { pos });
            }
            Kind::PowerUp(pickup) => {
                // An active shield knocks pickups away like any other
                // non-coin object; nothing is collected through it.
                if session.buffs.shielded() {
                    commands.entity(entity).insert(Kicked);
                    debug!(?entity, ?pickup, "Pickup kicked away");
                    events.write(GameEvent::ObstacleKicked { pos });
                    continue;
                }
                commands.entity(entity).insert(Dead);
                match pickup {
                    PickupKind::Shield => session.start_shield(profile.shield_level),
                    PickupKind::Booster => session.start_boost(profile.booster_level),
                    PickupKind::Exotic(kind) => collaborators.power_ups.activate(*kind),
                }
                debug!(?entity, ?pickup, "Pickup collected");
                events.write(GameEvent::PowerUpCollected { pos });
            }
            Kind::Obstacle(archetype) => {
                if session.buffs.shielded() {
                    commands.entity(entity).insert(Kicked);
                    debug!(?entity, %archetype, "Barrier kicked away");
                    events.write(GameEvent::ObstacleKicked { pos });
                } else if collaborators.power_ups.is_invincible() {
                    events.write(GameEvent::HitAbsorbed { pos });
                } else {
                    debug!(?entity, %archetype, "Player hit a barrier");
                    events.write(GameEvent::PlayerHit { pos });
                }
            }
        }
    }
}

/// Magnet pull, independent of contact: near coins drift toward the
/// player, very near coins are collected outright.
#[allow(clippy::type_complexity)]
pub fn magnet_system(
    mut commands: Commands,
    mut session: ResMut<GameSession>,
    collaborators: Res<Collaborators>,
    player_query: Single<&Position, With<Player>>,
    mut coins: Query<(Entity, &Kind, &mut Position, &Size), (With<Active>, Without<Dead>, Without<Kicked>, Without<Player>)>,
    mut events: EventWriter<GameEvent>,
) {
    if !collaborators.power_ups.is_magnet_active() {
        return;
    }

    let player_center = player_query.0 + Vec2::new(player::WIDTH, player::HEIGHT) * 0.5;

    for (entity, kind, mut position, size) in coins.iter_mut() {
        if !matches!(kind, Kind::Coin) {
            continue;
        }
        let center = size.center(&position);
        let to_player = player_center - center;
        let distance = to_player.length();

        if distance < mechanics::MAGNET_COLLECT_RADIUS {
            commands.entity(entity).insert(Dead);
            session.coins += 1;
            events.write(GameEvent::CoinCollected { pos: center });
        } else if distance < mechanics::MAGNET_RADIUS {
            position.0 += to_player * mechanics::MAGNET_PULL;
        }
    }
}
