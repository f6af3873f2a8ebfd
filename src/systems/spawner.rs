//! Procedural spawning: barriers, pickups, companion coins, and rivers.
//!
//! Runs once per tick as an exclusive system because acquiring from the
//! pools configures entities directly in the world.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::constants::{player, river as river_constants, spawn};
use crate::pool::Pools;
use crate::session::GameSession;
use crate::systems::components::{
    HitboxRow, Kicked, Kind, KickDrift, Levitate, ObstacleArchetype, PickupKind, PooledBundle, Position,
    PowerUpKind, RainFall, Size,
};
use crate::systems::river::{RiverSpan, RiverState};

/// Seedable RNG behind every spawn decision.
#[derive(Resource)]
pub struct SpawnRng(pub SmallRng);

impl Default for SpawnRng {
    fn default() -> Self {
        SpawnRng(SmallRng::from_rng(&mut rand::rng()))
    }
}

/// Inclusive uniform integer, matching the classic
/// `round(min - 0.5 + random * (max - min + 1))` distribution.
pub fn roll(rng: &mut SmallRng, min: u32, max: u32) -> u32 {
    rng.random_range(min..=max)
}

/// Upper bound of the spawn-gate draw at the given speed.
pub fn gate_bound(speed: f32) -> u32 {
    (speed * 3.5) as u32
}

/// The spawn gate: a draw passes only when strictly greater than the
/// un-floored current speed.
pub fn spawn_gate(draw: u32, speed: f32) -> bool {
    draw as f32 > speed
}

/// Tracks the most recently spawned barrier for the spacing rule.
#[derive(Resource, Default)]
pub struct SpawnTracker {
    pub last_obstacle: Option<Entity>,
}

fn blank(kind: Kind, size: Vec2) -> PooledBundle {
    PooledBundle {
        kind,
        position: Position(Vec2::new(spawn::ENTRY_X, 0.0)),
        size: Size(size),
        kick_drift: KickDrift(0.0),
    }
}

fn coin_size() -> Vec2 {
    Vec2::splat(player::HEIGHT * spawn::COIN_SCALE)
}

pub fn create_obstacle(world: &mut World) -> Entity {
    world
        .spawn(blank(
            Kind::Obstacle(ObstacleArchetype::Hydrant),
            ObstacleArchetype::Hydrant.size(),
        ))
        .id()
}

pub fn create_coin(world: &mut World) -> Entity {
    world.spawn(blank(Kind::Coin, coin_size())).id()
}

pub fn create_power_up(world: &mut World) -> Entity {
    world
        .spawn(blank(
            Kind::PowerUp(PickupKind::Shield),
            Vec2::splat(player::HEIGHT * spawn::BUFF_PICKUP_SCALE),
        ))
        .id()
}

fn reset_to(world: &mut World, entity: Entity, kind: Kind, size: Vec2) {
    let mut entry = world.entity_mut(entity);
    entry.insert((kind, Position(Vec2::new(spawn::ENTRY_X, 0.0)), Size(size), KickDrift(0.0)));
    entry.remove::<(Kicked, RainFall, Levitate, crate::systems::components::Dead)>();
}

pub fn reset_obstacle(world: &mut World, entity: Entity) {
    reset_to(
        world,
        entity,
        Kind::Obstacle(ObstacleArchetype::Hydrant),
        ObstacleArchetype::Hydrant.size(),
    );
}

pub fn reset_coin(world: &mut World, entity: Entity) {
    reset_to(world, entity, Kind::Coin, coin_size());
}

pub fn reset_power_up(world: &mut World, entity: Entity) {
    reset_to(
        world,
        entity,
        Kind::PowerUp(PickupKind::Shield),
        Vec2::splat(player::HEIGHT * spawn::BUFF_PICKUP_SCALE),
    );
}

/// Whether the most recent barrier has scrolled far enough for another.
fn spacing_clear(world: &World, tracker: &SpawnTracker) -> bool {
    match tracker.last_obstacle {
        Some(entity) => match world.get::<Position>(entity) {
            Some(position) => position.0.x < spawn::ENTRY_X - spawn::MIN_SPACING,
            None => true,
        },
        None => true,
    }
}

/// Per-tick spawn pass: gate + spacing, archetype roll, pickup carrier,
/// companion coins, river roll.
pub fn spawn_system(world: &mut World) {
    let (speed, shielded, boosted) = {
        let session = world.resource::<GameSession>();
        (session.speed, session.buffs.shield.is_some(), session.buffs.boost.is_some())
    };

    world.resource_scope::<Pools, _>(|world, mut pools| {
        world.resource_scope::<SpawnRng, _>(|world, mut rng| {
            world.resource_scope::<SpawnTracker, _>(|world, mut tracker| {
                let rng = &mut rng.0;

                let draw = roll(rng, 0, gate_bound(speed));
                if spawn_gate(draw, speed) && spacing_clear(world, &tracker) {
                    let archetype = ObstacleArchetype::from_repr(roll(rng, 1, 8) as u8)
                        .unwrap_or(ObstacleArchetype::Hydrant);

                    if archetype == ObstacleArchetype::Buffbox {
                        // The carrier slot: a pickup if the rolls allow,
                        // otherwise a plain barrier. No companion coin.
                        if !spawn_carried_pickup(world, &mut pools, rng, shielded, boosted) {
                            spawn_barrier(world, &mut pools, rng, &mut tracker, ObstacleArchetype::Hydrant);
                        }
                    } else {
                        spawn_barrier(world, &mut pools, rng, &mut tracker, archetype);
                        // Most barriers bring a coin along.
                        if roll(rng, 1, 4) >= 2 {
                            spawn_companion_coin(world, &mut pools, rng, archetype.row());
                        }
                    }
                }

                spawn_river(world, rng);
            });
        });
    });
}

fn spawn_barrier(
    world: &mut World,
    pools: &mut Pools,
    rng: &mut SmallRng,
    tracker: &mut SpawnTracker,
    archetype: ObstacleArchetype,
) {
    let entity = pools.obstacles.acquire(world);
    let drift = roll(rng, 1, 5) as f32;
    let mut entry = world.entity_mut(entity);
    entry.insert((
        Kind::Obstacle(archetype),
        Position(Vec2::new(spawn::ENTRY_X, archetype.base_y())),
        Size(archetype.size()),
        KickDrift(drift),
    ));
    if archetype.levitates() {
        entry.insert(Levitate::default());
    }
    tracker.last_obstacle = Some(entity);
    trace!(?entity, %archetype, "Barrier spawned");
}

/// Rolls the carrier slot's pickup. Returns `false` when every roll
/// failed and the slot should fall back to a plain barrier.
fn spawn_carried_pickup(world: &mut World, pools: &mut Pools, rng: &mut SmallRng, shielded: bool, boosted: bool) -> bool {
    let pickup = if !shielded && roll(rng, 0, 100) > 70 {
        Some((PickupKind::Shield, spawn::BUFF_PICKUP_SCALE))
    } else if !boosted && roll(rng, 0, 100) > 70 {
        Some((PickupKind::Booster, spawn::BUFF_PICKUP_SCALE))
    } else if roll(rng, 0, 100) > 85 {
        let kind = PowerUpKind::from_repr(roll(rng, 1, 5) as u8).unwrap_or(PowerUpKind::Magnet);
        Some((PickupKind::Exotic(kind), spawn::POWER_UP_SCALE))
    } else {
        None
    };

    let Some((kind, scale)) = pickup else { return false };

    let y = if roll(rng, 0, 1) == 1 {
        spawn::PICKUP_HIGH_Y
    } else {
        spawn::PICKUP_LOW_Y
    };

    let entity = pools.power_ups.acquire(world);
    world.entity_mut(entity).insert((
        Kind::PowerUp(kind),
        Position(Vec2::new(spawn::ENTRY_X, y)),
        Size(Vec2::splat(player::HEIGHT * scale)),
    ));
    debug!(?entity, ?kind, "Pickup spawned");
    true
}

/// The near coin sits in the row the barrier leaves open: up top over a
/// ground barrier, on the ground under an overhead one.
fn spawn_companion_coin(world: &mut World, pools: &mut Pools, rng: &mut SmallRng, row: HitboxRow) {
    let near_y = match row {
        HitboxRow::Ground => spawn::COIN_TOP_Y,
        HitboxRow::Overhead => spawn::COIN_GROUND_Y,
    };
    let (x, y) = if roll(rng, 0, 1) == 1 {
        (spawn::COIN_NEAR_X, near_y)
    } else {
        (spawn::COIN_FAR_X, spawn::COIN_GROUND_Y)
    };

    let entity = pools.coins.acquire(world);
    world.entity_mut(entity).insert(Position(Vec2::new(x, y)));
    trace!(?entity, x, y, "Coin spawned");
}

fn spawn_river(world: &mut World, rng: &mut SmallRng) {
    let river_clear = matches!(*world.resource::<RiverState>(), RiverState::Inactive);
    if river_clear && roll(rng, 0, 100) > river_constants::SPAWN_THRESHOLD {
        *world.resource_mut::<RiverState>() = RiverState::Active {
            span: RiverSpan::entering(),
            ride: None,
        };
        debug!("River spawned");
    }
}
