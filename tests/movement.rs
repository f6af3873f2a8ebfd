use bevy_ecs::system::RunSystemOnce;
use bevy_ecs::world::World;
use glam::Vec2;
use speculoos::prelude::*;

use corgi_run::constants::{spawn, CANVAS_W};
use corgi_run::pool::Pools;
use corgi_run::session::GameSession;
use corgi_run::systems::components::{
    Dead, Kicked, Kind, ObstacleArchetype, Position, RainFall,
};
use corgi_run::systems::movement::{cull_system, entity_update_system};

mod common;

fn run_movement(world: &mut World) {
    world
        .run_system_once(entity_update_system)
        .expect("System should run");
}

fn position_of(world: &World, entity: bevy_ecs::entity::Entity) -> Vec2 {
    world.get::<Position>(entity).unwrap().0
}

#[test]
fn test_entities_scroll_left_by_the_session_speed() {
    let mut world = common::create_test_world();
    let speed = world.resource::<GameSession>().speed;
    let entity = common::spawn_test_entity(&mut world, Kind::Coin, Vec2::new(500.0, 480.0), Vec2::splat(30.0));

    run_movement(&mut world);

    let pos = position_of(&world, entity);
    assert_that(&pos.x).is_equal_to(500.0 - speed);
    assert_that(&pos.y).is_equal_to(480.0);
    assert_that(&world.get::<Dead>(entity).is_some()).is_false();
}

#[test]
fn test_ground_barriers_die_three_widths_off_screen() {
    let mut world = common::create_test_world();
    let kind = Kind::Obstacle(ObstacleArchetype::Hydrant);
    let size = Vec2::new(100.0, 160.0);

    let close = common::spawn_test_entity(&mut world, kind, Vec2::new(-250.0, 450.0), size);
    let gone = common::spawn_test_entity(&mut world, kind, Vec2::new(-301.0, 450.0), size);

    run_movement(&mut world);

    assert_that(&world.get::<Dead>(close).is_some()).is_false();
    assert_that(&world.get::<Dead>(gone).is_some()).is_true();
}

#[test]
fn test_overhead_barriers_get_a_longer_leash() {
    let mut world = common::create_test_world();
    let kind = Kind::Obstacle(ObstacleArchetype::Drone);
    let size = Vec2::new(100.0, 100.0);

    // Past the ground threshold but not the overhead one.
    let hanging_on = common::spawn_test_entity(&mut world, kind, Vec2::new(-400.0, 280.0), size);
    let gone = common::spawn_test_entity(&mut world, kind, Vec2::new(-801.0, 280.0), size);

    run_movement(&mut world);

    assert_that(&world.get::<Dead>(hanging_on).is_some()).is_false();
    assert_that(&world.get::<Dead>(gone).is_some()).is_true();
}

#[test]
fn test_anything_flung_above_the_sky_line_dies() {
    let mut world = common::create_test_world();
    let entity = common::spawn_test_entity(
        &mut world,
        Kind::Coin,
        Vec2::new(400.0, spawn::SKY_CULL_Y - 10.0),
        Vec2::splat(30.0),
    );

    run_movement(&mut world);

    assert_that(&world.get::<Dead>(entity).is_some()).is_true();
}

#[test]
fn test_kicked_barriers_fly_up_and_off_the_trailing_edge() {
    let mut world = common::create_test_world();
    let speed = world.resource::<GameSession>().speed;
    let kind = Kind::Obstacle(ObstacleArchetype::Crate);
    let entity = common::spawn_test_entity(&mut world, kind, Vec2::new(500.0, 300.0), Vec2::splat(100.0));
    world.entity_mut(entity).insert(Kicked);

    run_movement(&mut world);

    // Drift is 1.0 for directly spawned test entities.
    let pos = position_of(&world, entity);
    assert_that(&pos.x).is_close_to(500.0 + speed * 2.0 + 1.0, 0.001);
    assert_that(&pos.y).is_equal_to(300.0 - speed * 2.0);
    assert_that(&world.get::<Dead>(entity).is_some()).is_false();
}

#[test]
fn test_kicked_barriers_die_past_the_right_edge() {
    let mut world = common::create_test_world();
    let size = Vec2::splat(100.0);
    let entity = common::spawn_test_entity(
        &mut world,
        Kind::Obstacle(ObstacleArchetype::Crate),
        Vec2::new(CANVAS_W + 5.0 * size.x + 1.0, 300.0),
        size,
    );
    world.entity_mut(entity).insert(Kicked);

    run_movement(&mut world);

    assert_that(&world.get::<Dead>(entity).is_some()).is_true();
}

#[test]
fn test_raining_coins_settle_exactly_on_the_coin_row() {
    let mut world = common::create_test_world();
    let speed = world.resource::<GameSession>().speed;
    let start = Vec2::new(600.0, spawn::COIN_GROUND_Y - 5.0);
    let entity = common::spawn_test_entity(&mut world, Kind::Coin, start, Vec2::splat(30.0));
    world.entity_mut(entity).insert(RainFall { speed: 12.0 });

    run_movement(&mut world);

    let pos = position_of(&world, entity);
    assert_that(&pos.y).is_equal_to(spawn::COIN_GROUND_Y);
    assert_that(&pos.x).is_equal_to(600.0 - speed * 1.5);
    assert_that(&world.get::<RainFall>(entity).is_some()).is_false();

    // Settled: back to the plain scroll.
    run_movement(&mut world);
    let pos = position_of(&world, entity);
    assert_that(&pos.y).is_equal_to(spawn::COIN_GROUND_Y);
    assert_that(&pos.x).is_equal_to(600.0 - speed * 1.5 - speed);
}

#[test]
fn test_cull_returns_the_dead_to_their_own_pools() {
    let mut world = common::create_test_world();
    common::install_pools(&mut world);

    let (obstacle, coin) = world.resource_scope::<Pools, _>(|world, mut pools| {
        (pools.obstacles.acquire(world), pools.coins.acquire(world))
    });
    world.entity_mut(obstacle).insert(Dead);
    world.entity_mut(coin).insert(Dead);

    cull_system(&mut world);

    let pools = world.resource::<Pools>();
    assert_that(&pools.obstacles.active_count()).is_equal_to(0);
    assert_that(&pools.coins.active_count()).is_equal_to(0);
    assert_that(&pools.obstacles.free_count()).is_equal_to(pools.obstacles.total());
    assert_that(&pools.coins.free_count()).is_equal_to(pools.coins.total());

    // The same tick twice is harmless.
    cull_system(&mut world);
    let pools = world.resource::<Pools>();
    assert_that(&pools.obstacles.free_count()).is_equal_to(pools.obstacles.total());
}
