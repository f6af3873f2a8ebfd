use bevy_ecs::system::RunSystemOnce;
use speculoos::prelude::*;

use corgi_run::constants::{buffs, mechanics};
use corgi_run::effects::Collaborators;
use corgi_run::session::{BlinkPhase, BuffTimer, GameSession};
use corgi_run::systems::score::{buff_tick_system, score_system, speed_ramp_system};

mod common;

#[test]
fn test_score_accrues_per_tick() {
    let mut world = common::create_test_world();

    for _ in 0..100 {
        world.run_system_once(score_system).expect("System should run");
    }

    let session = world.resource::<GameSession>();
    assert_that(&(session.score - 12.0).abs()).is_less_than(1e-9);
    assert_that(&session.distance_ticks).is_equal_to(100);
}

#[test]
fn test_score_multiplier_scales_accrual() {
    let mut world = common::create_test_world();
    let mut power_ups = common::TestPowerUps::new();
    power_ups.multiplier = 2.0;
    world.resource_mut::<Collaborators>().power_ups = Box::new(power_ups);

    for _ in 0..100 {
        world.run_system_once(score_system).expect("System should run");
    }

    assert_that(&(world.resource::<GameSession>().score - 24.0).abs()).is_less_than(1e-9);
}

#[test]
fn test_boost_adds_a_flat_score_bonus() {
    let mut world = common::create_test_world();
    world.resource_mut::<GameSession>().start_boost(1);

    for _ in 0..10 {
        world.run_system_once(score_system).expect("System should run");
    }

    // 10 ticks of base accrual plus the boost bonus.
    assert_that(&(world.resource::<GameSession>().score - 2.4).abs()).is_less_than(1e-9);
}

#[test]
fn test_speed_ramp_caps_out() {
    let mut world = common::create_test_world();
    world.resource_mut::<GameSession>().normal_speed = mechanics::MAX_SPEED - 0.001;

    for _ in 0..10 {
        world.run_system_once(speed_ramp_system).expect("System should run");
    }

    let session = world.resource::<GameSession>();
    assert_that(&session.normal_speed).is_equal_to(mechanics::MAX_SPEED);
    assert_that(&session.speed).is_equal_to(mechanics::MAX_SPEED);
}

#[test]
fn test_boost_multiplies_speed_and_restores_it() {
    let mut world = common::create_test_world();
    let base = world.resource::<GameSession>().normal_speed;
    world.resource_mut::<GameSession>().start_boost(1);

    assert_that(&world.resource::<GameSession>().speed).is_equal_to(base * mechanics::BOOST_FACTOR);

    // One level of boost lasts exactly 82 ticks.
    for _ in 0..buffs::TICKS_PER_LEVEL {
        world.run_system_once(buff_tick_system).expect("System should run");
    }

    let session = world.resource::<GameSession>();
    assert_that(&session.buffs.boosted()).is_false();
    assert_that(&session.speed).is_equal_to(base);
}

#[test]
fn test_shield_duration_scales_with_level() {
    assert_that(&BuffTimer::for_level(1).remaining_ticks).is_equal_to(82);
    assert_that(&BuffTimer::for_level(3).remaining_ticks).is_equal_to(246);
    // Level zero is clamped up rather than producing an instant expiry.
    assert_that(&BuffTimer::for_level(0).remaining_ticks).is_equal_to(82);
}

#[test]
fn test_blink_starts_near_expiry_and_toggles() {
    let mut timer = BuffTimer::for_level(1);

    // Solid until the blink window opens.
    while timer.remaining_ticks > buffs::BLINK_START_TICKS + 1 {
        assert_that(&timer.blink.visible()).is_true();
        assert_that(&timer.tick_frame()).is_true();
    }

    timer.tick_frame();
    assert_that(&matches!(timer.blink, BlinkPhase::Blinking { .. })).is_true();

    // Count visibility toggles across the remaining window.
    let mut toggles = 0;
    let mut visible = timer.blink.visible();
    while timer.tick_frame() {
        if timer.blink.visible() != visible {
            toggles += 1;
            visible = timer.blink.visible();
        }
    }
    // 60 blink ticks at one toggle per 10.
    assert_that(&(toggles >= 4)).is_true();
}

#[test]
fn test_shield_expires_exactly_on_schedule() {
    let mut world = common::create_test_world();
    world.resource_mut::<GameSession>().start_shield(2);

    for _ in 0..(2 * buffs::TICKS_PER_LEVEL - 1) {
        world.run_system_once(buff_tick_system).expect("System should run");
    }
    assert_that(&world.resource::<GameSession>().buffs.shielded()).is_true();

    world.run_system_once(buff_tick_system).expect("System should run");
    assert_that(&world.resource::<GameSession>().buffs.shielded()).is_false();
}
