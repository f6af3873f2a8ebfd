use pretty_assertions::assert_eq;
use speculoos::prelude::*;

use corgi_run::error::ProfileError;
use corgi_run::profile::{self, Profile, UpgradeKind};

mod common;

#[test]
fn test_upgrade_cost_scales_with_level() {
    let mut profile = Profile {
        coins: 150,
        ..Profile::default()
    };

    // Level 1 -> 2 costs 150.
    let level = profile.upgrade(UpgradeKind::Shield).expect("Upgrade should succeed");
    assert_that(&level).is_equal_to(2);
    assert_that(&profile.coins).is_equal_to(0);

    // Level 2 -> 3 costs 300; the empty bank refuses it.
    let refused = profile.upgrade(UpgradeKind::Shield);
    assert_that(&matches!(refused, Err(ProfileError::InsufficientCoins { needed: 300, .. }))).is_true();
    assert_that(&profile.shield_level).is_equal_to(2);
}

#[test]
fn test_upgrades_cap_at_level_four() {
    let mut profile = Profile {
        coins: 100_000,
        booster_level: 4,
        ..Profile::default()
    };

    let refused = profile.upgrade(UpgradeKind::Booster);
    assert_that(&matches!(refused, Err(ProfileError::MaxLevel(4)))).is_true();
    assert_that(&profile.coins).is_equal_to(100_000);
}

#[test]
fn test_life_costs_a_hundred_coins_five_per_game() {
    let mut profile = Profile {
        coins: 1_000,
        ..Profile::default()
    };

    for lives in 1..=5 {
        profile.pay_for_life().expect("Life purchase should succeed");
        assert_that(&profile.lives_used).is_equal_to(lives);
    }
    assert_that(&profile.coins).is_equal_to(500);

    let refused = profile.pay_for_life();
    assert_that(&matches!(refused, Err(ProfileError::LivesExhausted))).is_true();
    assert_that(&profile.coins).is_equal_to(500);
}

#[test]
fn test_life_refused_without_funds() {
    let mut profile = Profile {
        coins: 99,
        ..Profile::default()
    };

    let refused = profile.pay_for_life();
    assert_that(&matches!(refused, Err(ProfileError::InsufficientCoins { needed: 100, have: 99 }))).is_true();
    assert_that(&profile.lives_used).is_equal_to(0);
}

#[test]
fn test_record_run_folds_into_lifetime_stats() {
    let mut profile = Profile {
        high_score: 500,
        coins: 10,
        ..Profile::default()
    };

    profile.record_run(300, 7);
    // A worse run banks its coins but leaves the best score alone.
    assert_eq!(profile.high_score, 500);
    assert_eq!(profile.coins, 17);
    assert_eq!(profile.deaths, 1);
    assert_eq!(profile.last_run_score, 300);
    assert_eq!(profile.last_run_coins, 7);

    profile.record_run(900, 0);
    assert_eq!(profile.high_score, 900);
    assert_eq!(profile.deaths, 2);
}

#[test]
fn test_save_and_load_round_trip() {
    let path = common::temp_profile_path();
    let mut profile = Profile::default();
    profile.coins = 1234;
    profile.shield_level = 3;
    profile.jumps = 42;
    profile.muted = true;

    profile::save(&profile, &path).expect("Save should succeed");
    let loaded = profile::load(&path);

    assert_eq!(loaded, profile);
}

#[test]
fn test_missing_file_yields_the_default_profile() {
    let path = common::temp_profile_path();
    assert_eq!(profile::load(&path), Profile::default());
}

#[test]
fn test_corrupt_file_yields_the_default_profile() {
    let path = common::temp_profile_path();
    std::fs::create_dir_all(path.0.parent().unwrap()).unwrap();
    std::fs::write(&path.0, "{not json").unwrap();

    assert_eq!(profile::load(&path), Profile::default());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let path = common::temp_profile_path();
    std::fs::create_dir_all(path.0.parent().unwrap()).unwrap();
    std::fs::write(&path.0, r#"{"coins": 77}"#).unwrap();

    let loaded = profile::load(&path);
    assert_eq!(loaded.coins, 77);
    assert_eq!(loaded.shield_level, 1);
}
