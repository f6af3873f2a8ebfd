//! The persisted player profile: bank, upgrades, lifetime counters.
//!
//! Stored as JSON under the user config directory. A missing file yields
//! the default profile; a corrupt file is replaced (with a warning) rather
//! than aborting startup.

use std::fs;
use std::path::PathBuf;

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::economy;
use crate::error::ProfileError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpgradeKind {
    Shield,
    Booster,
}

#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Profile {
    pub high_score: u64,
    pub coins: u64,
    pub jumps: u64,
    pub slides: u64,
    pub deaths: u64,
    pub shield_level: u32,
    pub booster_level: u32,
    pub lives_used: u32,
    pub last_run_score: u64,
    pub last_run_coins: u32,
    pub muted: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            high_score: 0,
            coins: 0,
            jumps: 0,
            slides: 0,
            deaths: 0,
            shield_level: 1,
            booster_level: 1,
            lives_used: 0,
            last_run_score: 0,
            last_run_coins: 0,
            muted: false,
        }
    }
}

impl Profile {
    /// Raises an upgrade by one level, spending `level * 150` coins.
    pub fn upgrade(&mut self, kind: UpgradeKind) -> Result<u32, ProfileError> {
        let level = match kind {
            UpgradeKind::Shield => self.shield_level,
            UpgradeKind::Booster => self.booster_level,
        };
        if level >= economy::MAX_UPGRADE_LEVEL {
            return Err(ProfileError::MaxLevel(level));
        }
        let cost = level as u64 * economy::UPGRADE_COST_PER_LEVEL;
        if self.coins < cost {
            return Err(ProfileError::InsufficientCoins {
                needed: cost,
                have: self.coins,
            });
        }
        self.coins -= cost;
        let slot = match kind {
            UpgradeKind::Shield => &mut self.shield_level,
            UpgradeKind::Booster => &mut self.booster_level,
        };
        *slot += 1;
        info!(?kind, level = *slot, cost, "Upgrade purchased");
        Ok(*slot)
    }

    /// Spends 100 coins on a revive, at most five per game.
    pub fn pay_for_life(&mut self) -> Result<(), ProfileError> {
        if self.lives_used >= economy::MAX_LIVES {
            return Err(ProfileError::LivesExhausted);
        }
        if self.coins < economy::LIFE_COST {
            return Err(ProfileError::InsufficientCoins {
                needed: economy::LIFE_COST,
                have: self.coins,
            });
        }
        self.coins -= economy::LIFE_COST;
        self.lives_used += 1;
        Ok(())
    }

    /// Folds a finished run into the profile.
    pub fn record_run(&mut self, score: u64, coins: u32) {
        self.high_score = self.high_score.max(score);
        self.coins += coins as u64;
        self.deaths += 1;
        self.last_run_score = score;
        self.last_run_coins = coins;
    }
}

/// Where the profile lives on disk.
#[derive(Resource, Clone, Debug)]
pub struct ProfilePath(pub PathBuf);

impl Default for ProfilePath {
    fn default() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        ProfilePath(base.join("corgi-run").join("profile.json"))
    }
}

/// Loads the profile, falling back to the default on a missing or
/// unreadable file.
pub fn load(path: &ProfilePath) -> Profile {
    match fs::read_to_string(&path.0) {
        Ok(raw) => match serde_json::from_str(&raw) {
            Ok(profile) => {
                debug!(path = %path.0.display(), "Profile loaded");
                profile
            }
            Err(e) => {
                warn!(path = %path.0.display(), error = %e, "Profile file is corrupt, starting fresh");
                Profile::default()
            }
        },
        Err(_) => {
            debug!(path = %path.0.display(), "No profile file, starting fresh");
            Profile::default()
        }
    }
}

/// Writes the profile to disk, creating parent directories as needed.
pub fn save(profile: &Profile, path: &ProfilePath) -> Result<(), ProfileError> {
    if let Some(parent) = path.0.parent() {
        fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(profile)?;
    fs::write(&path.0, raw)?;
    debug!(path = %path.0.display(), "Profile saved");
    Ok(())
}
