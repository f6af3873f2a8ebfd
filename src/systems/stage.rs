//! The game stage machine.
//!
//! `Menu -> Playing -> Dying -> GameOver`, with replay looping back to
//! `Playing` and home returning to the menu. The dying sequence is a
//! frame-counted sprite countdown; all transitions happen in one place so
//! the side effects (persisting the run, requesting a world reset) are
//! easy to audit.

use bevy_ecs::prelude::*;
use std::mem::discriminant;
use tracing::{debug, info, warn};

use crate::constants::{buffs, dying};
use crate::effects::{Collaborators, Cue};
use crate::events::{GameCommand, GameEvent};
use crate::hud;
use crate::pool::Pools;
use crate::profile::{self, Profile, ProfilePath, UpgradeKind};
use crate::session::{BuffTimer, GameSession};
use crate::systems::components::{
    CameraZoom, InputState, Notification, PendingReset, Player, Position,
};
use crate::systems::player::PlayerState;
use crate::systems::river::RiverState;
use crate::systems::spawner::SpawnTracker;

#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStage {
    Menu,
    Playing,
    /// Death sprite sequence, counted in whole ticks.
    Dying {
        remaining_ticks: u32,
        frame: u8,
    },
    GameOver,
}

impl GameStage {
    pub fn playing(&self) -> bool {
        matches!(self, GameStage::Playing)
    }
}

#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct PauseState {
    active: bool,
}

impl PauseState {
    pub fn active(&self) -> bool {
        self.active
    }

    pub fn toggle(&mut self) {
        self.active = !self.active;
        debug!(paused = self.active, "Pause toggled");
    }
}

/// Applies commands and death events to the stage, advances the dying
/// countdown, and performs per-transition side effects.
#[allow(clippy::too_many_arguments)]
pub fn stage_system(
    mut stage: ResMut<GameStage>,
    mut pause: ResMut<PauseState>,
    mut events: EventReader<GameEvent>,
    mut profile: ResMut<Profile>,
    path: Res<ProfilePath>,
    session: Res<GameSession>,
    mut pending: ResMut<PendingReset>,
    mut notification: ResMut<Notification>,
    mut collaborators: ResMut<Collaborators>,
) {
    let old = *stage;
    let mut new = old;

    for event in events.read() {
        match event {
            GameEvent::Command(GameCommand::TogglePause) => {
                if matches!(new, GameStage::Playing) {
                    pause.toggle();
                }
            }
            GameEvent::Command(GameCommand::ToggleMute) => {
                profile.muted = !profile.muted;
                info!(muted = profile.muted, "Audio mute toggled");
            }
            GameEvent::Command(GameCommand::Confirm) => {
                if matches!(new, GameStage::Menu | GameStage::GameOver) {
                    new = GameStage::Playing;
                    *pending = PendingReset::NewRun;
                }
            }
            GameEvent::Command(GameCommand::GoHome) => {
                if matches!(new, GameStage::GameOver) {
                    new = GameStage::Menu;
                }
            }
            GameEvent::Command(GameCommand::UpgradeShield) => {
                buy_upgrade(&mut profile, UpgradeKind::Shield, &new, &mut notification, &path);
            }
            GameEvent::Command(GameCommand::UpgradeBooster) => {
                buy_upgrade(&mut profile, UpgradeKind::Booster, &new, &mut notification, &path);
            }
            GameEvent::PlayerHit { .. } | GameEvent::PlayerDrowned => {
                if matches!(new, GameStage::Playing) {
                    new = GameStage::Dying {
                        remaining_ticks: dying::TOTAL_TICKS,
                        frame: 0,
                    };
                }
            }
            _ => {}
        }
    }

    // Advance the death sprite countdown.
    if let GameStage::Dying { remaining_ticks, .. } = new {
        let remaining = remaining_ticks.saturating_sub(1);
        if remaining == 0 {
            new = GameStage::GameOver;
        } else {
            let elapsed = dying::TOTAL_TICKS - remaining;
            new = GameStage::Dying {
                remaining_ticks: remaining,
                frame: ((elapsed / dying::TICKS_PER_FRAME) as u8).min(dying::FRAMES - 1),
            };
        }
    }

    if discriminant(&old) != discriminant(&new) {
        match (&old, &new) {
            (GameStage::Playing, GameStage::Dying { .. }) => {
                collaborators.effects.cue(Cue::GameOver);
                info!(score = session.score.floor(), coins = session.coins, "Run over");
            }
            (GameStage::Dying { .. }, GameStage::GameOver) => {
                let score = session.score.floor() as u64;
                profile.record_run(score, session.coins);
                if let Err(e) = profile::save(&profile, &path) {
                    warn!(error = %e, "Could not persist profile");
                }
                notification.show(format!(
                    "score {}  best {}  bank {}",
                    hud::format_stat(score),
                    hud::format_stat(profile.high_score),
                    hud::format_stat(profile.coins),
                ));
            }
            (_, GameStage::Playing) => {
                debug!("Run starting");
            }
            _ => {}
        }
        debug!(?old, stage = ?new, "Stage transition");
    }

    *stage = new;
}

fn buy_upgrade(
    profile: &mut Profile,
    kind: UpgradeKind,
    stage: &GameStage,
    notification: &mut Notification,
    path: &ProfilePath,
) {
    if !matches!(stage, GameStage::Menu) {
        return;
    }
    match profile.upgrade(kind) {
        Ok(level) => {
            notification.show(format!("{kind:?} upgraded to level {level}"));
            if let Err(e) = profile::save(profile, path) {
                warn!(error = %e, "Could not persist profile");
            }
        }
        Err(e) => notification.show(e.to_string()),
    }
}

/// Performs the world reset the stage machine requested: drains pools,
/// clears the river, and rebuilds the session (a revive keeps score and
/// coins and grants a grace shield).
pub fn reset_run_system(world: &mut World) {
    let mode = *world.resource::<PendingReset>();
    if mode == PendingReset::None {
        return;
    }
    *world.resource_mut::<PendingReset>() = PendingReset::None;

    world.resource_scope::<Pools, _>(|world, mut pools| match mode {
        PendingReset::NewRun => pools.release_all(world),
        PendingReset::Revive => pools.obstacles.release_all(world),
        PendingReset::None => {}
    });

    *world.resource_mut::<RiverState>() = RiverState::Inactive;
    *world.resource_mut::<CameraZoom>() = CameraZoom::default();
    *world.resource_mut::<InputState>() = InputState::default();
    world.resource_mut::<SpawnTracker>().last_obstacle = None;

    match mode {
        PendingReset::NewRun => {
            *world.resource_mut::<GameSession>() = GameSession::default();
            world.resource_mut::<Profile>().lives_used = 0;
            info!("World reset for a new run");
        }
        PendingReset::Revive => {
            let mut session = world.resource_mut::<GameSession>();
            session.lives_used += 1;
            session.buffs.shield = Some(BuffTimer::fixed(buffs::REVIVE_SHIELD_TICKS));
            session.speed = session.normal_speed;
            session.buffs.boost = None;
            info!(lives_used = session.lives_used, "Player revived");
        }
        PendingReset::None => {}
    }

    let mut players = world.query_filtered::<(&mut Position, &mut PlayerState), With<Player>>();
    if let Ok((mut position, mut state)) = players.single_mut(world) {
        position.0.x = crate::constants::player::START_X;
        position.0.y = crate::constants::player::BASE_Y;
        *state = PlayerState::default();
    }

    if mode == PendingReset::Revive {
        *world.resource_mut::<GameStage>() = GameStage::Playing;
    }
}
