//! Injected collaborator interfaces.
//!
//! Particle bursts, audio cues, and the exotic power-up subsystem are
//! external to the simulation core. They are reached through trait objects
//! held in the [`Collaborators`] resource and called unconditionally; the
//! null implementations make every call safe when nothing is plugged in.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::systems::components::PowerUpKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstKind {
    Damage,
    Sparkle,
    Splash,
    Pickup,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cue {
    Coin,
    Kick,
    PowerUp,
    GameOver,
}

/// Particle and audio feedback sink.
pub trait EffectSink: Send + Sync {
    fn burst(&mut self, pos: Vec2, kind: BurstKind);
    fn cue(&mut self, cue: Cue);
}

/// The exotic power-up subsystem (magnet, multipliers, invincibility).
/// Shield and booster are session buffs and do not pass through here.
pub trait PowerUps: Send + Sync {
    fn activate(&mut self, kind: PowerUpKind);
    fn is_invincible(&self) -> bool;
    fn is_magnet_active(&self) -> bool;
    fn score_multiplier(&self) -> f32;
}

pub struct NullEffects;

impl EffectSink for NullEffects {
    fn burst(&mut self, _pos: Vec2, _kind: BurstKind) {}
    fn cue(&mut self, _cue: Cue) {}
}

pub struct NullPowerUps;

impl PowerUps for NullPowerUps {
    fn activate(&mut self, _kind: PowerUpKind) {}

    fn is_invincible(&self) -> bool {
        false
    }

    fn is_magnet_active(&self) -> bool {
        false
    }

    fn score_multiplier(&self) -> f32 {
        1.0
    }
}

#[derive(Resource)]
pub struct Collaborators {
    pub effects: Box<dyn EffectSink>,
    pub power_ups: Box<dyn PowerUps>,
}

impl Default for Collaborators {
    fn default() -> Self {
        Collaborators {
            effects: Box::new(NullEffects),
            power_ups: Box::new(NullPowerUps),
        }
    }
}
