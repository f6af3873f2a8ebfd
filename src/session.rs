//! Per-run state: score, coins, scroll speed, and timed buffs.
//!
//! Everything that used to be scattered run-global lives here so a replay
//! is just swapping in a fresh `GameSession`.

use bevy_ecs::prelude::*;

use crate::constants::{buffs, mechanics};

/// Visibility phase of a buff aura near expiry. All transitions are whole
/// ticks; there are no wall-clock timers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkPhase {
    Solid,
    Blinking { visible: bool, countdown: u8 },
}

impl BlinkPhase {
    fn tick(&mut self) {
        if let BlinkPhase::Blinking { visible, countdown } = self {
            if *countdown == 0 {
                *visible = !*visible;
                *countdown = buffs::BLINK_INTERVAL_TICKS;
            } else {
                *countdown -= 1;
            }
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            BlinkPhase::Solid => true,
            BlinkPhase::Blinking { visible, .. } => *visible,
        }
    }
}

/// A running shield or booster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuffTimer {
    pub remaining_ticks: u32,
    pub blink: BlinkPhase,
}

impl BuffTimer {
    /// Duration scales with the persisted upgrade level.
    pub fn for_level(level: u32) -> Self {
        BuffTimer {
            remaining_ticks: level.max(1) * buffs::TICKS_PER_LEVEL,
            blink: BlinkPhase::Solid,
        }
    }

    pub fn fixed(ticks: u32) -> Self {
        BuffTimer {
            remaining_ticks: ticks,
            blink: BlinkPhase::Solid,
        }
    }

    /// Advances one tick; returns `false` once the buff has expired.
    pub fn tick_frame(&mut self) -> bool {
        if self.remaining_ticks == 0 {
            return false;
        }
        self.remaining_ticks -= 1;
        if self.remaining_ticks <= buffs::BLINK_START_TICKS && matches!(self.blink, BlinkPhase::Solid) {
            self.blink = BlinkPhase::Blinking {
                visible: false,
                countdown: buffs::BLINK_INTERVAL_TICKS,
            };
        }
        self.blink.tick();
        self.remaining_ticks > 0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuffState {
    pub shield: Option<BuffTimer>,
    pub boost: Option<BuffTimer>,
}

impl BuffState {
    pub fn shielded(&self) -> bool {
        self.shield.is_some() || self.boost.is_some()
    }

    pub fn boosted(&self) -> bool {
        self.boost.is_some()
    }
}

/// State of a single run.
#[derive(Resource, Clone, Debug)]
pub struct GameSession {
    pub score: f64,
    pub coins: u32,
    /// Presented scroll speed; equals `normal_speed` unless boosted.
    pub speed: f32,
    /// The ramped base speed a finished boost restores to.
    pub normal_speed: f32,
    pub buffs: BuffState,
    pub lives_used: u32,
    pub distance_ticks: u64,
}

impl Default for GameSession {
    fn default() -> Self {
        GameSession {
            score: 0.0,
            coins: 0,
            speed: mechanics::INITIAL_SPEED,
            normal_speed: mechanics::INITIAL_SPEED,
            buffs: BuffState::default(),
            lives_used: 0,
            distance_ticks: 0,
        }
    }
}

impl GameSession {
    /// Starts a shield lasting `level * 82` ticks.
    pub fn start_shield(&mut self, level: u32) {
        self.buffs.shield = Some(BuffTimer::for_level(level));
    }

    /// Starts a booster: shield plus a 5x speed burst.
    pub fn start_boost(&mut self, level: u32) {
        self.buffs.boost = Some(BuffTimer::for_level(level));
        self.buffs.shield = Some(BuffTimer::for_level(level));
        self.speed = self.normal_speed * mechanics::BOOST_FACTOR;
    }

    /// Advances both buff timers; restores the ramp speed when a boost ends.
    pub fn tick_buffs(&mut self) {
        if let Some(shield) = &mut self.buffs.shield {
            if !shield.tick_frame() {
                self.buffs.shield = None;
            }
        }
        if let Some(boost) = &mut self.buffs.boost {
            if !boost.tick_frame() {
                self.buffs.boost = None;
                self.speed = self.normal_speed;
            }
        }
    }
}
