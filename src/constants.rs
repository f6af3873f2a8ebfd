//! Tuning constants for the simulation, presentation, and run economy.
//!
//! Most gameplay values are ratios of the logical canvas so the feel is
//! preserved if the canvas size ever changes.

use glam::UVec2;
use std::time::Duration;

/// Logical canvas size in pixels. The window is created at this size and
/// all gameplay coordinates live in this space (y grows downward).
pub const CANVAS_SIZE: UVec2 = UVec2::new(1280, 720);

pub const CANVAS_W: f32 = CANVAS_SIZE.x as f32;
pub const CANVAS_H: f32 = CANVAS_SIZE.y as f32;

/// Target duration of one simulation tick (60 Hz).
pub const LOOP_TIME: Duration = Duration::from_nanos(1_000_000_000 / 60);

/// Core movement and scoring mechanics.
pub mod mechanics {
    use super::{CANVAS_H, CANVAS_W};

    /// Scroll speed at the start of a run.
    pub const INITIAL_SPEED: f32 = CANVAS_W / 115.0;
    /// Hard ceiling for the scroll speed ramp.
    pub const MAX_SPEED: f32 = CANVAS_W / 50.0;
    /// Speed gained per tick while running.
    pub const SPEED_RAMP: f32 = 0.0005;
    /// Speed multiplier while a booster is active.
    pub const BOOST_FACTOR: f32 = 5.0;

    /// Base score gained per tick; multiplied by the power-up multiplier.
    pub const SCORE_PER_TICK: f64 = 0.12;

    /// Horizontal pixels per tick while a direction key is held.
    pub const PLAYER_WALK_SPEED: f32 = 6.0;

    /// Length of the jump arc in abstract counter units.
    pub const JUMP_LENGTH: f32 = 20.0;
    /// The jump counter advances by `speed / JUMP_RATE_DIVISOR` per tick.
    pub const JUMP_RATE_DIVISOR: f32 = CANVAS_H / 75.0;
    /// Peak jump height is `JUMP_AMPLITUDE * JUMP_LENGTH`.
    pub const JUMP_AMPLITUDE: f32 = CANVAS_H / 125.0;

    /// Per-tick phase advance for levitating obstacles.
    pub const LEVITATE_PHASE_STEP: f32 = 0.025;
    /// Vertical amplitude of the levitation bob.
    pub const LEVITATE_AMPLITUDE: f32 = CANVAS_H / 50.0;

    /// Coins within this distance of the player are pulled by the magnet.
    pub const MAGNET_RADIUS: f32 = 200.0;
    /// Coins within this distance are collected outright.
    pub const MAGNET_COLLECT_RADIUS: f32 = 40.0;
    /// Fraction of the remaining distance a pulled coin covers per tick.
    pub const MAGNET_PULL: f32 = 0.5;
}

/// Player geometry.
pub mod player {
    use super::{CANVAS_H, CANVAS_W};

    pub const HEIGHT: f32 = CANVAS_H / 5.0;
    pub const ASPECT: f32 = 0.7;
    pub const WIDTH: f32 = HEIGHT * ASPECT;
    /// Top edge of the player while grounded.
    pub const BASE_Y: f32 = CANVAS_H - CANVAS_H / 2.5;
    pub const START_X: f32 = CANVAS_W / 8.0;
    /// Leftmost reachable x.
    pub const MIN_X: f32 = WIDTH / 4.0;
    /// Rightmost reachable x.
    pub const MAX_X: f32 = CANVAS_W - 2.0 * WIDTH;
    /// How far the hitbox top drops while sliding, as a height divisor.
    pub const SLIDE_DROP_RATIO: f32 = 2.2;
    /// Ticks per run-cycle animation frame.
    pub const ANIM_FRAME_TICKS: u32 = 6;
}

/// Procedural spawning.
pub mod spawn {
    use super::{CANVAS_H, CANVAS_W};

    /// Draw width of a barrier sprite; heights derive from archetype aspect.
    pub const BARRIER_WIDTH: f32 = CANVAS_H / 3.5;
    /// A new barrier may not spawn until the previous one has scrolled
    /// at least this far from the right edge.
    pub const MIN_SPACING: f32 = BARRIER_WIDTH * 2.0;
    /// Fresh entities enter here, just off the right edge.
    pub const ENTRY_X: f32 = CANVAS_W + 200.0;

    /// Kill threshold for ground entities, in multiples of their width.
    pub const GROUND_CULL_WIDTHS: f32 = 3.0;
    /// Kill threshold for overhead entities, in multiples of their width.
    pub const OVERHEAD_CULL_WIDTHS: f32 = 8.0;
    /// Anything above this y is gone for good.
    pub const SKY_CULL_Y: f32 = -500.0;

    /// Size coefficients relative to the player block.
    pub const COIN_SCALE: f32 = 0.3;
    pub const BUFF_PICKUP_SCALE: f32 = 0.5;
    pub const POWER_UP_SCALE: f32 = 0.4;
    pub const LEVITATE_SCALE: f32 = 1.7;

    /// Rain coins descend this many pixels per tick.
    pub const RAIN_FALL_SPEED: f32 = 4.0;

    /// Pool sizes pre-created at startup.
    pub const WARM_OBSTACLES: usize = 15;
    pub const WARM_COINS: usize = 20;
    pub const WARM_POWER_UPS: usize = 10;

    /// Companion coin columns after a barrier spawn.
    pub const COIN_NEAR_X: f32 = 4.0 * CANVAS_W / 3.0;
    pub const COIN_FAR_X: f32 = 2.0 * CANVAS_W;
    pub const COIN_TOP_Y: f32 = CANVAS_H - CANVAS_H / 1.4;
    pub const COIN_GROUND_Y: f32 = CANVAS_H - CANVAS_H / 3.1;

    /// Rows a buff pickup can ride at.
    pub const PICKUP_HIGH_Y: f32 = CANVAS_H - CANVAS_H / 2.5;
    pub const PICKUP_LOW_Y: f32 = CANVAS_H - CANVAS_H / 1.3;
}

/// Rope-swing river hazard.
pub mod river {
    use super::CANVAS_W;
    use crate::constants::player;

    /// Water gap width.
    pub const GAP: f32 = if CANVAS_W * 0.35 > 400.0 { CANVAS_W * 0.35 } else { 400.0 };
    /// Ground line the banks sit on (player feet row).
    pub const BANK_Y: f32 = player::BASE_Y + player::HEIGHT;
    /// Rope anchor height above the banks.
    pub const ROPE_Y: f32 = BANK_Y - 120.0;
    /// Water surface sits just below the bank line.
    pub const WATER_Y: f32 = BANK_Y + 20.0;
    /// Vertical reach of the swing arc.
    pub const ARC_HEIGHT: f32 = 90.0;

    /// Attach window starts this fraction of the gap past the near bank.
    pub const ATTACH_OFFSET: f32 = 0.1;
    /// Width of the attach window in pixels.
    pub const ATTACH_WINDOW: f32 = 80.0;
    /// Feet below `ROPE_Y + FAIL_MARGIN` inside the gap means a drowning.
    pub const FAIL_MARGIN: f32 = 50.0;

    /// Per-tick ride progress: base, plus right-held bonus, minus left-held drag.
    pub const RIDE_BASE: f32 = 0.012;
    pub const RIDE_FORWARD_BONUS: f32 = 0.006;
    pub const RIDE_BACKWARD_DRAG: f32 = 0.004;

    /// Camera zoom while riding, and the per-tick lerp factor toward it.
    pub const ZOOM_TARGET: f32 = 1.08;
    pub const ZOOM_LERP: f32 = 0.08;

    /// Percent roll threshold for spawning a river (strictly greater).
    pub const SPAWN_THRESHOLD: u32 = 85;
}

/// Timed buff behavior (shield and booster).
pub mod buffs {
    /// Buff duration in ticks per upgrade level.
    pub const TICKS_PER_LEVEL: u32 = 82;
    /// The expiry blink begins this many ticks before the buff ends.
    pub const BLINK_START_TICKS: u32 = 60;
    /// Aura visibility toggles every this many ticks while blinking.
    pub const BLINK_INTERVAL_TICKS: u8 = 10;
    /// Ticks of free shield granted by a revive.
    pub const REVIVE_SHIELD_TICKS: u32 = 120;
}

/// Run economy and persisted progression.
pub mod economy {
    /// Upgrading from level N costs `N * UPGRADE_COST_PER_LEVEL` coins.
    pub const UPGRADE_COST_PER_LEVEL: u64 = 150;
    pub const MAX_UPGRADE_LEVEL: u32 = 4;
    /// Coin price of one revive.
    pub const LIFE_COST: u64 = 100;
    /// Revives allowed per game.
    pub const MAX_LIVES: u32 = 5;
}

/// Death-sequence presentation.
pub mod dying {
    pub const FRAMES: u8 = 4;
    pub const TICKS_PER_FRAME: u32 = 9;
    pub const TOTAL_TICKS: u32 = FRAMES as u32 * TICKS_PER_FRAME;
}
