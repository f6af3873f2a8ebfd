//! Per-tick session bookkeeping: score accrual, the speed ramp, and buff
//! timers.

use bevy_ecs::prelude::*;

use crate::constants::mechanics;
use crate::effects::Collaborators;
use crate::session::GameSession;
use crate::systems::components::Notification;

/// Score accrues every tick, scaled by the power-up multiplier, with a
/// flat bonus while boosted.
pub fn score_system(mut session: ResMut<GameSession>, collaborators: Res<Collaborators>) {
    let multiplier = collaborators.power_ups.score_multiplier() as f64;
    session.score += mechanics::SCORE_PER_TICK * multiplier;
    if session.buffs.boosted() {
        session.score += mechanics::SCORE_PER_TICK;
    }
    session.distance_ticks += 1;
}

/// The base speed creeps up to its cap; the presented speed is the base
/// unless a boost is multiplying it.
pub fn speed_ramp_system(mut session: ResMut<GameSession>) {
    session.normal_speed = (session.normal_speed + mechanics::SPEED_RAMP).min(mechanics::MAX_SPEED);
    session.speed = if session.buffs.boosted() {
        session.normal_speed * mechanics::BOOST_FACTOR
    } else {
        session.normal_speed
    };
}

/// Advances shield/boost timers and their expiry blink.
pub fn buff_tick_system(mut session: ResMut<GameSession>) {
    session.tick_buffs();
}

/// Ages out the HUD notification.
pub fn notification_system(mut notification: ResMut<Notification>) {
    if notification.text.is_some() {
        notification.remaining_ticks = notification.remaining_ticks.saturating_sub(1);
        if notification.remaining_ticks == 0 {
            notification.text = None;
        }
    }
}
