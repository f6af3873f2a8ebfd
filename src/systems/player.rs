//! Player control and movement.

use bevy_ecs::prelude::*;
use tracing::trace;

use crate::constants::{mechanics, player};
use crate::events::{GameCommand, GameEvent};
use crate::profile::Profile;
use crate::session::GameSession;
use crate::systems::components::{Held, InputState, Player, Position};
use crate::systems::river::RiverState;

/// A jump in flight, measured in abstract arc units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct JumpArc {
    pub count: f32,
}

#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct PlayerState {
    pub jump: Option<JumpArc>,
    /// Current height above the grounded baseline, derived from the arc.
    pub jump_height: f32,
    pub sliding: bool,
    pub anim_frame: u32,
    anim_counter: u32,
}

impl PlayerState {
    pub fn grounded(&self) -> bool {
        self.jump.is_none()
    }

    /// Effective top edge of the hitbox, accounting for a slide.
    pub fn hitbox_top(&self, y: f32) -> f32 {
        if self.sliding {
            y + player::HEIGHT / player::SLIDE_DROP_RATIO
        } else {
            y
        }
    }
}

/// Decodes movement commands into held-input flags and player state.
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    mut input: ResMut<InputState>,
    mut profile: ResMut<Profile>,
    river: Res<RiverState>,
    mut player: Single<&mut PlayerState, With<Player>>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = event else { continue };
        match command {
            GameCommand::Jump => {
                if player.grounded() && !player.sliding && !river.riding() {
                    player.jump = Some(JumpArc::default());
                    profile.jumps += 1;
                    trace!(total_jumps = profile.jumps, "Jump started");
                }
            }
            GameCommand::SlideStart => {
                if player.grounded() && !player.sliding {
                    player.sliding = true;
                    profile.slides += 1;
                }
            }
            GameCommand::SlideEnd => {
                player.sliding = false;
            }
            GameCommand::HoldLeft(held) => input.0.set(Held::LEFT, *held),
            GameCommand::HoldRight(held) => input.0.set(Held::RIGHT, *held),
            _ => {}
        }
    }
}

/// Walking, the jump arc, and the run-cycle animation counter.
pub fn player_update_system(
    session: Res<GameSession>,
    input: Res<InputState>,
    river: Res<RiverState>,
    mut player: Single<(&mut Position, &mut PlayerState), With<Player>>,
) {
    // While swinging, the river system owns the player position.
    if river.riding() {
        return;
    }
    let (position, state) = &mut *player;

    if input.0.contains(Held::RIGHT) {
        position.0.x = (position.0.x + mechanics::PLAYER_WALK_SPEED).min(player::MAX_X);
    }
    if input.0.contains(Held::LEFT) {
        position.0.x = (position.0.x - mechanics::PLAYER_WALK_SPEED).max(player::MIN_X);
    }

    if let Some(arc) = &mut state.jump {
        arc.count += session.speed / mechanics::JUMP_RATE_DIVISOR;
        if arc.count > mechanics::JUMP_LENGTH {
            state.jump = None;
            state.jump_height = 0.0;
        } else {
            let phase = std::f32::consts::PI * arc.count / mechanics::JUMP_LENGTH;
            state.jump_height = mechanics::JUMP_AMPLITUDE * mechanics::JUMP_LENGTH * phase.sin();
        }
    }

    state.anim_counter += 1;
    if state.anim_counter >= player::ANIM_FRAME_TICKS {
        state.anim_counter = 0;
        state.anim_frame = state.anim_frame.wrapping_add(1) % 4;
    }
}
