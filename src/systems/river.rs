//! The rope-swing river hazard.
//!
//! One river at most exists at a time, tracked as an explicit state
//! machine: `Inactive` -> `Active` (scrolling in, nobody aboard) ->
//! `Active` with a ride in progress -> `Inactive`, either on landing or
//! once an unridden span scrolls out. Missing the rope over open water is
//! fatal, shield or not.

use bevy_ecs::prelude::*;
use tracing::{debug, trace};

use crate::constants::{player, river, spawn};
use crate::events::GameEvent;
use crate::session::GameSession;
use crate::systems::components::{CameraZoom, Held, InputState, Player, Position};
use crate::systems::player::PlayerState;

/// The water gap, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiverSpan {
    pub start_x: f32,
    pub gap: f32,
}

impl RiverSpan {
    /// A span just off the right edge, about to scroll in.
    pub fn entering() -> Self {
        RiverSpan {
            start_x: spawn::ENTRY_X,
            gap: river::GAP,
        }
    }

    pub fn end_x(&self) -> f32 {
        self.start_x + self.gap
    }

    /// Left edge of the rope-attach window.
    pub fn attach_x(&self) -> f32 {
        self.start_x + self.gap * river::ATTACH_OFFSET
    }
}

/// A swing in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RopeRide {
    pub progress: f32,
}

#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub enum RiverState {
    #[default]
    Inactive,
    Active {
        span: RiverSpan,
        ride: Option<RopeRide>,
    },
}

impl RiverState {
    pub fn riding(&self) -> bool {
        matches!(self, RiverState::Active { ride: Some(_), .. })
    }
}

/// One tick of ride progress. Always positive, clamped to 1.0.
pub fn ride_step(progress: f32, right_held: bool, left_held: bool) -> f32 {
    let mut step = river::RIDE_BASE;
    if right_held {
        step += river::RIDE_FORWARD_BONUS;
    }
    if left_held {
        step -= river::RIDE_BACKWARD_DRAG;
    }
    (progress + step).min(1.0)
}

/// Swing arc position for a given progress.
pub fn arc_point(span: &RiverSpan, progress: f32) -> (f32, f32) {
    let x = span.start_x + span.gap * progress;
    let y = river::ROPE_Y - (std::f32::consts::PI * progress).sin() * river::ARC_HEIGHT;
    (x, y)
}

/// Scroll, attach, ride, land, drown.
pub fn river_system(
    mut state: ResMut<RiverState>,
    session: Res<GameSession>,
    input: Res<InputState>,
    mut player: Single<(&mut Position, &mut PlayerState), With<Player>>,
    mut events: EventWriter<GameEvent>,
) {
    let RiverState::Active { mut span, mut ride } = *state else {
        return;
    };
    let (position, player_state) = &mut *player;

    span.start_x -= session.speed;

    let front = position.0.x + player::WIDTH;
    match &mut ride {
        None => {
            let attach_x = span.attach_x();
            let reaching = player_state.jump.is_some() || !input.0.is_empty();
            if reaching && front > attach_x && front < attach_x + river::ATTACH_WINDOW {
                ride = Some(RopeRide::default());
                player_state.jump = None;
                player_state.jump_height = 0.0;
                debug!(start_x = span.start_x, "Rope caught");
            } else {
                // Over open water with nothing to hold on to.
                let feet = position.0.y + player::HEIGHT - player_state.jump_height;
                if front > span.start_x && front < span.end_x() && feet > river::ROPE_Y + river::FAIL_MARGIN {
                    debug!(front, feet, "Player fell into the river");
                    events.write(GameEvent::PlayerDrowned);
                }
            }
        }
        Some(current) => {
            current.progress = ride_step(current.progress, input.0.contains(Held::RIGHT), input.0.contains(Held::LEFT));
            let (x, y) = arc_point(&span, current.progress);
            position.0.x = x - player::WIDTH;
            position.0.y = y;
            trace!(progress = current.progress, "Riding the rope");
            if current.progress >= 1.0 {
                // Landing clears the hazard outright; the next river is
                // eligible to roll immediately.
                position.0.y = player::BASE_Y;
                *state = RiverState::Inactive;
                debug!("Landed on the far bank");
                return;
            }
        }
    }

    if ride.is_none() && span.end_x() < -span.gap {
        *state = RiverState::Inactive;
        debug!("River scrolled out");
    } else {
        *state = RiverState::Active { span, ride };
    }
}

/// Eases the presentation zoom toward its target every tick.
pub fn camera_zoom_system(state: Res<RiverState>, mut zoom: ResMut<CameraZoom>) {
    zoom.target = if state.riding() { river::ZOOM_TARGET } else { 1.0 };
    zoom.current += (zoom.target - zoom.current) * river::ZOOM_LERP;
}
