//! Palette-rect presentation over an SDL2 canvas.
//!
//! Sprites are flat-colored boxes; the layer exists to prove out the
//! simulation, not to be art. Everything gameplay-positioned goes through
//! the camera zoom so the rope ride reads on screen.

use bevy_ecs::prelude::*;
use glam::Vec2;
use sdl2::pixels::Color;
use sdl2::rect::{Point, Rect};
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::constants::{player, river as river_constants, CANVAS_H, CANVAS_W};
use crate::error::GameError;
use crate::hud;
use crate::session::GameSession;
use crate::systems::components::{
    Active, Backdrop, CameraZoom, Dead, Kind, Notification, ObstacleArchetype, PickupKind, Player, Position, Size,
};
use crate::systems::player::PlayerState;
use crate::systems::river::{arc_point, RiverState};
use crate::systems::stage::{GameStage, PauseState};

const SKY: Color = Color::RGB(126, 192, 238);
const GROUND: Color = Color::RGB(94, 72, 48);
const BAND_FAR: Color = Color::RGB(108, 164, 204);
const BAND_NEAR: Color = Color::RGB(88, 140, 180);
const WATER: Color = Color::RGB(38, 92, 150);
const ROPE: Color = Color::RGB(222, 190, 120);
const CORGI: Color = Color::RGB(235, 160, 70);
const COIN: Color = Color::RGB(250, 212, 60);
const PICKUP_SHIELD: Color = Color::RGB(80, 200, 250);
const PICKUP_BOOST: Color = Color::RGB(250, 110, 60);
const PICKUP_EXOTIC: Color = Color::RGB(190, 110, 250);
const AURA: Color = Color::RGB(140, 220, 255);

fn barrier_color(archetype: ObstacleArchetype) -> Color {
    match archetype {
        ObstacleArchetype::Hydrant => Color::RGB(200, 60, 60),
        ObstacleArchetype::Crate => Color::RGB(160, 120, 70),
        ObstacleArchetype::LowWall => Color::RGB(130, 130, 140),
        ObstacleArchetype::TallSign => Color::RGB(70, 170, 110),
        ObstacleArchetype::Drone => Color::RGB(90, 90, 100),
        ObstacleArchetype::Billboard => Color::RGB(210, 180, 90),
        ObstacleArchetype::Spikes => Color::RGB(60, 60, 70),
        ObstacleArchetype::Buffbox => Color::RGB(240, 240, 240),
    }
}

fn kind_color(kind: &Kind) -> Color {
    match kind {
        Kind::Obstacle(archetype) => barrier_color(*archetype),
        Kind::Coin => COIN,
        Kind::PowerUp(PickupKind::Shield) => PICKUP_SHIELD,
        Kind::PowerUp(PickupKind::Booster) => PICKUP_BOOST,
        Kind::PowerUp(PickupKind::Exotic(_)) => PICKUP_EXOTIC,
    }
}

/// Maps a gameplay-space box through the camera zoom (anchored at the
/// canvas center).
fn zoomed_rect(pos: Vec2, size: Vec2, zoom: f32) -> Rect {
    let center = Vec2::new(CANVAS_W, CANVAS_H) * 0.5;
    let top_left = center + (pos - center) * zoom;
    let scaled = size * zoom;
    Rect::new(
        top_left.x.round() as i32,
        top_left.y.round() as i32,
        scaled.x.max(1.0) as u32,
        scaled.y.max(1.0) as u32,
    )
}

fn zoomed_point(pos: Vec2, zoom: f32) -> Point {
    let center = Vec2::new(CANVAS_W, CANVAS_H) * 0.5;
    let mapped = center + (pos - center) * zoom;
    Point::new(mapped.x.round() as i32, mapped.y.round() as i32)
}

/// Scrolls the parallax bands at fractions of the run speed.
pub fn backdrop_system(mut backdrop: ResMut<Backdrop>, session: Res<GameSession>) {
    for (offset, factor) in backdrop.offsets.iter_mut().zip([0.3f32, 0.6]) {
        *offset = (*offset + session.speed * factor) % CANVAS_W;
    }
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    mut canvas: NonSendMut<&'static mut Canvas<Window>>,
    stage: Res<GameStage>,
    zoom: Res<CameraZoom>,
    backdrop: Res<Backdrop>,
    river: Res<RiverState>,
    session: Res<GameSession>,
    entities: Query<(&Kind, &Position, &Size), (With<Active>, Without<Dead>)>,
    player_query: Single<(&Position, &PlayerState), With<Player>>,
    mut errors: EventWriter<GameError>,
) {
    if let Err(e) = draw_frame(
        &mut canvas,
        &stage,
        &zoom,
        &backdrop,
        &river,
        &session,
        &entities,
        *player_query,
    ) {
        errors.write(GameError::Sdl(e));
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_frame(
    canvas: &mut Canvas<Window>,
    stage: &GameStage,
    zoom: &CameraZoom,
    backdrop: &Backdrop,
    river: &RiverState,
    session: &GameSession,
    entities: &Query<(&Kind, &Position, &Size), (With<Active>, Without<Dead>)>,
    (position, state): (&Position, &PlayerState),
) -> Result<(), String> {
    let z = zoom.current;

    canvas.set_draw_color(SKY);
    canvas.clear();

    // Parallax bands, tiled twice so the wrap is seamless.
    for (offset, (color, top, height)) in backdrop.offsets.iter().zip([
        (BAND_FAR, CANVAS_H * 0.45, CANVAS_H * 0.08),
        (BAND_NEAR, CANVAS_H * 0.53, CANVAS_H * 0.05),
    ]) {
        canvas.set_draw_color(color);
        for tile in 0..2 {
            let x = tile as f32 * CANVAS_W - offset;
            canvas.fill_rect(Rect::new(x as i32, top as i32, CANVAS_W as u32, height as u32))?;
        }
    }

    // Ground, carved by the river gap when one is on screen.
    canvas.set_draw_color(GROUND);
    let ground_top = river_constants::BANK_Y;
    match river {
        RiverState::Active { span, ride } => {
            let gap_left = span.start_x.max(0.0);
            let gap_right = span.end_x().min(CANVAS_W);
            if gap_left > 0.0 {
                canvas.fill_rect(zoomed_rect(
                    Vec2::new(0.0, ground_top),
                    Vec2::new(gap_left, CANVAS_H - ground_top),
                    z,
                ))?;
            }
            if gap_right < CANVAS_W {
                canvas.fill_rect(zoomed_rect(
                    Vec2::new(gap_right, ground_top),
                    Vec2::new(CANVAS_W - gap_right, CANVAS_H - ground_top),
                    z,
                ))?;
            }
            if gap_right > gap_left {
                canvas.set_draw_color(WATER);
                canvas.fill_rect(zoomed_rect(
                    Vec2::new(gap_left, river_constants::WATER_Y),
                    Vec2::new(gap_right - gap_left, CANVAS_H - river_constants::WATER_Y),
                    z,
                ))?;
            }

            // Rope: anchor above the gap center down to the ride position.
            canvas.set_draw_color(ROPE);
            let anchor = Vec2::new(span.start_x + span.gap * 0.5, river_constants::ROPE_Y - river_constants::ARC_HEIGHT);
            let progress = ride.map(|r| r.progress).unwrap_or(0.0);
            let (hand_x, hand_y) = arc_point(span, progress);
            canvas.draw_line(zoomed_point(anchor, z), zoomed_point(Vec2::new(hand_x, hand_y), z))?;
        }
        RiverState::Inactive => {
            canvas.fill_rect(zoomed_rect(
                Vec2::new(0.0, ground_top),
                Vec2::new(CANVAS_W, CANVAS_H - ground_top),
                z,
            ))?;
        }
    }

    for (kind, position, size) in entities.iter() {
        canvas.set_draw_color(kind_color(kind));
        canvas.fill_rect(zoomed_rect(position.0, size.0, z))?;
    }

    // The player: half height while sliding, lifted by the jump arc,
    // flashing during the death sequence.
    let visible = match stage {
        GameStage::Dying { frame, .. } => frame % 2 == 0,
        _ => true,
    };
    if visible {
        let height = if state.sliding { player::HEIGHT / 2.0 } else { player::HEIGHT };
        let top = position.0.y + (player::HEIGHT - height) - state.jump_height;
        canvas.set_draw_color(CORGI);
        canvas.fill_rect(zoomed_rect(Vec2::new(position.0.x, top), Vec2::new(player::WIDTH, height), z))?;

        // Shield aura, honoring the expiry blink.
        if let Some(shield) = &session.buffs.shield {
            if shield.blink.visible() {
                canvas.set_draw_color(AURA);
                canvas.draw_rect(zoomed_rect(
                    Vec2::new(position.0.x - 6.0, top - 6.0),
                    Vec2::new(player::WIDTH + 12.0, height + 12.0),
                    z,
                ))?;
            }
        }
    }

    canvas.present();
    Ok(())
}

/// Window-title HUD, refreshed a few times a second.
pub fn hud_system(
    mut canvas: NonSendMut<&'static mut Canvas<Window>>,
    session: Res<GameSession>,
    pause: Res<PauseState>,
    stage: Res<GameStage>,
    notification: Res<Notification>,
    mut counter: Local<u32>,
) {
    *counter = counter.wrapping_add(1);
    if *counter % 15 != 0 {
        return;
    }

    let mut title = hud::title_line(session.score, session.coins, pause.active());
    match *stage {
        GameStage::Menu => title.push_str("  [enter to run]"),
        GameStage::GameOver => title.push_str("  [game over - enter replays]"),
        _ => {}
    }
    if let Some(text) = &notification.text {
        title.push_str("  |  ");
        title.push_str(text);
    }
    let _ = canvas.window_mut().set_title(&title);
}
