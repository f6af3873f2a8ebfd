use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::{EventPump, Sdl};
use tracing::{debug, info, trace};

use crate::constants::{CANVAS_SIZE, LOOP_TIME};
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::game::Game;

/// Main application wrapper that manages SDL initialization, window lifecycle, and the game loop.
pub struct App {
    pub game: Game,
    event_pump: EventPump,
    last_tick: Instant,
    /// Sub-tick overrun carried into the next frame's sleep budget.
    carry: Duration,
    // Keep SDL alive for the app lifetime
    _sdl_context: Sdl,
}

impl App {
    /// Initializes SDL subsystems, creates the game window, and sets up the game state.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or propagates
    /// errors from `Game::new()` during game state setup.
    pub fn new() -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        trace!(width = CANVAS_SIZE.x, height = CANVAS_SIZE.y, "Creating game window");
        let window = video_subsystem
            .window("Corgi Run", CANVAS_SIZE.x, CANVAS_SIZE.y)
            .resizable()
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        trace!("Creating hardware-accelerated canvas");
        let mut canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        canvas
            .set_logical_size(CANVAS_SIZE.x, CANVAS_SIZE.y)
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer_info = ?canvas.info(), "Canvas renderer initialized");

        let game = Game::new(canvas)?;

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            event_pump,
            last_tick: Instant::now(),
            carry: Duration::ZERO,
            _sdl_context: sdl_context,
        })
    }

    /// Maps a raw SDL event to a game command, if it has one.
    fn translate(event: &Event) -> Option<GameCommand> {
        match event {
            Event::Quit { .. } => Some(GameCommand::Exit),
            Event::KeyDown {
                keycode: Some(key),
                repeat: false,
                ..
            } => match *key {
                Keycode::Escape | Keycode::Q => Some(GameCommand::Exit),
                Keycode::Space | Keycode::Up | Keycode::W => Some(GameCommand::Jump),
                Keycode::Down | Keycode::S => Some(GameCommand::SlideStart),
                Keycode::Left | Keycode::A => Some(GameCommand::HoldLeft(true)),
                Keycode::Right | Keycode::D => Some(GameCommand::HoldRight(true)),
                Keycode::Return => Some(GameCommand::Confirm),
                Keycode::P => Some(GameCommand::TogglePause),
                Keycode::M => Some(GameCommand::ToggleMute),
                Keycode::H => Some(GameCommand::GoHome),
                Keycode::F => Some(GameCommand::SubmitScore),
                Keycode::B => Some(GameCommand::BuyLife),
                Keycode::U => Some(GameCommand::UpgradeShield),
                Keycode::I => Some(GameCommand::UpgradeBooster),
                _ => None,
            },
            Event::KeyUp { keycode: Some(key), .. } => match *key {
                Keycode::Down | Keycode::S => Some(GameCommand::SlideEnd),
                Keycode::Left | Keycode::A => Some(GameCommand::HoldLeft(false)),
                Keycode::Right | Keycode::D => Some(GameCommand::HoldRight(false)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Splits a frame's measured time into the sleep needed now and the
    /// remainder to charge against the next frame's budget, keeping the
    /// tick grid aligned across overruns.
    fn pace(elapsed: Duration, carry: Duration) -> (Duration, Duration) {
        let budget = LOOP_TIME.saturating_sub(carry);
        if elapsed < budget {
            (budget - elapsed, Duration::ZERO)
        } else {
            let over = elapsed - budget;
            let remainder = Duration::from_nanos((over.as_nanos() % LOOP_TIME.as_nanos()) as u64);
            (Duration::ZERO, remainder)
        }
    }

    /// Executes a single frame of the game loop with consistent timing.
    ///
    /// Polls SDL input into game commands, runs game logic via `game.tick()`,
    /// and spin-sleeps away whatever remains of the 60 Hz tick budget.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` if the game requested exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();
        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        for event in self.event_pump.poll_iter() {
            if let Some(command) = Self::translate(&event) {
                trace!(?command, "Input command");
                // Observers (exit handling) fire on the trigger; readers see
                // the buffered event next schedule run.
                self.game.world.trigger(GameEvent::Command(command));
                self.game.world.send_event(GameEvent::Command(command));
            }
        }

        let exit = self.game.tick(dt);
        if exit {
            return false;
        }

        let (remaining, carry) = Self::pace(start.elapsed(), self.carry);
        self.carry = carry;
        if !remaining.is_zero() {
            spin_sleep::sleep(remaining);
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pace_sleeps_the_unused_budget() {
        let elapsed = LOOP_TIME / 4;
        let (sleep, carry) = App::pace(elapsed, Duration::ZERO);
        assert_eq!(sleep, LOOP_TIME - elapsed);
        assert_eq!(carry, Duration::ZERO);
    }

    #[test]
    fn pace_carries_the_overrun_remainder() {
        let over = Duration::from_millis(3);
        let (sleep, carry) = App::pace(LOOP_TIME + over, Duration::ZERO);
        assert_eq!(sleep, Duration::ZERO);
        assert_eq!(carry, over);

        // A multi-tick stall keeps only the sub-tick part.
        let (_, carry) = App::pace(LOOP_TIME * 3 + over, Duration::ZERO);
        assert_eq!(carry, over);
    }

    #[test]
    fn pace_charges_the_carry_against_the_next_budget() {
        let carry = Duration::from_millis(3);
        let elapsed = Duration::from_millis(1);
        let (sleep, next) = App::pace(elapsed, carry);
        assert_eq!(sleep, LOOP_TIME - carry - elapsed);
        assert_eq!(next, Duration::ZERO);
    }
}
