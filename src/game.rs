//! This module contains the main game logic and state.

use std::time::Instant;

use bevy_ecs::event::EventRegistry;
use bevy_ecs::observer::Trigger;
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::ResMut;
use bevy_ecs::world::World;
use sdl2::render::Canvas;
use sdl2::video::Window;
use tracing::{debug, info, warn};

use crate::constants::{player, spawn, LOOP_TIME};
use crate::effects::Collaborators;
use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent};
use crate::ledger::{LedgerHandle, NullLedger};
use crate::pool::{EntityPool, Pools};
use crate::profile::{self, ProfilePath};
use crate::systems::components::{
    Backdrop, CameraZoom, DeltaTime, GlobalState, InputState, Notification, PendingReset, Player, Position,
};
use crate::systems::player::PlayerState;
use crate::systems::profiling::FrameStats;
use crate::systems::river::{camera_zoom_system, river_system, RiverState};
use crate::systems::spawner::{
    create_coin, create_obstacle, create_power_up, reset_coin, reset_obstacle, reset_power_up, spawn_system, SpawnRng,
    SpawnTracker,
};
use crate::systems::stage::{reset_run_system, stage_system, GameStage, PauseState};
use crate::systems::{
    collision::{collision_system, magnet_system},
    feedback::feedback_system,
    ledger::{ledger_command_system, ledger_poll_system},
    movement::{cull_system, entity_update_system},
    player::{player_control_system, player_update_system},
    render::{backdrop_system, hud_system, render_system},
    score::{buff_tick_system, notification_system, score_system, speed_ramp_system},
};

/// System set for all gameplay systems to ensure they run after input processing
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Gameplay systems that process inputs
    Input,
    /// Gameplay systems that update the game state
    Update,
    /// Gameplay systems that respond to events
    Respond,
}

/// System set for all rendering systems to ensure they run after gameplay logic
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum RenderSet {
    Draw,
    Hud,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// Orchestrates all game systems through a centralized `World` containing
/// entities, components, and resources, while a `Schedule` defines system
/// execution order. The SDL2 canvas is stored as `NonSend` to respect
/// thread safety requirements while integrating with the ECS.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Initializes the ECS world: registers events, pre-warms the entity
    /// pools, loads the persisted profile, starts the ledger worker, and
    /// spawns the player.
    ///
    /// # Errors
    ///
    /// Returns `GameError` if profile or ledger setup fails.
    pub fn new(canvas: Canvas<Window>) -> GameResult<Game> {
        info!("Starting game initialization");

        let mut world = World::default();
        let mut schedule = Schedule::default();

        debug!("Setting up ECS event registry and observers");
        Self::setup_ecs(&mut world);

        debug!("Inserting resources into ECS world");
        Self::insert_resources(&mut world, canvas);

        debug!("Configuring system execution schedule");
        Self::configure_schedule(&mut schedule);

        debug!("Spawning player entity");
        world.spawn((
            Player,
            Position(glam::Vec2::new(player::START_X, player::BASE_Y)),
            PlayerState::default(),
        ));

        info!("Game initialization completed successfully");
        Ok(Game { world, schedule })
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);

        world.add_observer(|event: Trigger<GameEvent>, mut state: ResMut<GlobalState>| {
            if matches!(*event, GameEvent::Command(GameCommand::Exit)) {
                state.exit = true;
            }
        });
    }

    fn insert_resources(world: &mut World, canvas: Canvas<Window>) {
        let pools = Pools {
            obstacles: EntityPool::new(create_obstacle, reset_obstacle, spawn::WARM_OBSTACLES, world),
            coins: EntityPool::new(create_coin, reset_coin, spawn::WARM_COINS, world),
            power_ups: EntityPool::new(create_power_up, reset_power_up, spawn::WARM_POWER_UPS, world),
        };
        world.insert_resource(pools);

        let profile_path = ProfilePath::default();
        world.insert_resource(profile::load(&profile_path));
        world.insert_resource(profile_path);

        world.insert_resource(LedgerHandle::spawn(Box::new(NullLedger)));
        world.insert_resource(Collaborators::default());

        world.insert_resource(crate::session::GameSession::default());
        world.insert_resource(GameStage::Menu);
        world.insert_resource(PauseState::default());
        world.insert_resource(PendingReset::None);
        world.insert_resource(RiverState::default());
        world.insert_resource(SpawnRng::default());
        world.insert_resource(SpawnTracker::default());
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(InputState::default());
        world.insert_resource(DeltaTime::default());
        world.insert_resource(Notification::default());
        world.insert_resource(CameraZoom::default());
        world.insert_resource(Backdrop::default());
        world.insert_resource(FrameStats::default());

        world.insert_non_send_resource::<&mut Canvas<Window>>(Box::leak(Box::new(canvas)));
    }

    fn configure_schedule(schedule: &mut Schedule) {
        schedule
            .add_systems((
                player_control_system.in_set(GameplaySet::Input),
                (
                    spawn_system,
                    entity_update_system,
                    collision_system,
                    magnet_system,
                    river_system,
                    camera_zoom_system,
                    player_update_system,
                    buff_tick_system,
                    score_system,
                    speed_ramp_system,
                    backdrop_system,
                    cull_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (
                    stage_system,
                    reset_run_system,
                    ledger_command_system,
                    ledger_poll_system,
                    feedback_system,
                    notification_system,
                    // Ages out double-buffered events; without it the event
                    // queues grow for the lifetime of the process.
                    bevy_ecs::event::event_update_system,
                )
                    .chain()
                    .in_set(GameplaySet::Respond),
                render_system.in_set(RenderSet::Draw),
                hud_system.in_set(RenderSet::Hud),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Update.run_if(Self::simulating),
                    GameplaySet::Respond,
                    RenderSet::Draw,
                    RenderSet::Hud,
                )
                    .chain(),
            );
    }

    /// The simulation only advances mid-run and unpaused; the stage machine
    /// and presentation always run.
    fn simulating(stage: bevy_ecs::system::Res<GameStage>, paused: bevy_ecs::system::Res<PauseState>) -> bool {
        stage.playing() && !paused.active()
    }

    /// Executes one tick of game logic by running all scheduled ECS systems.
    ///
    /// Returns `true` if the game should terminate (exit command received).
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime { seconds: dt });

        let start = Instant::now();
        self.schedule.run(&mut self.world);
        let total = start.elapsed();

        let mut stats = self.world.resource_mut::<FrameStats>();
        stats.record(total);
        if total > LOOP_TIME {
            let average = stats.average_ms().unwrap_or_default();
            warn!(
                total = format!("{total:.3?}"),
                average = format!("{average:.2}ms"),
                "Frame took longer than the tick budget"
            );
        }

        self.world.resource::<GlobalState>().exit
    }
}
