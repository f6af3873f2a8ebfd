#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use bevy_ecs::{entity::Entity, event::Events, world::World};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use corgi_run::{
    effects::{Collaborators, PowerUps},
    error::GameError,
    events::{GameCommand, GameEvent},
    ledger::{LedgerHandle, NullLedger},
    pool::{EntityPool, Pools},
    profile::{Profile, ProfilePath},
    session::GameSession,
    systems::components::{
        Active, Backdrop, CameraZoom, DeltaTime, GlobalState, InputState, Kind, KickDrift, Notification,
        PendingReset, Player, Position, PowerUpKind, Size,
    },
    systems::player::PlayerState,
    systems::river::RiverState,
    systems::spawner::{
        create_coin, create_obstacle, create_power_up, reset_coin, reset_obstacle, reset_power_up, SpawnRng,
        SpawnTracker,
    },
    systems::stage::{GameStage, PauseState},
};

static PROFILE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A throwaway profile location so tests never touch the real config dir.
pub fn temp_profile_path() -> ProfilePath {
    let n = PROFILE_COUNTER.fetch_add(1, Ordering::Relaxed);
    let path: PathBuf = std::env::temp_dir().join(format!("corgi-run-test-{}-{n}", std::process::id()));
    ProfilePath(path.join("profile.json"))
}

/// Creates a basic test world with required resources for ECS systems
pub fn create_test_world() -> World {
    let mut world = World::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(GameSession::default());
    world.insert_resource(Profile::default());
    world.insert_resource(temp_profile_path());
    world.insert_resource(Collaborators::default());
    world.insert_resource(LedgerHandle::spawn(Box::new(NullLedger)));
    world.insert_resource(GameStage::Playing);
    world.insert_resource(PauseState::default());
    world.insert_resource(PendingReset::None);
    world.insert_resource(Notification::default());
    world.insert_resource(RiverState::default());
    world.insert_resource(InputState::default());
    world.insert_resource(SpawnRng(SmallRng::seed_from_u64(0x5eed)));
    world.insert_resource(SpawnTracker::default());
    world.insert_resource(CameraZoom::default());
    world.insert_resource(Backdrop::default());
    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(DeltaTime { seconds: 1.0 / 60.0 });

    world
}

/// Installs the three entity pools with their startup warm counts.
pub fn install_pools(world: &mut World) {
    let pools = Pools {
        obstacles: EntityPool::new(create_obstacle, reset_obstacle, 15, world),
        coins: EntityPool::new(create_coin, reset_coin, 20, world),
        power_ups: EntityPool::new(create_power_up, reset_power_up, 10, world),
    };
    world.insert_resource(pools);
}

/// Spawns the player at the grounded start position.
pub fn spawn_test_player(world: &mut World) -> Entity {
    world
        .spawn((
            Player,
            Position(Vec2::new(
                corgi_run::constants::player::START_X,
                corgi_run::constants::player::BASE_Y,
            )),
            PlayerState::default(),
        ))
        .id()
}

/// Spawns a live entity directly, bypassing the pools.
pub fn spawn_test_entity(world: &mut World, kind: Kind, position: Vec2, size: Vec2) -> Entity {
    world
        .spawn((kind, Position(position), Size(size), KickDrift(1.0), Active))
        .id()
}

/// Sends a game event to the world
pub fn send_game_event(world: &mut World, event: GameEvent) {
    let mut events = world.resource_mut::<Events<GameEvent>>();
    events.send(event);
}

/// Sends a player command to the world
pub fn send_command(world: &mut World, command: GameCommand) {
    send_game_event(world, GameEvent::Command(command));
}

/// Drains every buffered game event
pub fn drain_events(world: &mut World) -> Vec<GameEvent> {
    world.resource_mut::<Events<GameEvent>>().drain().collect()
}

/// A scriptable power-up collaborator for collision and magnet tests.
/// Activations land in a shared log the test keeps a handle to.
pub struct TestPowerUps {
    pub invincible: bool,
    pub magnet: bool,
    pub multiplier: f32,
    pub activated: std::sync::Arc<std::sync::Mutex<Vec<PowerUpKind>>>,
}

impl TestPowerUps {
    pub fn new() -> Self {
        TestPowerUps {
            invincible: false,
            magnet: false,
            multiplier: 1.0,
            activated: std::sync::Arc::default(),
        }
    }
}

impl PowerUps for TestPowerUps {
    fn activate(&mut self, kind: PowerUpKind) {
        self.activated.lock().unwrap().push(kind);
    }

    fn is_invincible(&self) -> bool {
        self.invincible
    }

    fn is_magnet_active(&self) -> bool {
        self.magnet
    }

    fn score_multiplier(&self) -> f32 {
        self.multiplier
    }
}
