use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use bitflags::bitflags;
use glam::Vec2;
use strum_macros::{Display, EnumIter, FromRepr};

use crate::constants::{spawn, CANVAS_H};

/// A tag component for the player entity.
#[derive(Default, Component)]
pub struct Player;

/// Which hitbox math applies to an obstacle: ground entities are jumped
/// over, overhead entities are slid under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitboxRow {
    Ground,
    Overhead,
}

/// The eight barrier archetypes the spawner draws from. `Buffbox` is the
/// carrier slot: rolling it yields a shield/booster/power-up pickup
/// instead of a barrier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, FromRepr, EnumIter, Display)]
#[repr(u8)]
pub enum ObstacleArchetype {
    Hydrant = 1,
    Crate,
    LowWall,
    TallSign,
    Drone,
    Billboard,
    Spikes,
    Buffbox,
}

impl ObstacleArchetype {
    pub fn row(&self) -> HitboxRow {
        match self {
            ObstacleArchetype::Drone | ObstacleArchetype::Billboard => HitboxRow::Overhead,
            _ => HitboxRow::Ground,
        }
    }

    /// Sprite width / height ratio.
    pub fn aspect(&self) -> f32 {
        match self {
            ObstacleArchetype::Hydrant => 0.6,
            ObstacleArchetype::Crate => 1.0,
            ObstacleArchetype::LowWall => 1.4,
            ObstacleArchetype::TallSign => 0.5,
            ObstacleArchetype::Drone => 1.0,
            ObstacleArchetype::Billboard => 1.2,
            ObstacleArchetype::Spikes => 2.0,
            ObstacleArchetype::Buffbox => 1.0,
        }
    }

    pub fn levitates(&self) -> bool {
        matches!(self, ObstacleArchetype::Drone)
    }

    pub fn scale(&self) -> f32 {
        if self.levitates() {
            spawn::LEVITATE_SCALE
        } else {
            1.0
        }
    }

    /// Resting top edge for a fresh spawn.
    pub fn base_y(&self) -> f32 {
        match self {
            ObstacleArchetype::TallSign => CANVAS_H - CANVAS_H / 2.35,
            ObstacleArchetype::Drone => CANVAS_H - CANVAS_H / 2.58,
            ObstacleArchetype::Billboard => CANVAS_H - CANVAS_H / 1.6,
            _ => CANVAS_H - CANVAS_H / 2.7,
        }
    }

    /// Drawn size with the archetype scale folded in.
    pub fn size(&self) -> Vec2 {
        let width = spawn::BARRIER_WIDTH * self.scale();
        Vec2::new(width, width / self.aspect())
    }
}

/// Exotic power-up kinds. Activation is delegated to the injected
/// power-up collaborator; the simulation only spawns and collects them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, FromRepr, EnumIter, Display)]
#[repr(u8)]
pub enum PowerUpKind {
    Magnet = 1,
    DoubleScore,
    Invincibility,
    CoinShower,
    TimeSlow,
}

/// What a collectible pickup grants on contact. Shield and booster feed
/// the session buffs; exotic kinds are handed to the collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    Shield,
    Booster,
    Exotic(PowerUpKind),
}

/// A tag component denoting what a pooled entity currently is.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum Kind {
    Obstacle(ObstacleArchetype),
    Coin,
    PowerUp(PickupKind),
}

impl Kind {
    pub fn row(&self) -> HitboxRow {
        match self {
            Kind::Obstacle(archetype) => archetype.row(),
            _ => HitboxRow::Ground,
        }
    }
}

/// Canvas position of an entity's top-left corner.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position(pub Vec2);

/// Drawn size in canvas pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Size(pub Vec2);

impl Size {
    pub fn center(&self, position: &Position) -> Vec2 {
        position.0 + self.0 * 0.5
    }
}

/// Marker managed exclusively by the pools; live-world systems filter on it.
#[derive(Component, Default)]
pub struct Active;

/// Marker set when a kill condition fires; the cull system releases these
/// back to their pools in the same tick.
#[derive(Component, Default)]
pub struct Dead;

/// Knock-back drift, rolled at spawn and consumed only if the entity is
/// ever kicked.
#[derive(Component, Debug, Clone, Copy)]
pub struct KickDrift(pub f32);

/// Marker for an obstacle sent flying by a shielded contact.
#[derive(Component, Default)]
pub struct Kicked;

/// Sky coins descend diagonally until they reach the ground coin row.
#[derive(Component, Debug, Clone, Copy)]
pub struct RainFall {
    pub speed: f32,
}

/// Floating bob for levitating obstacles.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Levitate {
    pub phase: f32,
}

#[derive(Bundle)]
pub struct PooledBundle {
    pub kind: Kind,
    pub position: Position,
    pub size: Size,
    pub kick_drift: KickDrift,
}

bitflags! {
    /// Directional keys currently held.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Held: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
    }
}

/// Held-input state, written by the command system, read everywhere else.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct InputState(pub Held);

#[derive(Resource)]
pub struct GlobalState {
    pub exit: bool,
}

#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct DeltaTime {
    pub seconds: f32,
}

/// Transient HUD notification (ledger outcomes, purchase failures).
#[derive(Resource, Default, Debug)]
pub struct Notification {
    pub text: Option<String>,
    pub remaining_ticks: u32,
}

impl Notification {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.remaining_ticks = 180;
    }
}

/// Critically damped presentation zoom, driven by the river ride.
#[derive(Resource, Clone, Copy, Debug)]
pub struct CameraZoom {
    pub current: f32,
    pub target: f32,
}

impl Default for CameraZoom {
    fn default() -> Self {
        CameraZoom {
            current: 1.0,
            target: 1.0,
        }
    }
}

/// Parallax offsets for the two background bands.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct Backdrop {
    pub offsets: [f32; 2],
}

/// Deferred world reset requested by the stage machine, performed by an
/// exclusive system at a safe point in the schedule.
#[derive(Resource, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingReset {
    #[default]
    None,
    /// Fresh session, everything released.
    NewRun,
    /// Keep score and coins; clear hazards and grant a grace shield.
    Revive,
}
