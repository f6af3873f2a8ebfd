use bevy_ecs::prelude::*;
use glam::Vec2;

/// A player- or host-issued command, decoded from input in the app layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Exit,
    Jump,
    SlideStart,
    SlideEnd,
    HoldLeft(bool),
    HoldRight(bool),
    /// Start a run from the menu, or replay from the game-over screen.
    Confirm,
    GoHome,
    TogglePause,
    ToggleMute,
    SubmitScore,
    BuyLife,
    UpgradeShield,
    UpgradeBooster,
}

/// Simulation events, produced and consumed within a single tick.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum GameEvent {
    Command(GameCommand),
    CoinCollected { pos: Vec2 },
    PowerUpCollected { pos: Vec2 },
    ObstacleKicked { pos: Vec2 },
    /// Barrier contact absorbed by invincibility; feedback only, no death.
    HitAbsorbed { pos: Vec2 },
    PlayerHit { pos: Vec2 },
    PlayerDrowned,
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}
