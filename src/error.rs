//! Centralized error types for the runner.
//!
//! `GameError` is the type public APIs return; recoverable in-frame
//! failures are additionally emitted as ECS events so systems can react
//! without unwinding the frame.

use std::io;

use bevy_ecs::event::Event;

/// Main error type for the game.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Errors surfaced by the ledger backend (or its absence).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("No ledger backend is configured")]
    Unavailable,

    #[error("Score {0} is not submittable")]
    InvalidScore(f64),

    #[error("A ledger request is already in flight")]
    Busy,

    #[error("Ledger rejected the request: {0}")]
    Rejected(String),

    #[error("Transport failure: {0}")]
    Transport(String),
}

/// Errors from the persisted player profile and its economy rules.
#[derive(thiserror::Error, Debug)]
pub enum ProfileError {
    #[error("Not enough coins: need {needed}, have {have}")]
    InsufficientCoins { needed: u64, have: u64 },

    #[error("Already at maximum level {0}")]
    MaxLevel(u32),

    #[error("No revives left this game")]
    LivesExhausted,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Profile file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
