//! Corgi Run game library crate.

pub mod app;
pub mod constants;
pub mod effects;
pub mod error;
pub mod events;
pub mod game;
pub mod hud;
pub mod ledger;
pub mod pool;
pub mod profile;
pub mod session;
pub mod systems;
