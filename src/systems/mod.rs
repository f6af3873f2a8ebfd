//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod collision;
pub mod components;
pub mod feedback;
pub mod ledger;
pub mod movement;
pub mod player;
pub mod profiling;
pub mod render;
pub mod river;
pub mod score;
pub mod spawner;
pub mod stage;
