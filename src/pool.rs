//! Entity recycling.
//!
//! Pooled entities are spawned once and never despawned during a run; they
//! cycle between a free list and an active list. Acquiring runs the pool's
//! reset callback and tags the entity [`Active`]; releasing strips the tag
//! and returns the entity to the free list. Systems that operate on live
//! world objects filter on `With<Active>`.

use bevy_ecs::prelude::*;
use tracing::{debug, trace};

use crate::systems::components::{Active, Kind};

/// Creates one pooled entity, with `Active` absent.
pub type CreateFn = fn(&mut World) -> Entity;
/// Restores a pooled entity to its canonical blank state.
pub type ResetFn = fn(&mut World, Entity);

/// A recycling pool over world entities.
pub struct EntityPool {
    create: CreateFn,
    reset: ResetFn,
    free: Vec<Entity>,
    active: Vec<Entity>,
}

impl EntityPool {
    /// Builds a pool and pre-creates `warm` instances into the free list.
    pub fn new(create: CreateFn, reset: ResetFn, warm: usize, world: &mut World) -> Self {
        let free = (0..warm).map(|_| create(world)).collect::<Vec<_>>();
        EntityPool {
            create,
            reset,
            free,
            active: Vec::new(),
        }
    }

    /// Takes an entity from the free list, growing the pool if it is empty.
    /// The entity comes back reset and tagged `Active`.
    pub fn acquire(&mut self, world: &mut World) -> Entity {
        let entity = match self.free.pop() {
            Some(entity) => entity,
            None => {
                let entity = (self.create)(world);
                trace!(?entity, total = self.total() + 1, "Pool grew");
                entity
            }
        };
        (self.reset)(world, entity);
        world.entity_mut(entity).insert(Active);
        self.active.push(entity);
        entity
    }

    /// Returns an entity to the free list. A no-op unless the entity is
    /// currently active, so double-releases cannot duplicate a free slot.
    pub fn release(&mut self, world: &mut World, entity: Entity) {
        let Some(index) = self.active.iter().position(|&e| e == entity) else {
            return;
        };
        self.active.swap_remove(index);
        world.entity_mut(entity).remove::<Active>();
        (self.reset)(world, entity);
        self.free.push(entity);
    }

    /// Drains every active entity back to the free list.
    pub fn release_all(&mut self, world: &mut World) {
        let released = self.active.len();
        while let Some(entity) = self.active.pop() {
            world.entity_mut(entity).remove::<Active>();
            (self.reset)(world, entity);
            self.free.push(entity);
        }
        if released > 0 {
            debug!(released, "Pool drained");
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn total(&self) -> usize {
        self.active.len() + self.free.len()
    }
}

/// The three gameplay pools, keyed by entity kind.
#[derive(Resource)]
pub struct Pools {
    pub obstacles: EntityPool,
    pub coins: EntityPool,
    pub power_ups: EntityPool,
}

impl Pools {
    /// Routes a release to the pool owning the given kind.
    pub fn release(&mut self, world: &mut World, entity: Entity, kind: Kind) {
        match kind {
            Kind::Obstacle(_) => self.obstacles.release(world, entity),
            Kind::Coin => self.coins.release(world, entity),
            Kind::PowerUp(_) => self.power_ups.release(world, entity),
        }
    }

    pub fn release_all(&mut self, world: &mut World) {
        self.obstacles.release_all(world);
        self.coins.release_all(world);
        self.power_ups.release_all(world);
    }
}
