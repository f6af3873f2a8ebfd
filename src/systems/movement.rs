//! Per-tick movement of pooled entities and the same-tick cull.

use bevy_ecs::prelude::*;
use tracing::trace;

use crate::constants::{mechanics, spawn, CANVAS_W};
use crate::pool::Pools;
use crate::session::GameSession;
use crate::systems::components::{
    Active, Dead, HitboxRow, Kind, KickDrift, Kicked, Levitate, Position, RainFall, Size,
};

/// Scrolls, kicks, rains, and bobs every live entity, then marks the ones
/// past their kill threshold as [`Dead`].
#[allow(clippy::type_complexity)]
pub fn entity_update_system(
    mut commands: Commands,
    session: Res<GameSession>,
    mut query: Query<
        (
            Entity,
            &Kind,
            &mut Position,
            &Size,
            &KickDrift,
            Option<&Kicked>,
            Option<&mut RainFall>,
            Option<&mut Levitate>,
        ),
        (With<Active>, Without<Dead>),
    >,
) {
    let speed = session.speed;

    for (entity, kind, mut position, size, drift, kicked, rain, levitate) in query.iter_mut() {
        if kicked.is_some() {
            // Knocked back: up and off the trailing edge.
            position.0.x += speed * 2.0 + drift.0;
            position.0.y -= speed * 2.0;
        } else if let Some(mut rain) = rain {
            position.0.x -= speed * 1.5;
            position.0.y += rain.speed;
            if position.0.y >= spawn::COIN_GROUND_Y {
                position.0.y = spawn::COIN_GROUND_Y;
                rain.speed = 0.0;
                commands.entity(entity).remove::<RainFall>();
            }
        } else {
            position.0.x -= speed;
        }

        if let Some(mut levitate) = levitate {
            levitate.phase += mechanics::LEVITATE_PHASE_STEP;
            position.0.y += mechanics::LEVITATE_AMPLITUDE * (std::f32::consts::PI * levitate.phase).sin();
        }

        let gone = if kicked.is_some() {
            position.0.x > CANVAS_W + 5.0 * size.0.x || position.0.y < spawn::SKY_CULL_Y
        } else if position.0.y < spawn::SKY_CULL_Y {
            true
        } else {
            let widths = match kind.row() {
                HitboxRow::Ground => spawn::GROUND_CULL_WIDTHS,
                HitboxRow::Overhead => spawn::OVERHEAD_CULL_WIDTHS,
            };
            position.0.x < -widths * size.0.x
        };

        if gone {
            trace!(?entity, ?kind, x = position.0.x, y = position.0.y, "Entity past kill threshold");
            commands.entity(entity).insert(Dead);
        }
    }
}

/// Releases every [`Dead`] entity back to the pool of its kind, in the
/// same tick it died.
pub fn cull_system(world: &mut World) {
    let dead: Vec<(Entity, Kind)> = world
        .query_filtered::<(Entity, &Kind), (With<Dead>, With<Active>)>()
        .iter(world)
        .map(|(entity, kind)| (entity, *kind))
        .collect();

    if dead.is_empty() {
        return;
    }

    world.resource_scope::<Pools, _>(|world, mut pools| {
        for (entity, kind) in dead {
            pools.release(world, entity, kind);
        }
    });
}
