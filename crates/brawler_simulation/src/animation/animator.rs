//! Animator-side view of a unit

use bevy::prelude::*;

use super::params::AnimatorParams;
use crate::components::Direction;

/// Lives on the animator entity (a child of the unit root, or the root
/// itself). Keyframe callbacks are addressed to this entity.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(AnimatorParams, Transform)]
pub struct UnitAnimator {
    pub current_direction: Direction,
    /// Unit root, filled in when the movement controller links to it
    pub unit: Option<Entity>,
}

impl Default for UnitAnimator {
    fn default() -> Self {
        Self {
            current_direction: Direction::Right,
            unit: None,
        }
    }
}

impl UnitAnimator {
    pub fn for_unit(unit: Entity) -> Self {
        Self {
            unit: Some(unit),
            ..default()
        }
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.current_direction = direction;
    }

    /// Entity that owns combat/movement components for this animator
    pub fn root(&self, animator_entity: Entity) -> Entity {
        self.unit.unwrap_or(animator_entity)
    }
}
