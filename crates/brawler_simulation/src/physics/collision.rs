//! Collision layers and static level geometry
//!
//! Layer indices are shared by two consumers:
//! - rapier `CollisionGroups` (rigid-body contacts)
//! - the movement contact probes (`LevelCollider` + collision mask)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::RendererToggle;

/// Layer indices (bit position in a mask)
pub mod layers {
    pub const ENVIRONMENT: u32 = 0;
    pub const PLAYER: u32 = 1;
    pub const ENEMY: u32 = 2;
    pub const PROJECTILE: u32 = 3;
}

pub const fn layer_bit(layer: u32) -> u32 {
    1 << layer
}

/// Movement probes only look at the environment unless configured otherwise
pub const DEFAULT_COLLISION_MASK: u32 = layer_bit(layers::ENVIRONMENT);

/// Axis-aligned static box that blocks units (floor, wall, crate)
///
/// Rotation of the entity is ignored by the probes.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct LevelCollider {
    pub half_extents: Vec3,
    pub layer: u32,
}

impl LevelCollider {
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            half_extents,
            layer: layers::ENVIRONMENT,
        }
    }

    pub fn on_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    /// True when this collider's layer is part of `mask`
    pub fn in_mask(&self, mask: u32) -> bool {
        self.layer < 32 && mask & layer_bit(self.layer) != 0
    }
}

/// Rapier groups: member of `layer`, collides with everything in `filter_mask`
pub fn rapier_groups(layer: u32, filter_mask: u32) -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(layer_bit(layer)),
        Group::from_bits_truncate(filter_mask),
    )
}

/// Spawns a static level box: probe shape, rapier collider and a renderer flag
pub fn spawn_level_box(
    commands: &mut Commands,
    center: Vec3,
    half_extents: Vec3,
    layer: u32,
) -> Entity {
    commands
        .spawn((
            Name::new("LevelBox"),
            Transform::from_translation(center),
            LevelCollider::new(half_extents).on_layer(layer),
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            rapier_groups(layer, u32::MAX),
            RendererToggle::default(),
        ))
        .id()
}
