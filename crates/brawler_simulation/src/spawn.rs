//! Spawn helpers for units and the demo stage
//!
//! Unit layout:
//! ```text
//! root   MovementController, Health, PlayerCombat | EnemyAi, rapier body
//! ├─ collider   capsule at the body centre (rapier)
//! └─ animator   UnitAnimator + AnimatorParams
//!    ├─ body mesh   RendererToggle
//!    └─ weapon bone (players)
//!       └─ projectile spawn point
//! ```

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::animation::UnitAnimator;
use crate::components::{
    BodyCapsule, Direction, EnemyAi, Health, Player, PlayerCombat, ProjectileSpawnPoint,
    RendererToggle, UnitState,
};
use crate::movement::{MovementController, MovementSettings};
use crate::physics::{layer_bit, layers, rapier_groups, spawn_level_box};

/// Weapon hand position relative to the animator
const WEAPON_BONE_OFFSET: Vec3 = Vec3::new(0.0, 1.2, 0.0);
/// Knife tip, slightly above the hand
const PROJECTILE_SPAWN_OFFSET: Vec3 = Vec3::new(0.0, 0.1, 0.0);

#[derive(Debug, Clone)]
pub struct UnitBlueprint {
    pub name: String,
    pub position: Vec3,
    pub direction: Direction,
    pub health: u32,
    pub capsule: BodyCapsule,
    pub movement: MovementSettings,
}

impl UnitBlueprint {
    pub fn new(name: impl Into<String>, position: Vec3, movement: &MovementSettings) -> Self {
        Self {
            name: name.into(),
            position,
            direction: Direction::Right,
            health: 100,
            capsule: BodyCapsule::default(),
            movement: movement.clone(),
        }
    }

    pub fn facing(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health;
        self
    }
}

/// Root entity, collider and animator. Returns (root, animator).
fn spawn_unit_body(commands: &mut Commands, blueprint: &UnitBlueprint, layer: u32) -> (Entity, Entity) {
    let capsule = blueprint.capsule;
    let root = commands
        .spawn((
            Name::new(blueprint.name.clone()),
            Transform::from_translation(blueprint.position),
            UnitState::default(),
            Health::new(blueprint.health),
            capsule,
            MovementController::new(blueprint.movement.clone()).with_direction(blueprint.direction),
            RigidBody::Dynamic,
            LockedAxes::ROTATION_LOCKED,
        ))
        .id();

    commands.spawn((
        Name::new("Collider"),
        Transform::from_translation(capsule.center),
        Collider::capsule_y(capsule.half_segment(), capsule.radius),
        rapier_groups(layer, u32::MAX & !layer_bit(layers::PROJECTILE)),
        ChildOf(root),
    ));

    let animator = commands
        .spawn((
            Name::new("Animator"),
            UnitAnimator::for_unit(root),
            ChildOf(root),
        ))
        .id();

    commands.spawn((
        Name::new("Body"),
        Transform::default(),
        RendererToggle::default(),
        ChildOf(animator),
    ));

    (root, animator)
}

pub fn spawn_player(commands: &mut Commands, blueprint: &UnitBlueprint) -> Entity {
    let (root, animator) = spawn_unit_body(commands, blueprint, layers::PLAYER);

    let weapon_bone = commands
        .spawn((
            Name::new("WeaponBone"),
            Transform::from_translation(WEAPON_BONE_OFFSET),
            ChildOf(animator),
        ))
        .id();
    commands.spawn((
        Name::new("ProjectileSpawnPoint"),
        Transform::from_translation(PROJECTILE_SPAWN_OFFSET),
        ProjectileSpawnPoint,
        ChildOf(weapon_bone),
    ));

    commands.entity(root).insert((
        Player,
        PlayerCombat {
            current_direction: blueprint.direction,
            weapon_bone: Some(weapon_bone),
            ..default()
        },
    ));

    root
}

pub fn spawn_enemy(commands: &mut Commands, blueprint: &UnitBlueprint) -> Entity {
    let (root, _) = spawn_unit_body(commands, blueprint, layers::ENEMY);
    commands.entity(root).insert(EnemyAi {
        current_direction: blueprint.direction,
        ..default()
    });
    root
}

/// Floor with a wall on each side of the walkable strip
pub fn spawn_demo_stage(commands: &mut Commands) -> Vec<Entity> {
    vec![
        spawn_level_box(
            commands,
            Vec3::new(0.0, -0.5, 0.0),
            Vec3::new(20.0, 0.5, 4.0),
            layers::ENVIRONMENT,
        ),
        spawn_level_box(
            commands,
            Vec3::new(-10.5, 2.0, 0.0),
            Vec3::new(0.5, 2.0, 4.0),
            layers::ENVIRONMENT,
        ),
        spawn_level_box(
            commands,
            Vec3::new(10.5, 2.0, 0.0),
            Vec3::new(0.5, 2.0, 4.0),
            layers::ENVIRONMENT,
        ),
    ]
}
