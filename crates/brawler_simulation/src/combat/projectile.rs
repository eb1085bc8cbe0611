//! Thrown projectiles
//!
//! Definitions are registered by name (`ProjectileRegistry`) and spawned by
//! the `SpawnProjectile` keyframe. A projectile flies straight along its
//! direction sign on the X axis, hits the first opposing unit it touches and
//! expires after its lifetime.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::damage::DamageDealt;
use super::hit::sphere_touches_body;
use crate::components::{BodyCapsule, DamageObject, Dead, Direction, Health, Player, RendererToggle};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileDef {
    pub speed: f32,
    pub lifetime: f32,
    pub radius: f32,
    /// Used when the thrower holds no weapon
    pub damage: DamageObject,
}

impl Default for ProjectileDef {
    fn default() -> Self {
        Self {
            speed: 10.0,
            lifetime: 2.0,
            radius: 0.15,
            damage: DamageObject::default(),
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileRegistry {
    pub definitions: HashMap<String, ProjectileDef>,
}

impl Default for ProjectileRegistry {
    fn default() -> Self {
        let mut definitions = HashMap::new();
        definitions.insert("Knife".to_string(), ProjectileDef::default());
        Self { definitions }
    }
}

impl ProjectileRegistry {
    pub fn get(&self, name: &str) -> Option<&ProjectileDef> {
        self.definitions.get(name)
    }
}

#[derive(Component, Debug, Clone, PartialEq)]
#[require(Transform, RendererToggle)]
pub struct Projectile {
    pub name: String,
    pub direction: Direction,
    pub speed: f32,
    pub radius: f32,
    pub remaining: f32,
    pub damage: DamageObject,
    pub owner: Entity,
    /// Thrown by a player: hits enemies only, and the other way round
    pub from_player: bool,
}

impl Projectile {
    pub fn velocity(&self) -> Vec3 {
        Vec3::X * self.direction.sign() as f32 * self.speed
    }
}

pub fn spawn_projectile(
    commands: &mut Commands,
    name: &str,
    def: &ProjectileDef,
    position: Vec3,
    direction: Direction,
    damage: Option<DamageObject>,
    owner: Entity,
    from_player: bool,
) -> Entity {
    commands
        .spawn((
            Name::new(name.to_string()),
            Transform::from_translation(position),
            Projectile {
                name: name.to_string(),
                direction,
                speed: def.speed,
                radius: def.radius,
                remaining: def.lifetime,
                damage: damage.unwrap_or_else(|| def.damage.clone()),
                owner,
                from_player,
            },
        ))
        .id()
}

/// Fixed step: move, collide, expire
pub fn update_projectiles(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut projectiles: Query<(Entity, &mut Projectile, &mut Transform)>,
    targets: Query<
        (Entity, &Transform, &BodyCapsule, Has<Player>),
        (With<Health>, Without<Dead>, Without<Projectile>),
    >,
    mut damage_events: EventWriter<DamageDealt>,
) {
    let dt = time.delta_secs();

    for (entity, mut projectile, mut transform) in projectiles.iter_mut() {
        transform.translation += projectile.velocity() * dt;
        projectile.remaining -= dt;

        let hit = targets.iter().find(|(target, target_transform, body, is_player)| {
            *target != projectile.owner
                && *is_player != projectile.from_player
                && sphere_touches_body(
                    transform.translation,
                    projectile.radius,
                    target_transform.translation,
                    body,
                )
        });

        if let Some((target, ..)) = hit {
            damage_events.write(DamageDealt {
                attacker: projectile.owner,
                target,
                damage: projectile.damage.damage,
            });
            commands.entity(entity).despawn();
        } else if projectile.remaining <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_follows_direction() {
        let projectile = Projectile {
            name: "Knife".to_string(),
            direction: Direction::Right,
            speed: 10.0,
            radius: 0.1,
            remaining: 1.0,
            damage: DamageObject::default(),
            owner: Entity::PLACEHOLDER,
            from_player: true,
        };
        assert_eq!(projectile.velocity(), Vec3::new(-10.0, 0.0, 0.0));
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ProjectileRegistry::default();
        assert!(registry.get("Knife").is_some());
        assert!(registry.get("Anvil").is_none());
    }
}
