//! Melee hit checks
//!
//! `HitCheckRequested` comes from the `Check4Hit` keyframe. The attacker's
//! reach is a sphere in front of its chest; every opposing unit whose body
//! capsule touches the sphere takes the attacker's damage payload.

use bevy::prelude::*;

use super::damage::DamageDealt;
use crate::components::{BodyCapsule, DamageObject, Dead, Direction, EnemyAi, Health, Player, PlayerCombat};

/// Height of the hit sphere above the unit origin
pub const HIT_HEIGHT: f32 = 1.0;
pub const HIT_RADIUS: f32 = 0.5;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitCheckRequested {
    pub attacker: Entity,
}

/// Centre of the melee hit sphere
pub fn hit_sphere_center(position: Vec3, direction: Direction, reach: f32) -> Vec3 {
    position + Vec3::Y * HIT_HEIGHT + Vec3::X * direction.sign() as f32 * reach
}

/// Sphere vs. body capsule standing at `target_position`
pub fn sphere_touches_body(
    center: Vec3,
    radius: f32,
    target_position: Vec3,
    body: &BodyCapsule,
) -> bool {
    let half = body.half_segment();
    let mid = target_position + body.center;
    let a = mid - Vec3::Y * half;
    let b = mid + Vec3::Y * half;

    let ab = b - a;
    let t = if ab.length_squared() > 0.0 {
        ((center - a).dot(ab) / ab.length_squared()).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let closest = a + ab * t;
    closest.distance(center) <= radius + body.radius
}

/// Attack parameters of whichever combat component the attacker has
fn attack_of(
    player: Option<&PlayerCombat>,
    enemy: Option<&EnemyAi>,
) -> Option<(Direction, f32, DamageObject)> {
    if let Some(combat) = player {
        return Some((combat.current_direction, combat.reach, combat.attack_payload().clone()));
    }
    enemy.map(|ai| (ai.current_direction, ai.reach, ai.attack.clone()))
}

pub fn resolve_hit_checks(
    mut requests: EventReader<HitCheckRequested>,
    attackers: Query<(&Transform, Option<&PlayerCombat>, Option<&EnemyAi>, Has<Player>)>,
    targets: Query<(Entity, &Transform, &BodyCapsule, Has<Player>), (With<Health>, Without<Dead>)>,
    mut damage_events: EventWriter<DamageDealt>,
) {
    for request in requests.read() {
        let Ok((transform, player, enemy, attacker_is_player)) = attackers.get(request.attacker)
        else {
            continue;
        };
        let Some((direction, reach, payload)) = attack_of(player, enemy) else {
            continue;
        };

        let center = hit_sphere_center(transform.translation, direction, reach);

        for (target, target_transform, body, target_is_player) in targets.iter() {
            if target == request.attacker || target_is_player == attacker_is_player {
                continue;
            }
            if sphere_touches_body(center, HIT_RADIUS, target_transform.translation, body) {
                damage_events.write(DamageDealt {
                    attacker: request.attacker,
                    target,
                    damage: payload.damage,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_sphere_in_front() {
        // Right faces -X
        let center = hit_sphere_center(Vec3::ZERO, Direction::Right, 0.8);
        assert!((center - Vec3::new(-0.8, 1.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_sphere_vs_body() {
        let body = BodyCapsule::default();
        let center = Vec3::new(-0.8, 1.0, 0.0);

        assert!(sphere_touches_body(center, HIT_RADIUS, Vec3::new(-1.2, 0.0, 0.0), &body));
        // Behind the attacker
        assert!(!sphere_touches_body(center, HIT_RADIUS, Vec3::new(1.0, 0.0, 0.0), &body));
        // Too far along the depth axis
        assert!(!sphere_touches_body(center, HIT_RADIUS, Vec3::new(-0.8, 0.0, 1.5), &body));
    }
}
