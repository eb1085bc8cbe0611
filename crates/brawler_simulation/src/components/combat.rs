//! Combat-side sibling components
//!
//! These are the two receivers of animation keyframe callbacks:
//! - `PlayerCombat` on player roots
//! - `EnemyAi` on enemy roots
//!
//! Both only track what the callbacks touch (ready flag, direction, damage
//! payload). Attack selection and AI decisions live elsewhere.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::unit::Direction;

/// Damage payload carried by attacks and projectiles
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
pub struct DamageObject {
    pub damage: u32,
}

impl Default for DamageObject {
    fn default() -> Self {
        Self { damage: 10 }
    }
}

impl DamageObject {
    pub fn new(damage: u32) -> Self {
        Self { damage }
    }
}

/// Weapon held by a player
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Weapon {
    pub name: String,
    pub damage_object: DamageObject,
}

impl Weapon {
    pub fn new(name: impl Into<String>, damage_object: DamageObject) -> Self {
        Self {
            name: name.into(),
            damage_object,
        }
    }
}

/// Player combat state
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PlayerCombat {
    pub current_direction: Direction,
    /// Hand bone entity used as the projectile spawn origin
    pub weapon_bone: Option<Entity>,
    pub weapon: Option<Weapon>,
    /// Damage dealt without a weapon
    pub unarmed: DamageObject,
    /// Hit probe distance in front of the unit
    pub reach: f32,
    /// Set by the `Ready` keyframe, cleared when an attack starts
    pub ready_for_input: bool,
}

impl Default for PlayerCombat {
    fn default() -> Self {
        Self {
            current_direction: Direction::Right,
            weapon_bone: None,
            weapon: None,
            unarmed: DamageObject::default(),
            reach: 0.8,
            ready_for_input: true,
        }
    }
}

impl PlayerCombat {
    /// Animation finished, accept the next input
    pub fn ready(&mut self) {
        self.ready_for_input = true;
    }

    pub fn current_weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    /// Payload of the current attack (weapon if held, else unarmed)
    pub fn attack_payload(&self) -> &DamageObject {
        self.weapon
            .as_ref()
            .map(|w| &w.damage_object)
            .unwrap_or(&self.unarmed)
    }
}

/// Enemy brain, as far as animation callbacks are concerned
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct EnemyAi {
    pub current_direction: Direction,
    pub attack: DamageObject,
    pub reach: f32,
    pub ready_for_input: bool,
}

impl Default for EnemyAi {
    fn default() -> Self {
        Self {
            current_direction: Direction::Left,
            attack: DamageObject::default(),
            reach: 0.8,
            ready_for_input: true,
        }
    }
}

impl EnemyAi {
    pub fn ready(&mut self) {
        self.ready_for_input = true;
    }
}

/// Marker: custom projectile spawn position, placed anywhere under the weapon bone
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ProjectileSpawnPoint;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attack_payload_prefers_weapon() {
        let mut combat = PlayerCombat::default();
        assert_eq!(combat.attack_payload().damage, 10);

        combat.weapon = Some(Weapon::new("pipe", DamageObject::new(25)));
        assert_eq!(combat.attack_payload().damage, 25);
    }

    #[test]
    fn test_ready_sets_flag() {
        let mut combat = PlayerCombat {
            ready_for_input: false,
            ..default()
        };
        combat.ready();
        assert!(combat.ready_for_input);

        let mut ai = EnemyAi {
            ready_for_input: false,
            ..default()
        };
        ai.ready();
        assert!(ai.ready_for_input);
    }
}
